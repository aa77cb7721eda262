// core/src/engine.rs
//
// Transliteration engine: a scheme registry plus a bounded cache of scheme
// maps, so that repeated conversions between the same pair of schemes build
// the map only once.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::trace;

use crate::error::Result;
use crate::registry::Registry;
use crate::scheme::Scheme;
use crate::scheme_map::SchemeMap;
use crate::transducer::Options;
use crate::Config;

const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(size) => size,
    None => unreachable!(),
};

type MapCache = LruCache<(String, String), Arc<SchemeMap>>;

/// Transliterate `text` with a map built by the caller, bypassing any cache.
pub fn transliterate_with_map(text: &str, map: &SchemeMap, options: &Options) -> String {
    let input = map.prepare_input(text);
    let output = map.from_kind().transduce(map, &input, options);
    map.finish_output(output)
}

/// Converts text between the schemes of a [`Registry`].
///
/// Safe to share between threads: the registry is read-only and the scheme
/// map cache sits behind a mutex. The lock is held while a missing map is
/// built, so concurrent first requests for a pair build it once.
///
/// # Example
/// ```
/// use sanscript_core::{Registry, Transliterator};
///
/// let registry = Registry::from_sources([
///     r#"
///     name = "roman"
///     kind = "roman"
///     vowels = ["a", "A"]
///     virama = [""]
///     consonants = ["k", "n", "r"]
///     "#,
///     r#"
///     name = "deva"
///     kind = "brahmic"
///     vowels = ["अ", "आ"]
///     vowel_marks = ["ा"]
///     virama = ["्"]
///     consonants = ["क", "न", "र"]
///     "#,
/// ]).unwrap();
///
/// let engine = Transliterator::new(registry);
/// assert_eq!(engine.transliterate("nara", "roman", "deva").unwrap(), "नर");
/// assert_eq!(engine.transliterate("नर", "deva", "roman").unwrap(), "nara");
/// ```
#[derive(Debug)]
pub struct Transliterator {
    registry: Registry,
    options: Options,
    cache: Mutex<MapCache>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl Transliterator {
    /// Engine with default options and a cache of 16 scheme maps.
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, &Config::default())
    }

    pub fn with_config(registry: Registry, config: &Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size).unwrap_or(DEFAULT_CACHE_SIZE);
        Self {
            registry,
            options: config.options(),
            cache: Mutex::new(LruCache::new(capacity)),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Options used by [`transliterate`](Self::transliterate).
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn scheme(&self, name: &str) -> Result<Arc<Scheme>> {
        self.registry.get(name)
    }

    /// The map from `from` to `to`, built on first use and cached.
    pub fn scheme_map(&self, from: &str, to: &str) -> Result<Arc<SchemeMap>> {
        // Unknown names fail before touching the cache.
        let from_scheme = self.registry.get(from)?;
        let to_scheme = self.registry.get(to)?;

        let key = (from.to_string(), to.to_string());
        let mut cache = self.lock_cache();
        if let Some(map) = cache.get(&key) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            trace!(from, to, "scheme map cache hit");
            return Ok(Arc::clone(map));
        }

        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        trace!(from, to, "scheme map cache miss");
        let map = Arc::new(SchemeMap::new(&from_scheme, &to_scheme)?);
        cache.put(key, Arc::clone(&map));
        Ok(map)
    }

    /// Transliterate with the engine's options.
    pub fn transliterate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        self.transliterate_with(text, from, to, &self.options)
    }

    /// Transliterate with per-call options.
    pub fn transliterate_with(
        &self,
        text: &str,
        from: &str,
        to: &str,
        options: &Options,
    ) -> Result<String> {
        let map = self.scheme_map(from, to)?;
        Ok(transliterate_with_map(text, &map, options))
    }

    /// Canonical spelling of `text` in `scheme`: a round trip through
    /// `pivot` folds alternate spellings into the canonical ones.
    pub fn standard_form(&self, text: &str, scheme: &str, pivot: &str) -> Result<String> {
        let options = Options::none();
        let pivoted = self.transliterate_with(text, scheme, pivot, &options)?;
        self.transliterate_with(&pivoted, pivot, scheme, &options)
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Hit rate in percent, or `None` before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.lock_cache().cap().get()
    }

    /// Drop every cached map and reset the statistics.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }

    /// The cache only ever holds fully built maps; a poisoned lock is safe
    /// to reuse.
    fn lock_cache(&self) -> MutexGuard<'_, MapCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROMAN: &str = r#"
        name = "roman"
        kind = "roman"
        vowels = ["a", "A", "i"]
        virama = [""]
        consonants = ["k", "n", "r", "t"]
        [alternates]
        "A" = ["aa"]
    "#;

    const DEVA: &str = r#"
        name = "deva"
        kind = "brahmic"
        vowels = ["अ", "आ", "इ"]
        vowel_marks = ["ा", "ि"]
        virama = ["्"]
        consonants = ["क", "न", "र", "त"]
    "#;

    fn engine(max_cache_size: usize) -> Transliterator {
        let registry = Registry::from_sources([ROMAN, DEVA]).unwrap();
        let config = Config {
            max_cache_size,
            ..Config::default()
        };
        Transliterator::with_config(registry, &config)
    }

    #[test]
    fn maps_are_cached_per_pair() {
        let engine = engine(16);
        engine.transliterate("nara", "roman", "deva").unwrap();
        engine.transliterate("iti", "roman", "deva").unwrap();
        engine.transliterate("नर", "deva", "roman").unwrap();
        assert_eq!(engine.cache_stats(), (1, 2));
        assert_eq!(engine.cache_size(), 2);

        let first = engine.scheme_map("roman", "deva").unwrap();
        let second = engine.scheme_map("roman", "deva").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_is_bounded() {
        let engine = engine(1);
        engine.scheme_map("roman", "deva").unwrap();
        engine.scheme_map("deva", "roman").unwrap();
        assert_eq!(engine.cache_capacity(), 1);
        assert_eq!(engine.cache_size(), 1);
        engine.scheme_map("roman", "deva").unwrap();
        assert_eq!(engine.cache_stats(), (0, 3));
    }

    #[test]
    fn zero_capacity_falls_back_to_default() {
        assert_eq!(engine(0).cache_capacity(), 16);
    }

    #[test]
    fn clear_resets_statistics() {
        let engine = engine(16);
        assert_eq!(engine.cache_hit_rate(), None);
        engine.scheme_map("roman", "deva").unwrap();
        engine.scheme_map("roman", "deva").unwrap();
        assert_eq!(engine.cache_hit_rate(), Some(50.0));
        engine.clear_cache();
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.cache_stats(), (0, 0));
    }

    #[test]
    fn unknown_scheme_is_not_a_cache_miss() {
        let engine = engine(16);
        assert!(engine.transliterate("a", "roman", "nope").is_err());
        assert_eq!(engine.cache_stats(), (0, 0));
    }

    #[test]
    fn standard_form_folds_alternates() {
        let engine = engine(16);
        assert_eq!(engine.standard_form("naaraa", "roman", "deva").unwrap(), "nArA");
    }

    #[test]
    fn options_per_call() {
        let engine = engine(16);
        assert_eq!(engine.transliterate("ka##ka##", "roman", "deva").unwrap(), "कka");
        assert_eq!(
            engine
                .transliterate_with("ka##ka##", "roman", "deva", &Options::none())
                .unwrap(),
            "क##क##"
        );
    }

    #[test]
    fn shared_between_threads() {
        let engine = Arc::new(engine(16));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.transliterate("tatra", "roman", "deva").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "तत्र");
        }
        assert_eq!(engine.cache_size(), 1);
        assert_eq!(engine.cache_stats().1, 1);
    }
}
