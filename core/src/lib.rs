//! sanscript-core
//!
//! Scheme model, scheme maps, transducers and orthographic passes for
//! transliterating Sanskrit between Brahmic scripts and Roman schemes.
//!
//! Scheme data itself lives outside this crate; the `sanscript` crate ships
//! the built-in schemes and a ready-made engine.
//!
//! Public API:
//! - `Scheme` - One writing system: ordered grapheme lists per category
//! - `Registry` - Schemes by name
//! - `SchemeMap` - Source → destination lookup tables for one pair
//! - `Transliterator` - Registry plus a bounded cache of scheme maps
//! - `Options` - Toggle and suspend characters for Roman input
//! - `Config` - Cache size and default options, loadable from TOML
//! - syllable, accent and anusvara passes working on scheme text
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod trie;
pub use trie::{GraphemeTrie, Slot, Token};

pub mod orthography;
pub use orthography::Orthography;

pub mod scheme;
pub use scheme::{slots, Category, NasalShorthand, Scheme, SchemeDefinition, ScriptKind, Varga};

pub mod registry;
pub use registry::Registry;

pub mod scheme_map;
pub use scheme_map::SchemeMap;

pub mod transducer;
pub use transducer::Options;

pub mod engine;
pub use engine::{transliterate_with_map, Transliterator};

pub mod syllable;
pub use syllable::{do_vyanjana_svara_join, join_syllables, split_syllables};

pub mod accent;
pub use accent::{
    add_accent_to_end, add_accent_to_previous_syllable, set_diirgha_svaritas, to_shatapatha_svara,
    to_us_accents, UsAccents,
};

pub mod anusvara;
pub use anusvara::{fix_lazy_anusvaara, fix_lazy_visarga, force_lazy_anusvaara, LazyAnusvaraOptions};

#[cfg(test)]
pub(crate) mod testutil;

/// Engine configuration.
///
/// Scheme data is not part of the configuration; see `SanscriptConfig` in
/// the `sanscript` crate for extra scheme files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of scheme maps kept in the engine cache
    pub max_cache_size: usize,

    /// Tokens that switch transliteration off and back on in Roman input
    pub togglers: Vec<String>,
    /// Characters that suspend transliteration (kept in the output)
    pub suspend_on: Vec<char>,
    /// Characters that resume it
    pub suspend_off: Vec<char>,
}

impl Default for Config {
    fn default() -> Self {
        let options = Options::default();
        Self {
            max_cache_size: 16,
            togglers: options.togglers.into_iter().collect(),
            suspend_on: options.suspend_on.into_iter().collect(),
            suspend_off: options.suspend_off.into_iter().collect(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Load configuration from TOML string. Missing keys take their defaults.
    ///
    /// # Example
    /// ```
    /// # use sanscript_core::Config;
    /// let config = Config::from_toml_str("max_cache_size = 4").unwrap();
    /// assert_eq!(config.max_cache_size, 4);
    /// assert_eq!(config.togglers, ["##"]);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Transliteration options described by this configuration.
    pub fn options(&self) -> Options {
        Options {
            togglers: self.togglers.iter().cloned().collect(),
            suspend_on: self.suspend_on.iter().copied().collect(),
            suspend_off: self.suspend_off.iter().copied().collect(),
        }
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// Canonical composition (NFC).
    pub fn nfc(s: &str) -> String {
        s.nfc().collect()
    }

    /// Canonical decomposition (NFD).
    pub fn nfd(s: &str) -> String {
        s.nfd().collect()
    }

    /// Upper-case the first character: `ṛ` → `Ṛ`, `kh` → `Kh`.
    pub fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
