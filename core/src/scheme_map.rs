// core/src/scheme_map.rs
//
// Cross-scheme index: every source spelling (canonical or alternate) mapped
// to the destination grapheme in the same position.

use ahash::AHashMap;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::orthography::Orthography;
use crate::scheme::{Category, Scheme, ScriptKind};

/// Source spelling → destination spelling.
pub type Table = AHashMap<String, String>;

/// Which tables a category feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Marks,
    Virama,
    Other { consonant: bool, vowel: bool },
}

impl Route {
    /// Categories are routed by name so that extension categories such as
    /// `vedic_marks` or `tamil_consonants` behave like the built-in ones.
    fn of(category: &str) -> Route {
        if category.ends_with("marks") {
            Route::Marks
        } else if category == "virama" {
            Route::Virama
        } else {
            Route::Other {
                consonant: category.ends_with("consonants"),
                vowel: category.ends_with("vowels"),
            }
        }
    }
}

/// Swap of adjacent yogavaaha and accent glyphs between the Brahmic order
/// (`yogavaaha accent`) and the Roman one (`accent yogavaaha`).
#[derive(Debug, Clone)]
struct AccentSwap(Regex);

impl AccentSwap {
    fn new(scheme: &Scheme, first: &[String], second: &[String]) -> Result<Option<Self>> {
        let (Some(first), Some(second)) = (alternation(first), alternation(second)) else {
            return Ok(None);
        };
        let pattern = format!("({first})({second})");
        let regex = Regex::new(&pattern).map_err(|e| {
            Error::script_data(scheme.name(), format!("accent reorder pattern: {e}"))
        })?;
        Ok(Some(AccentSwap(regex)))
    }

    fn apply(&self, text: &str) -> String {
        self.0.replace_all(text, "${2}${1}").into_owned()
    }
}

/// Split of precomposed accented vowels (`í`) into the vowel and accent
/// graphemes the source scheme defines (`i` + U+0301).
#[derive(Debug, Clone)]
struct AccentSplit {
    regex: Regex,
    separate: AHashMap<String, String>,
}

impl AccentSplit {
    fn new(scheme: &Scheme) -> Result<Option<Self>> {
        let pairs = scheme.accented_vowels();
        let composed: Vec<String> = pairs.iter().map(|(c, _)| c.clone()).collect();
        let Some(pattern) = alternation(&composed) else {
            return Ok(None);
        };
        let regex = Regex::new(&pattern).map_err(|e| {
            Error::script_data(scheme.name(), format!("accented vowel pattern: {e}"))
        })?;
        let separate = pairs.iter().cloned().collect();
        Ok(Some(AccentSplit { regex, separate }))
    }

    fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let composed = &caps[0];
                self.separate
                    .get(composed)
                    .cloned()
                    .unwrap_or_else(|| composed.to_string())
            })
            .into_owned()
    }
}

/// Regex alternation of the non-empty graphemes, longest first.
fn alternation(graphemes: &[String]) -> Option<String> {
    let mut parts: Vec<&str> = graphemes
        .iter()
        .map(String::as_str)
        .filter(|g| !g.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    parts.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    Some(
        parts
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

/// Lookup tables for one (source, destination) pair of schemes.
///
/// A map is read-only once built and is shared between threads behind an
/// `Arc` by the [`Transliterator`](crate::Transliterator) cache.
#[derive(Debug, Clone)]
pub struct SchemeMap {
    from: String,
    to: String,
    from_kind: ScriptKind,
    to_kind: ScriptKind,
    pub(crate) vowels: Table,
    pub(crate) vowel_marks: Table,
    pub(crate) virama: Table,
    pub(crate) consonants: Table,
    pub(crate) other: Table,
    max_key_length: usize,
    pub(crate) to_virama: String,
    pub(crate) implicit_vowel: String,
    accent_before_decode: Option<AccentSwap>,
    accent_after_encode: Option<AccentSwap>,
    accented_vowels: Option<AccentSplit>,
    source_orthography: Option<Orthography>,
    target_orthography: Option<Orthography>,
}

impl SchemeMap {
    /// Build the map for transliterating `from` into `to`.
    ///
    /// Graphemes are paired by position within each category both schemes
    /// define. When a source key occurs twice the first pairing is kept, and
    /// canonical spellings always take precedence over alternates.
    ///
    /// # Example
    /// ```
    /// use sanscript_core::{Scheme, SchemeMap};
    ///
    /// let roman = Scheme::from_toml_str(r#"
    ///     name = "r"
    ///     kind = "roman"
    ///     vowels = ["a", "A"]
    ///     virama = [""]
    ///     consonants = ["k"]
    /// "#).unwrap();
    /// let brahmic = Scheme::from_toml_str(r#"
    ///     name = "b"
    ///     kind = "brahmic"
    ///     vowels = ["अ", "आ"]
    ///     vowel_marks = ["ा"]
    ///     virama = ["्"]
    ///     consonants = ["क"]
    /// "#).unwrap();
    ///
    /// let map = SchemeMap::new(&roman, &brahmic).unwrap();
    /// assert_eq!(map.consonant("k"), Some("क"));
    /// assert_eq!(map.vowel_mark("A"), Some("ा"));
    /// assert_eq!(map.max_key_length(), 1);
    /// ```
    pub fn new(from: &Scheme, to: &Scheme) -> Result<Self> {
        let mut map = SchemeMap {
            from: from.name().to_string(),
            to: to.name().to_string(),
            from_kind: from.kind(),
            to_kind: to.kind(),
            vowels: Table::new(),
            vowel_marks: Table::new(),
            virama: Table::new(),
            consonants: Table::new(),
            other: Table::new(),
            max_key_length: 0,
            to_virama: to.virama().to_string(),
            implicit_vowel: to.implicit_vowel().to_string(),
            accent_before_decode: None,
            accent_after_encode: None,
            accented_vowels: AccentSplit::new(from)?,
            source_orthography: from.orthography(),
            target_orthography: to.orthography(),
        };

        let pairs = paired_categories(from, to);
        for (route, source, target) in &pairs {
            for (key, value) in source.iter().zip(target.iter()) {
                map.insert(*route, key, value);
            }
        }
        for (route, source, target) in &pairs {
            for (key, value) in source.iter().zip(target.iter()) {
                if key.is_empty() {
                    continue;
                }
                for alternate in from.alternates_of(key) {
                    map.insert(*route, alternate, value);
                }
            }
        }

        map.expand_source_shorthand(from)?;
        map.compact_target_shorthand(from, to)?;

        map.max_key_length = [&map.vowels, &map.vowel_marks, &map.virama, &map.other]
            .into_iter()
            .flat_map(|table| table.keys())
            .map(|key| key.chars().count())
            .max()
            .unwrap_or(0);

        let from_accents = from.graphemes(Category::Accents);
        let to_accents = to.graphemes(Category::Accents);
        if !from_accents.is_empty() && !to_accents.is_empty() {
            match (from.kind(), to.kind()) {
                (ScriptKind::Brahmic, ScriptKind::Roman) => {
                    map.accent_before_decode =
                        AccentSwap::new(from, from.graphemes(Category::Yogavaahas), from_accents)?;
                }
                (ScriptKind::Roman, ScriptKind::Brahmic) => {
                    map.accent_after_encode =
                        AccentSwap::new(to, to_accents, to.graphemes(Category::Yogavaahas))?;
                }
                _ => {}
            }
        }

        debug!(
            from = %map.from,
            to = %map.to,
            vowels = map.vowels.len(),
            vowel_marks = map.vowel_marks.len(),
            consonants = map.consonants.len(),
            other = map.other.len(),
            max_key_length = map.max_key_length,
            "built scheme map"
        );
        Ok(map)
    }

    fn insert(&mut self, route: Route, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        let tables: [Option<&mut Table>; 3] = match route {
            Route::Marks => [Some(&mut self.vowel_marks), None, None],
            Route::Virama => [Some(&mut self.virama), None, None],
            Route::Other { consonant, vowel } => [
                Some(&mut self.other),
                consonant.then_some(&mut self.consonants),
                vowel.then_some(&mut self.vowels),
            ],
        };
        for table in tables.into_iter().flatten() {
            table
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    /// Source writes nasal + stop in condensed form (OPTITRANS `nk`): accept
    /// the condensed spelling, and its variants through alternates of the
    /// stop, as nasal + virama + stop.
    fn expand_source_shorthand(&mut self, from: &Scheme) -> Result<()> {
        let Some(shorthand) = from.nasal_shorthand() else {
            return Ok(());
        };
        for (nasal, stop) in &shorthand.clusters {
            let (Some(nasal_out), Some(stop_out)) =
                (self.consonants.get(nasal), self.consonants.get(stop))
            else {
                return Err(Error::script_data(
                    from.name(),
                    format!("`{nasal}{stop}` has no counterpart in `{}`", self.to),
                ));
            };
            let value = format!("{nasal_out}{}{stop_out}", self.to_virama);
            let spellings = std::iter::once(stop).chain(from.alternates_of(stop));
            for spelling in spellings {
                let key = format!("{}{spelling}", shorthand.lead);
                self.consonants
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
                self.other.entry(key).or_insert_with(|| value.clone());
            }
        }
        Ok(())
    }

    /// Destination writes nasal + stop in condensed form: map the source's
    /// nasal + virama + stop to the condensed spelling.
    fn compact_target_shorthand(&mut self, from: &Scheme, to: &Scheme) -> Result<()> {
        let Some(shorthand) = to.nasal_shorthand() else {
            return Ok(());
        };
        let to_consonants = to.graphemes(Category::Consonants);
        let from_consonants = from.graphemes(Category::Consonants);
        let counterpart = |grapheme: &str| -> Result<&str> {
            to_consonants
                .iter()
                .position(|c| c == grapheme)
                .and_then(|index| from_consonants.get(index))
                .map(String::as_str)
                .ok_or_else(|| {
                    Error::script_data(
                        from.name(),
                        format!("no counterpart for `{grapheme}` of `{}`", to.name()),
                    )
                })
        };
        for (nasal, stop) in &shorthand.clusters {
            let key = format!("{}{}{}", counterpart(nasal)?, from.virama(), counterpart(stop)?);
            let value = format!("{}{stop}", shorthand.lead);
            self.consonants
                .entry(key.clone())
                .or_insert_with(|| value.clone());
            self.other.entry(key).or_insert(value);
        }
        Ok(())
    }

    pub fn from_name(&self) -> &str {
        &self.from
    }

    pub fn to_name(&self) -> &str {
        &self.to
    }

    pub fn from_kind(&self) -> ScriptKind {
        self.from_kind
    }

    pub fn to_kind(&self) -> ScriptKind {
        self.to_kind
    }

    pub fn to_roman(&self) -> bool {
        self.to_kind == ScriptKind::Roman
    }

    /// Longest key of the vowel, mark, virama and other tables, in chars.
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    pub fn vowel(&self, key: &str) -> Option<&str> {
        self.vowels.get(key).map(String::as_str)
    }

    pub fn vowel_mark(&self, key: &str) -> Option<&str> {
        self.vowel_marks.get(key).map(String::as_str)
    }

    pub fn consonant(&self, key: &str) -> Option<&str> {
        self.consonants.get(key).map(String::as_str)
    }

    /// Any mapped grapheme other than vowel marks and the virama.
    pub fn other(&self, key: &str) -> Option<&str> {
        self.other.get(key).map(String::as_str)
    }

    pub fn virama_of(&self, key: &str) -> Option<&str> {
        self.virama.get(key).map(String::as_str)
    }

    pub(crate) fn prepare_input(&self, text: &str) -> String {
        let text = match &self.accented_vowels {
            Some(split) => split.apply(text),
            None => text.to_string(),
        };
        let text = match self.source_orthography {
            Some(pass) => pass.before_decode(&text),
            None => text,
        };
        match &self.accent_before_decode {
            Some(swap) => swap.apply(&text),
            None => text,
        }
    }

    pub(crate) fn finish_output(&self, text: String) -> String {
        let text = match &self.accent_after_encode {
            Some(swap) => swap.apply(&text),
            None => text,
        };
        match self.target_orthography {
            Some(pass) => pass.after_encode(&text),
            None => text,
        }
    }
}

/// Every category (built-in and extension) defined by both schemes, with
/// its route.
fn paired_categories<'a>(from: &'a Scheme, to: &'a Scheme) -> Vec<(Route, &'a [String], &'a [String])> {
    let mut pairs: Vec<(Route, &[String], &[String])> = Category::ALL
        .iter()
        .map(|&category| {
            (
                Route::of(category.as_str()),
                from.graphemes(category),
                to.graphemes(category),
            )
        })
        .collect();
    for (name, source) in from.extensions() {
        if let Some(target) = to.extension(name) {
            pairs.push((Route::of(name), source, target));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn routes_by_category_name() {
        assert_eq!(Route::of("vowel_marks"), Route::Marks);
        assert_eq!(Route::of("virama"), Route::Virama);
        assert_eq!(
            Route::of("extra_consonants"),
            Route::Other {
                consonant: true,
                vowel: false
            }
        );
        assert_eq!(
            Route::of("symbols"),
            Route::Other {
                consonant: false,
                vowel: false
            }
        );
    }

    #[test]
    fn roman_to_brahmic_tables() {
        let map = SchemeMap::new(&testutil::hk(), &testutil::devanagari()).unwrap();
        assert_eq!(map.vowel("A"), Some("आ"));
        assert_eq!(map.vowel_mark("A"), Some("\u{093E}"));
        assert_eq!(map.consonant("kS"), Some("क्ष"));
        assert_eq!(map.other("||"), Some("॥"));
        assert_eq!(map.virama_of(""), None);
        assert_eq!(map.max_key_length(), 3);
    }

    #[test]
    fn alternates_are_source_only() {
        let itrans = testutil::itrans();
        let dev = testutil::devanagari();
        let forward = SchemeMap::new(&itrans, &dev).unwrap();
        assert_eq!(forward.vowel("aa"), Some("आ"));
        assert_eq!(forward.consonant("x"), Some("क्ष"));

        let backward = SchemeMap::new(&dev, &itrans).unwrap();
        assert_eq!(backward.vowel("आ"), Some("A"));
        assert_eq!(backward.consonant("\u{0958}"), Some("q"));
    }

    #[test]
    fn canonical_keys_beat_alternates() {
        // OPTITRANS lists `c` as an alternate of `ch`, while `c` never
        // occurs canonically; `R` is canonical and must not be overridden.
        let map = SchemeMap::new(&testutil::optitrans(), &testutil::itrans()).unwrap();
        assert_eq!(map.vowel("R"), Some("RRi"));
        assert_eq!(map.consonant("c"), Some("ch"));
    }

    #[test]
    fn source_shorthand_is_expanded() {
        let map = SchemeMap::new(&testutil::optitrans(), &testutil::devanagari()).unwrap();
        assert_eq!(map.consonant("nk"), Some("ङ्क"));
        assert_eq!(map.consonant("nj"), Some("ञ्ज"));
        // `c` is an alternate of `ch`.
        assert_eq!(map.consonant("nc"), Some("ञ्च"));
    }

    #[test]
    fn target_shorthand_is_compacted() {
        let map = SchemeMap::new(&testutil::devanagari(), &testutil::optitrans()).unwrap();
        assert_eq!(map.other("ङ्क"), Some("nk"));
        assert_eq!(map.consonant("ञ्ज"), Some("nj"));
    }

    #[test]
    fn accent_swap_only_between_kinds_with_accents() {
        let dev = testutil::devanagari();
        let iast = testutil::iast();
        let decode = SchemeMap::new(&dev, &iast).unwrap();
        assert_eq!(decode.prepare_input("तं॑"), "त॑ं");
        let encode = SchemeMap::new(&iast, &dev).unwrap();
        assert_eq!(encode.finish_output("त॑ं".to_string()), "तं॑");

        // HK defines no accents.
        let plain = SchemeMap::new(&dev, &testutil::hk()).unwrap();
        assert_eq!(plain.prepare_input("तं॑"), "तं॑");
    }

    #[test]
    fn precomposed_accented_vowels_are_split() {
        let map = SchemeMap::new(&testutil::iast(), &testutil::devanagari()).unwrap();
        assert_eq!(map.prepare_input("agn\u{00ED}\u{1E43}"), "agni\u{0301}\u{1E43}");
        assert_eq!(map.prepare_input("\u{00C9}"), "E\u{0301}");
        // No precomposed letter exists here; input is left alone.
        assert_eq!(map.prepare_input("a\u{0331}"), "a\u{0331}");
    }

    #[test]
    fn builds_are_deterministic() {
        let a = SchemeMap::new(&testutil::itrans(), &testutil::devanagari()).unwrap();
        let b = SchemeMap::new(&testutil::itrans(), &testutil::devanagari()).unwrap();
        assert_eq!(a.other, b.other);
        assert_eq!(a.vowel_marks, b.vowel_marks);
        assert_eq!(a.max_key_length(), b.max_key_length());
    }

    #[test]
    fn missing_shorthand_counterpart_is_an_error() {
        let tiny = Scheme::from_toml_str(
            r#"
            name = "tiny"
            kind = "brahmic"
            vowels = ["अ"]
            virama = ["्"]
            consonants = ["क"]
            "#,
        )
        .unwrap();
        let err = SchemeMap::new(&testutil::optitrans(), &tiny).unwrap_err();
        assert!(matches!(err, Error::ScriptData { ref scheme, .. } if scheme == "optitrans"));
    }
}
