// core/src/scheme.rs
//
// The scheme model: one ordered grapheme list per category, plus synonym
// spellings. Lists are positional, so vowel N of one scheme corresponds to
// vowel N of every other scheme, vowel mark N to vowel N + 1, and so on.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::orthography::Orthography;
use crate::trie::{GraphemeTrie, Slot, Token};
use crate::utils;

/// Grapheme categories every scheme may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Vowels,
    VowelMarks,
    Virama,
    Yogavaahas,
    Consonants,
    ExtraConsonants,
    Symbols,
    Accents,
}

impl Category {
    /// All categories, in the order scheme maps are populated.
    pub const ALL: [Category; 8] = [
        Category::Vowels,
        Category::VowelMarks,
        Category::Virama,
        Category::Yogavaahas,
        Category::Consonants,
        Category::ExtraConsonants,
        Category::Symbols,
        Category::Accents,
    ];

    /// Precedence used when two categories spell a grapheme identically.
    /// Roman schemes spell vowels and vowel marks the same way; the vowel wins.
    pub(crate) const TOKEN_ORDER: [Category; 8] = [
        Category::Vowels,
        Category::Consonants,
        Category::ExtraConsonants,
        Category::Yogavaahas,
        Category::Virama,
        Category::VowelMarks,
        Category::Accents,
        Category::Symbols,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vowels => "vowels",
            Category::VowelMarks => "vowel_marks",
            Category::Virama => "virama",
            Category::Yogavaahas => "yogavaahas",
            Category::Consonants => "consonants",
            Category::ExtraConsonants => "extra_consonants",
            Category::Symbols => "symbols",
            Category::Accents => "accents",
        }
    }

    pub fn is_consonant(self) -> bool {
        matches!(self, Category::Consonants | Category::ExtraConsonants)
    }
}

/// Whether a scheme writes with the Latin alphabet or with an abugida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Roman,
    Brahmic,
}

/// Place of articulation of a stop consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Varga {
    Velar,
    Palatal,
    Retroflex,
    Dental,
    Labial,
}

impl Varga {
    /// The varga of the consonant at `index` of the `consonants` list.
    ///
    /// The five vargas occupy slots 0..25. The conjuncts kṣa and jña are
    /// classed by their first member.
    pub fn of_consonant(index: usize) -> Option<Varga> {
        match index {
            0..=4 | slots::KSA => Some(Varga::Velar),
            5..=9 | slots::JNA => Some(Varga::Palatal),
            10..=14 => Some(Varga::Retroflex),
            15..=19 => Some(Varga::Dental),
            20..=24 => Some(Varga::Labial),
            _ => None,
        }
    }

    /// Slot of the nasal closing this varga.
    pub fn nasal_index(self) -> usize {
        let row = match self {
            Varga::Velar => 0,
            Varga::Palatal => 1,
            Varga::Retroflex => 2,
            Varga::Dental => 3,
            Varga::Labial => 4,
        };
        row * 5 + 4
    }
}

/// Well-known positions inside the category lists.
pub mod slots {
    pub const ANUSVARA: usize = 0;
    pub const VISARGA: usize = 1;
    pub const CANDRABINDU: usize = 2;
    pub const JIHVAMULIYA: usize = 3;
    pub const UPADHMANIYA: usize = 4;

    pub const YA: usize = 25;
    pub const LA: usize = 27;
    pub const VA: usize = 28;
    pub const SA: usize = 31;
    pub const KSA: usize = 34;
    pub const JNA: usize = 35;

    pub const OM: usize = 0;
    pub const AVAGRAHA: usize = 1;
    pub const DANDA: usize = 2;
    pub const DOUBLE_DANDA: usize = 3;
    pub const DIGITS: usize = 4;

    /// ā ī ū ṝ ḹ e ai o au
    pub const LONG_VOWELS: [usize; 9] = [1, 3, 5, 7, 9, 10, 11, 12, 13];
}

/// Condensed nasal + stop spellings, e.g. OPTITRANS `nk` for `~N` + `k`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NasalShorthand {
    /// Letter that replaces the nasal (`n`).
    pub lead: String,
    /// (nasal, stop) pairs of canonical consonants the shorthand covers.
    pub clusters: Vec<(String, String)>,
}

/// Serialized form of a scheme, as written in the TOML data files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemeDefinition {
    pub name: String,
    pub kind: ScriptKind,
    #[serde(default)]
    pub vowels: Vec<String>,
    /// Roman schemes may omit this; it is then `vowels[1..]`.
    #[serde(default)]
    pub vowel_marks: Vec<String>,
    #[serde(default)]
    pub virama: Vec<String>,
    #[serde(default)]
    pub yogavaahas: Vec<String>,
    #[serde(default)]
    pub consonants: Vec<String>,
    #[serde(default)]
    pub extra_consonants: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub accents: Vec<String>,
    /// Accept Capitalized and UPPERCASE spellings on input.
    #[serde(default)]
    pub capitalizable: bool,
    #[serde(default)]
    pub orthography: Option<Orthography>,
    #[serde(default)]
    pub alternates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub nasal_shorthand: Option<NasalShorthand>,
    /// Open-ended categories. Names ending in `marks`, `consonants` or
    /// `vowels` are routed like the built-in categories of that kind.
    #[serde(default)]
    pub extensions: BTreeMap<String, Vec<String>>,
}

/// An immutable transliteration scheme.
///
/// Schemes are loaded once, validated, and then shared read-only (usually
/// behind an `Arc` inside a [`Registry`](crate::Registry)).
///
/// # Example
/// ```
/// use sanscript_core::{Category, Scheme};
///
/// let scheme = Scheme::from_toml_str(r#"
///     name = "mini"
///     kind = "roman"
///     vowels = ["a", "A", "i"]
///     virama = [""]
///     consonants = ["k", "kh"]
/// "#).unwrap();
///
/// assert!(scheme.is_roman());
/// // Roman vowel marks default to the vowels after the implicit one.
/// assert_eq!(scheme.graphemes(Category::VowelMarks), ["A", "i"]);
/// ```
#[derive(Debug)]
pub struct Scheme {
    name: String,
    kind: ScriptKind,
    vowels: Vec<String>,
    vowel_marks: Vec<String>,
    virama: Vec<String>,
    yogavaahas: Vec<String>,
    consonants: Vec<String>,
    extra_consonants: Vec<String>,
    symbols: Vec<String>,
    accents: Vec<String>,
    extensions: BTreeMap<String, Vec<String>>,
    alternates: BTreeMap<String, Vec<String>>,
    accented_vowels: Vec<(String, String)>,
    nasal_shorthand: Option<NasalShorthand>,
    orthography: Option<Orthography>,
    trie: GraphemeTrie,
}

impl Scheme {
    /// Parse and validate a scheme from its TOML definition.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let def: SchemeDefinition = toml::from_str(content)?;
        Self::from_definition(def)
    }

    /// Validate a definition and build the scheme.
    ///
    /// Graphemes are stored in NFC. A spelling changed by normalization is
    /// kept as an alternate, as is the decomposed (NFD) form of every
    /// grapheme, so that input in either form is recognized.
    pub fn from_definition(def: SchemeDefinition) -> Result<Self> {
        let name = def.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::script_data("", "scheme name is empty"));
        }
        if def.vowels.is_empty() {
            return Err(Error::script_data(&name, "no vowels defined"));
        }
        if def.virama.len() != 1 {
            return Err(Error::script_data(
                &name,
                format!("expected exactly one virama entry, found {}", def.virama.len()),
            ));
        }

        let mut spellings: Vec<(String, String)> = Vec::new();
        let mut normalize = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|raw| {
                    let nfc = utils::nfc(&raw);
                    if raw != nfc {
                        spellings.push((nfc.clone(), raw));
                    }
                    let nfd = utils::nfd(&nfc);
                    if nfd != nfc {
                        spellings.push((nfc.clone(), nfd));
                    }
                    nfc
                })
                .collect()
        };

        let vowels = normalize(def.vowels);
        let mut vowel_marks = normalize(def.vowel_marks);
        let virama = normalize(def.virama);
        let yogavaahas = normalize(def.yogavaahas);
        let consonants = normalize(def.consonants);
        let extra_consonants = normalize(def.extra_consonants);
        let symbols = normalize(def.symbols);
        let accents = normalize(def.accents);
        let extensions: BTreeMap<String, Vec<String>> = def
            .extensions
            .into_iter()
            .map(|(category, list)| (category, normalize(list)))
            .collect();

        if def.kind == ScriptKind::Roman && vowel_marks.is_empty() {
            vowel_marks = vowels[1..].to_vec();
        }
        if vowel_marks.len() + 1 != vowels.len() {
            return Err(Error::script_data(
                &name,
                format!(
                    "{} vowels need {} vowel marks, found {}",
                    vowels.len(),
                    vowels.len() - 1,
                    vowel_marks.len()
                ),
            ));
        }

        if let Some(shorthand) = &def.nasal_shorthand {
            for (nasal, stop) in &shorthand.clusters {
                for part in [nasal, stop] {
                    if !consonants.iter().any(|c| c == part) {
                        return Err(Error::script_data(
                            &name,
                            format!("nasal shorthand names `{part}`, which is not a consonant"),
                        ));
                    }
                }
            }
        }

        let mut scheme = Scheme {
            name,
            kind: def.kind,
            vowels,
            vowel_marks,
            virama,
            yogavaahas,
            consonants,
            extra_consonants,
            symbols,
            accents,
            extensions,
            alternates: BTreeMap::new(),
            accented_vowels: Vec::new(),
            nasal_shorthand: def.nasal_shorthand,
            orthography: def.orthography,
            trie: GraphemeTrie::new(),
        };

        scheme.collect_alternates(def.alternates, spellings, def.capitalizable);
        scheme.collect_accented_vowels();
        scheme.build_trie();

        debug!(
            scheme = %scheme.name,
            kind = ?scheme.kind,
            consonants = scheme.consonants.len(),
            alternates = scheme.alternates.len(),
            "loaded scheme"
        );
        Ok(scheme)
    }

    fn collect_alternates(
        &mut self,
        declared: BTreeMap<String, Vec<String>>,
        normalized: Vec<(String, String)>,
        capitalizable: bool,
    ) {
        let canonical: HashSet<String> = Category::ALL
            .iter()
            .flat_map(|&cat| self.graphemes(cat).iter().cloned())
            .collect();
        let mut alternates: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (key, spellings) in &declared {
            let key = utils::nfc(key);
            for spelling in spellings {
                if canonical.contains(spelling.as_str()) {
                    warn!(
                        scheme = %self.name,
                        key = %key,
                        spelling = %spelling,
                        "alternate collides with a canonical grapheme, skipped"
                    );
                    continue;
                }
                push_alternate(&mut alternates, &canonical, &key, spelling);
                push_alternate(&mut alternates, &canonical, &key, &utils::nfc(spelling));
            }
        }
        for (key, spelling) in &normalized {
            push_alternate(&mut alternates, &canonical, key, spelling);
        }

        if capitalizable {
            let letters: Vec<String> = self
                .vowels
                .iter()
                .chain(&self.yogavaahas)
                .chain(&self.consonants)
                .chain(&self.extra_consonants)
                .chain(self.symbols.first())
                .cloned()
                .collect();
            for letter in letters {
                let mut forms = vec![letter.clone()];
                forms.extend(alternates.get(&letter).cloned().unwrap_or_default());
                for form in forms {
                    push_alternate(&mut alternates, &canonical, &letter, &utils::capitalize(&form));
                    push_alternate(&mut alternates, &canonical, &letter, &form.to_uppercase());
                }
            }
        }

        self.alternates = alternates;
    }

    /// Roman vowels that compose with an accent into a precomposed letter
    /// (`i` + U+0301 → `í`). Input is split back into vowel + accent before
    /// tokenizing, since only the separate spellings are graphemes.
    fn collect_accented_vowels(&mut self) {
        if self.kind != ScriptKind::Roman {
            return;
        }
        let mut accented = Vec::new();
        for vowel in &self.vowels {
            let spellings = std::iter::once(vowel).chain(self.alternates_of(vowel));
            for spelling in spellings {
                for accent in self.accents.iter().filter(|a| !a.is_empty()) {
                    let separate = format!("{spelling}{accent}");
                    let composed = utils::nfc(&separate);
                    if composed != separate && !accented.iter().any(|(c, _)| *c == composed) {
                        accented.push((composed, separate));
                    }
                }
            }
        }
        self.accented_vowels = accented;
    }

    fn build_trie(&mut self) {
        let mut trie = GraphemeTrie::new();
        for category in Category::TOKEN_ORDER {
            for (index, grapheme) in self.graphemes(category).iter().enumerate() {
                if grapheme.is_empty() {
                    continue;
                }
                trie.insert(grapheme, Slot { category, index });
            }
        }
        for category in Category::TOKEN_ORDER {
            for (index, grapheme) in self.graphemes(category).iter().enumerate() {
                for alternate in self.alternates_of(grapheme) {
                    trie.insert(alternate, Slot { category, index });
                }
            }
        }
        self.trie = trie;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    pub fn is_roman(&self) -> bool {
        self.kind == ScriptKind::Roman
    }

    /// The ordered grapheme list of a category (possibly empty).
    pub fn graphemes(&self, category: Category) -> &[String] {
        match category {
            Category::Vowels => &self.vowels,
            Category::VowelMarks => &self.vowel_marks,
            Category::Virama => &self.virama,
            Category::Yogavaahas => &self.yogavaahas,
            Category::Consonants => &self.consonants,
            Category::ExtraConsonants => &self.extra_consonants,
            Category::Symbols => &self.symbols,
            Category::Accents => &self.accents,
        }
    }

    /// Grapheme at a slot, if the scheme defines it.
    pub fn grapheme(&self, category: Category, index: usize) -> Option<&str> {
        self.graphemes(category).get(index).map(String::as_str)
    }

    pub fn extension(&self, name: &str) -> Option<&[String]> {
        self.extensions.get(name).map(Vec::as_slice)
    }

    /// Extension categories, sorted by name.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.extensions
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    /// Synonym spellings accepted on input for a canonical grapheme.
    pub fn alternates_of(&self, grapheme: &str) -> &[String] {
        self.alternates
            .get(grapheme)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// (precomposed, vowel + accent) pairs for input normalization. Empty
    /// for Brahmic schemes and Roman schemes without accents.
    pub fn accented_vowels(&self) -> &[(String, String)] {
        &self.accented_vowels
    }

    pub fn virama(&self) -> &str {
        self.virama.first().map(String::as_str).unwrap_or_default()
    }

    /// The inherent vowel (`a`, or the letter `अ` in Brahmic scripts).
    pub fn implicit_vowel(&self) -> &str {
        self.vowels.first().map(String::as_str).unwrap_or_default()
    }

    pub fn nasal_shorthand(&self) -> Option<&NasalShorthand> {
        self.nasal_shorthand.as_ref()
    }

    pub fn orthography(&self) -> Option<Orthography> {
        self.orthography
    }

    /// Slot of a spelling (canonical or alternate), if it is a whole grapheme.
    pub fn lookup(&self, spelling: &str) -> Option<Slot> {
        self.trie.get(spelling)
    }

    /// Longest grapheme at the start of `text`, with its length in bytes.
    pub fn leading(&self, text: &str) -> Option<(usize, Slot)> {
        self.trie.longest_match(text)
    }

    /// Split text into graphemes of this scheme by longest match. Characters
    /// that start no grapheme become single-character tokens without a slot.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        self.trie.tokenize(text)
    }

    /// Length in characters of the longest spelling the scheme accepts.
    pub fn max_grapheme_len(&self) -> usize {
        self.trie.max_depth()
    }

    /// Mark form of an independent vowel. The inherent vowel has an empty mark.
    ///
    /// ```
    /// # use sanscript_core::Scheme;
    /// let scheme = Scheme::from_toml_str(r#"
    ///     name = "tiny"
    ///     kind = "brahmic"
    ///     vowels = ["अ", "आ", "इ"]
    ///     vowel_marks = ["ा", "ि"]
    ///     virama = ["्"]
    /// "#).unwrap();
    /// assert_eq!(scheme.vowel_to_mark("आ"), Some("ा"));
    /// assert_eq!(scheme.vowel_to_mark("अ"), Some(""));
    /// assert_eq!(scheme.vowel_to_mark("क"), None);
    /// ```
    pub fn vowel_to_mark(&self, vowel: &str) -> Option<&str> {
        match self.lookup(vowel)? {
            Slot {
                category: Category::Vowels,
                index: 0,
            } => Some(""),
            Slot {
                category: Category::Vowels,
                index,
            } => self.grapheme(Category::VowelMarks, index - 1),
            _ => None,
        }
    }

    /// Independent vowels paired with their marks, inherent vowel first.
    pub fn vowel_to_mark_map(&self) -> BTreeMap<&str, &str> {
        self.vowels
            .iter()
            .enumerate()
            .filter_map(|(index, vowel)| {
                let mark = if index == 0 {
                    ""
                } else {
                    self.grapheme(Category::VowelMarks, index - 1)?
                };
                Some((vowel.as_str(), mark))
            })
            .collect()
    }

    /// Long vowels and long vowel marks, used to place dīrgha svaritas.
    pub fn long_vowel_graphemes(&self) -> Vec<&str> {
        slots::LONG_VOWELS
            .iter()
            .flat_map(|&index| {
                [
                    self.grapheme(Category::Vowels, index),
                    self.grapheme(Category::VowelMarks, index - 1),
                ]
            })
            .flatten()
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Replace this scheme's digits with ASCII digits.
    pub fn to_ascii_digits(&self, text: &str) -> String {
        let digits = self.symbols.get(slots::DIGITS..).unwrap_or_default();
        let mut out = String::with_capacity(text.len());
        for token in self.tokenize(text) {
            match token.slot {
                Some(Slot {
                    category: Category::Symbols,
                    index,
                }) if index >= slots::DIGITS && index - slots::DIGITS < digits.len().min(10) => {
                    let value = (index - slots::DIGITS) as u32;
                    out.extend(char::from_digit(value, 10));
                }
                _ => out.push_str(token.text),
            }
        }
        out
    }
}

/// Record `spelling` as a synonym of `key` unless it is empty, identical to
/// the key, already known, or itself a canonical grapheme.
fn push_alternate(
    alternates: &mut BTreeMap<String, Vec<String>>,
    canonical: &HashSet<String>,
    key: &str,
    spelling: &str,
) {
    if spelling.is_empty() || spelling == key || canonical.contains(spelling) {
        return;
    }
    let entry = alternates.entry(key.to_string()).or_default();
    if !entry.iter().any(|s| s == spelling) {
        entry.push(spelling.to_string());
    }
}
