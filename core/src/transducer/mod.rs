//! Transducers: the greedy longest-match loops that rewrite text through a
//! [`SchemeMap`].
//!
//! Which loop runs depends only on the kind of the source scheme. Roman input
//! has explicit vowels after every consonant; Brahmic input carries an
//! inherent vowel that must be spelled out when writing Roman.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scheme::ScriptKind;
use crate::scheme_map::SchemeMap;

mod brahmic;
mod roman;

/// Per-call switches for Roman input.
///
/// Text between two togglers, or after a `suspend_on` character up to the
/// next `suspend_off` character, is copied through untouched. Togglers are
/// dropped from the output; suspend characters are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    pub togglers: BTreeSet<String>,
    pub suspend_on: BTreeSet<char>,
    pub suspend_off: BTreeSet<char>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            togglers: BTreeSet::from(["##".to_string()]),
            suspend_on: BTreeSet::from(['<']),
            suspend_off: BTreeSet::from(['>']),
        }
    }
}

impl Options {
    /// Options that never toggle or suspend.
    pub fn none() -> Self {
        Self {
            togglers: BTreeSet::new(),
            suspend_on: BTreeSet::new(),
            suspend_off: BTreeSet::new(),
        }
    }
}

impl ScriptKind {
    /// Run the transducer for input of this kind. `text` must already have
    /// been through the map's input passes.
    pub fn transduce(self, map: &SchemeMap, text: &str, options: &Options) -> String {
        match self {
            ScriptKind::Roman => roman::transduce(text, map, options),
            ScriptKind::Brahmic => brahmic::transduce(text, map),
        }
    }
}

/// Byte offset of every char in `text`, plus `text.len()`, so that the n-th
/// to m-th chars are `&text[bounds[n]..bounds[m]]`.
fn char_bounds(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}
