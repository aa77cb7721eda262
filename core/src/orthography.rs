// core/src/orthography.rs
//
// Script-specific rewrites that run around the transducers. Each pass is a
// pure function of its input and idempotent: running it twice gives the same
// text as running it once.

use phf::{phf_map, phf_set};
use serde::{Deserialize, Serialize};

/// Named pre/post pass attached to a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orthography {
    /// Gurmukhi writes a geminate with the addak (`ੱ`) before the consonant.
    GurmukhiAddak,
    /// Tamil with `²³⁴` after a consonant marking aspirated and voiced stops.
    TamilSuperscripts,
    /// Tamil with `₂₃₄` after a consonant marking aspirated and voiced stops.
    TamilSubscripts,
}

impl Orthography {
    /// Rewrite text written in this scheme into the form the tokenizer reads.
    pub fn before_decode(self, text: &str) -> String {
        match self {
            Orthography::GurmukhiAddak => expand_addak(text),
            Orthography::TamilSuperscripts => digits_before_signs(text, &SUPERSCRIPTS),
            Orthography::TamilSubscripts => digits_before_signs(text, &SUBSCRIPTS),
        }
    }

    /// Rewrite transducer output into the conventional spelling of the scheme.
    pub fn after_encode(self, text: &str) -> String {
        match self {
            Orthography::GurmukhiAddak => text.to_string(),
            Orthography::TamilSuperscripts => digits_after_signs(text, &SUPERSCRIPTS),
            Orthography::TamilSubscripts => digits_after_signs(text, &SUBSCRIPTS),
        }
    }
}

const ADDAK: char = '\u{0A71}';
const GURMUKHI_NUKTA: char = '\u{0A3C}';
const GURMUKHI_VIRAMA: char = '\u{0A4D}';

/// Aspirated stop → its unaspirated partner. The first half of a geminated
/// aspirate is unaspirated (ਕ੍ਖ, not ਖ੍ਖ).
static UNASPIRATED: phf::Map<char, char> = phf_map! {
    'ਖ' => 'ਕ',
    'ਘ' => 'ਗ',
    'ਛ' => 'ਚ',
    'ਝ' => 'ਜ',
    'ਠ' => 'ਟ',
    'ਢ' => 'ਡ',
    'ਥ' => 'ਤ',
    'ਧ' => 'ਦ',
    'ਫ' => 'ਪ',
    'ਭ' => 'ਬ',
};

static SUPERSCRIPTS: phf::Set<char> = phf_set! { '²', '³', '⁴' };
static SUBSCRIPTS: phf::Set<char> = phf_set! { '₂', '₃', '₄' };

fn is_gurmukhi_consonant(ch: char) -> bool {
    matches!(ch, '\u{0A15}'..='\u{0A39}' | '\u{0A59}'..='\u{0A5E}')
}

/// `ੱ` + consonant → (unaspirated) consonant + virama + consonant.
/// An addak before anything else is left alone.
fn expand_addak(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ADDAK {
            if let Some(consonant) = chars.next_if(|&c| is_gurmukhi_consonant(c)) {
                if chars.next_if_eq(&GURMUKHI_NUKTA).is_some() {
                    out.extend([consonant, GURMUKHI_NUKTA, GURMUKHI_VIRAMA, consonant, GURMUKHI_NUKTA]);
                } else {
                    let first = UNASPIRATED.get(&consonant).copied().unwrap_or(consonant);
                    out.extend([first, GURMUKHI_VIRAMA, consonant]);
                }
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Dependent signs a Tamil digit may be written behind: vowel signs, the
/// virama, the au length mark and the vocalic-r/l signs Tamil borrows from
/// Devanagari.
fn is_tamil_sign(ch: char) -> bool {
    matches!(
        ch,
        '\u{0BBE}'..='\u{0BCD}' | '\u{0BD7}' | '\u{0943}' | '\u{0944}' | '\u{0962}' | '\u{0963}'
    )
}

/// `கா²` → `க²ா`: put each digit directly behind its consonant.
fn digits_before_signs(text: &str, digits: &phf::Set<char>) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if !digits.contains(&ch) {
            out.push(ch);
            continue;
        }
        let signs_start = out
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_tamil_sign(c))
            .last()
            .map(|(at, _)| at);
        match signs_start {
            Some(at) => out.insert(at, ch),
            None => out.push(ch),
        }
    }
    out
}

/// `க²ா` → `கா²`: put each digit after the signs that follow it.
fn digits_after_signs(text: &str, digits: &phf::Set<char>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = None;
    for ch in text.chars() {
        if let Some(digit) = pending {
            if is_tamil_sign(ch) {
                out.push(ch);
                continue;
            }
            out.push(digit);
            pending = None;
        }
        if digits.contains(&ch) {
            pending = Some(ch);
        } else {
            out.push(ch);
        }
    }
    out.extend(pending);
    out
}
