// core/src/anusvara.rs
//
// Anusvara and visarga normalization. "Lazy" writing uses the anusvara for
// every nasal before a stop; the careful spelling uses the nasal of the
// stop's class. Both directions are provided, along with the visarga
// variants used before velars and labials.

use serde::{Deserialize, Serialize};

use crate::scheme::{slots, Category, Scheme, Varga};
use crate::trie::Token;

/// Switches for [`fix_lazy_anusvaara`]. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LazyAnusvaraOptions {
    /// Keep the anusvara of the prefix `saṃ`.
    pub omit_sam: bool,
    /// Keep the anusvara before y, l and v.
    pub omit_yrl: bool,
    /// Only rewrite inside words, never across a space.
    pub ignore_padaanta: bool,
}

/// Replace an anusvara before a consonant with the nasal of that consonant's
/// class (`saMkara` → `sa~Nkara` in ITRANS). Before y, l and v the anusvara
/// becomes a nasalized copy of the semivowel (`saMyukta` → `say.Nyukta`).
/// Spaces between the anusvara and the consonant are skipped over.
pub fn fix_lazy_anusvaara(scheme: &Scheme, text: &str, options: LazyAnusvaraOptions) -> String {
    if !options.ignore_padaanta {
        return fix_lazy_anusvaara_run(scheme, text, options);
    }
    map_words(text, |word| fix_lazy_anusvaara_run(scheme, word, options))
}

fn fix_lazy_anusvaara_run(scheme: &Scheme, text: &str, options: LazyAnusvaraOptions) -> String {
    let tokens = scheme.tokenize(text);
    let virama = scheme.virama();
    let mut out = String::with_capacity(text.len() * 2);

    for (j, token) in tokens.iter().enumerate() {
        if !token.is(Category::Yogavaahas, slots::ANUSVARA) {
            out.push_str(token.text);
            continue;
        }
        let Some(next) = next_consonant(&tokens, j) else {
            out.push_str(token.text);
            continue;
        };
        if options.omit_sam && is_sam(scheme, &tokens, j) {
            out.push_str(token.text);
            continue;
        }

        let index = next.slot.map_or(usize::MAX, |slot| slot.index);
        if let Some(nasal) = Varga::of_consonant(index)
            .and_then(|varga| scheme.grapheme(Category::Consonants, varga.nasal_index()))
        {
            out.push_str(nasal);
            out.push_str(virama);
        } else if matches!(index, slots::YA | slots::LA | slots::VA) && !options.omit_yrl {
            let candrabindu = scheme
                .grapheme(Category::Yogavaahas, slots::CANDRABINDU)
                .unwrap_or_default();
            out.push_str(next.text);
            out.push_str(virama);
            out.push_str(candrabindu);
        } else {
            out.push_str(token.text);
        }
    }
    out
}

/// The inverse of [`fix_lazy_anusvaara`]: a class nasal (plus virama) before
/// a stop of the same class, or a nasalized semivowel before the same
/// semivowel, collapses into the anusvara.
pub fn force_lazy_anusvaara(scheme: &Scheme, text: &str) -> String {
    let Some(anusvara) = scheme.grapheme(Category::Yogavaahas, slots::ANUSVARA) else {
        return text.to_string();
    };
    let candrabindu = scheme
        .grapheme(Category::Yogavaahas, slots::CANDRABINDU)
        .filter(|g| !g.is_empty());
    let tokens = scheme.tokenize(text);
    let mut out = String::with_capacity(text.len());
    let mut j = 0;

    while j < tokens.len() {
        let token = tokens[j];
        let Some(slot) = token.slot.filter(|slot| slot.category == Category::Consonants) else {
            out.push_str(token.text);
            j += 1;
            continue;
        };
        // Index of the token after the optional virama.
        let after_virama = if tokens.get(j + 1).is_some_and(|t| t.category() == Some(Category::Virama)) {
            j + 2
        } else if scheme.is_roman() {
            j + 1
        } else {
            out.push_str(token.text);
            j += 1;
            continue;
        };

        let is_nasal = Varga::of_consonant(slot.index)
            .is_some_and(|varga| varga.nasal_index() == slot.index);
        if is_nasal {
            if let Some(next) = next_consonant(&tokens, after_virama - 1) {
                let next_index = next.slot.map_or(usize::MAX, |s| s.index);
                let same_class = Varga::of_consonant(next_index)
                    .is_some_and(|varga| varga.nasal_index() == slot.index);
                if same_class {
                    out.push_str(anusvara);
                    j = after_virama;
                    continue;
                }
            }
        }

        if let Some(candrabindu) = candrabindu {
            let semivowel = matches!(slot.index, slots::YA | slots::LA | slots::VA);
            let nasalized = tokens.get(after_virama).is_some_and(|t| t.text == candrabindu);
            let doubled = tokens
                .get(after_virama + 1)
                .is_some_and(|t| t.slot == token.slot);
            if semivowel && nasalized && doubled {
                out.push_str(anusvara);
                j = after_virama + 1;
                continue;
            }
        }

        out.push_str(token.text);
        j += 1;
    }
    out
}

/// Replace a visarga before a velar with the jihvāmūlīya and before a labial
/// with the upadhmānīya, when the scheme has those signs.
pub fn fix_lazy_visarga(scheme: &Scheme, text: &str) -> String {
    let tokens = scheme.tokenize(text);
    let mut out = String::with_capacity(text.len());

    for (j, token) in tokens.iter().enumerate() {
        if token.is(Category::Yogavaahas, slots::VISARGA) {
            let replacement = next_consonant(&tokens, j)
                .and_then(|next| next.slot)
                .and_then(|slot| match Varga::of_consonant(slot.index) {
                    Some(Varga::Velar) => Some(slots::JIHVAMULIYA),
                    Some(Varga::Labial) => Some(slots::UPADHMANIYA),
                    _ => None,
                })
                .and_then(|index| scheme.grapheme(Category::Yogavaahas, index))
                .filter(|g| !g.is_empty());
            if let Some(replacement) = replacement {
                out.push_str(replacement);
                continue;
            }
        }
        out.push_str(token.text);
    }
    out
}

/// The consonant after `tokens[at]`, skipping spaces.
fn next_consonant<'t, 'a>(tokens: &'t [Token<'a>], at: usize) -> Option<&'t Token<'a>> {
    tokens
        .iter()
        .skip(at + 1)
        .find(|t| t.text != " ")
        .filter(|t| t.category() == Some(Category::Consonants))
}

/// Whether the anusvara at `tokens[at]` closes the prefix `saṃ`.
fn is_sam(scheme: &Scheme, tokens: &[Token<'_>], at: usize) -> bool {
    if scheme.is_roman() {
        at >= 2
            && tokens[at - 1].is(Category::Vowels, 0)
            && tokens[at - 2].is(Category::Consonants, slots::SA)
    } else {
        at >= 1 && tokens[at - 1].is(Category::Consonants, slots::SA)
    }
}

/// Apply `f` to every whitespace-free run of `text`, keeping the whitespace.
fn map_words(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(char::is_whitespace) {
        out.push_str(&f(&rest[..start]));
        let end = rest[start..]
            .find(|c: char| !c.is_whitespace())
            .map_or(rest.len(), |len| start + len);
        out.push_str(&rest[start..end]);
        rest = &rest[end..];
    }
    out.push_str(&f(rest));
    out
}
