//! Vyañjana/svara splitting: Brahmic text broken into bare consonants
//! (consonant + virama) and independent vowels, so that passes working on
//! syllables can treat every nucleus alike, then joined back.
//!
//! `join_syllables(split_syllables(text))` gives back `text`.

use crate::error::{Error, Result};
use crate::scheme::{Category, Scheme};
use crate::trie::Slot;

/// Combining accent characters that attach to the preceding syllable even
/// when the scheme does not list them.
pub(crate) fn is_accent_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{1CD0}'..='\u{1CE8}'
            | '\u{1CF9}'
            | '\u{1CFA}'
            | '\u{A8E0}'..='\u{A8F1}'
            | '\u{0951}'..='\u{0954}'
            | '\u{0957}'
    )
}

/// Split text into syllable tokens.
///
/// In Brahmic text each consonant becomes `consonant + virama` followed by
/// its vowel as an independent letter (the inherent vowel included), so
/// `के` splits into `क्`, `ए`. Accents stick to the token before them;
/// yogavaahas and everything else are tokens of their own.
///
/// ```
/// # use sanscript_core::{split_syllables, Scheme};
/// # let dev = Scheme::from_toml_str(r#"
/// #     name = "dev"
/// #     kind = "brahmic"
/// #     vowels = ["अ", "आ", "इ"]
/// #     vowel_marks = ["ा", "ि"]
/// #     virama = ["्"]
/// #     yogavaahas = ["ं"]
/// #     consonants = ["क", "त"]
/// # "#).unwrap();
/// assert_eq!(split_syllables(&dev, "कितं"), ["क्", "इ", "त्", "अ", "ं"]);
/// ```
pub fn split_syllables(scheme: &Scheme, text: &str) -> Vec<String> {
    let tokens = scheme.tokenize(text);
    let virama = scheme.virama();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut j = 0;

    while j < tokens.len() {
        let token = tokens[j];
        if token.is_consonant() && !scheme.is_roman() {
            out.push(format!("{}{virama}", token.text));
            match tokens.get(j + 1).and_then(|next| next.slot) {
                Some(Slot {
                    category: Category::Virama,
                    ..
                }) => j += 2,
                Some(Slot {
                    category: Category::VowelMarks,
                    index,
                }) => {
                    let vowel = scheme.grapheme(Category::Vowels, index + 1).unwrap_or_default();
                    out.push(vowel.to_string());
                    j += 2;
                }
                _ => {
                    out.push(scheme.implicit_vowel().to_string());
                    j += 1;
                }
            }
            continue;
        }

        let is_accent = match token.slot {
            Some(slot) => slot.category == Category::Accents,
            None => token.text.chars().all(is_accent_char),
        };
        match out.last_mut() {
            Some(previous) if is_accent => previous.push_str(token.text),
            _ => out.push(token.text.to_string()),
        }
        j += 1;
    }
    out
}

/// Join syllable tokens produced by [`split_syllables`]: a bare consonant
/// followed by a vowel-initial token takes the vowel's mark.
pub fn join_syllables<S: AsRef<str>>(scheme: &Scheme, syllables: &[S]) -> String {
    let virama = scheme.virama();
    let mut out = String::new();
    let mut pending: Option<&str> = None;

    for syllable in syllables {
        let syllable = syllable.as_ref();
        if let Some(consonant) = pending.take() {
            match leading_in(scheme, syllable, &[Category::Vowels]) {
                Some((len, slot)) => {
                    out.push_str(consonant);
                    if slot.index > 0 {
                        out.push_str(
                            scheme
                                .grapheme(Category::VowelMarks, slot.index - 1)
                                .unwrap_or_default(),
                        );
                    }
                    out.push_str(&syllable[len..]);
                    continue;
                }
                None => {
                    out.push_str(consonant);
                    out.push_str(virama);
                }
            }
        }
        if let Some(base) = bare_consonant(scheme, syllable) {
            pending = Some(base);
            continue;
        }
        out.push_str(syllable);
    }
    if let Some(consonant) = pending {
        out.push_str(consonant);
        out.push_str(virama);
    }
    out
}

/// Join a consonant-final word with a vowel-initial one, fusing the
/// boundary into one syllable.
///
/// ```
/// # use sanscript_core::{do_vyanjana_svara_join, Scheme};
/// # let dev = Scheme::from_toml_str(r#"
/// #     name = "dev"
/// #     kind = "brahmic"
/// #     vowels = ["अ", "आ", "इ", "ई"]
/// #     vowel_marks = ["ा", "ि", "ी"]
/// #     virama = ["्"]
/// #     yogavaahas = ["ं", "ः"]
/// #     consonants = ["र", "ह"]
/// # "#).unwrap();
/// assert_eq!(do_vyanjana_svara_join(&dev, "ह्र्", "ईः").unwrap(), "ह्रीः");
/// assert!(do_vyanjana_svara_join(&dev, "ह्र्", "रः").is_err());
/// ```
pub fn do_vyanjana_svara_join(
    scheme: &Scheme,
    consonant_final: &str,
    vowel_initial: &str,
) -> Result<String> {
    let (len, slot) = leading_in(scheme, vowel_initial, &[Category::Vowels])
        .ok_or_else(|| Error::NotVowelInitial(vowel_initial.to_string()))?;

    if scheme.is_roman() {
        return Ok(format!("{consonant_final}{vowel_initial}"));
    }
    let stem = consonant_final
        .strip_suffix(scheme.virama())
        .unwrap_or(consonant_final);
    let mark = match slot.index {
        0 => "",
        index => scheme
            .grapheme(Category::VowelMarks, index - 1)
            .unwrap_or_default(),
    };
    Ok(format!("{stem}{mark}{}", &vowel_initial[len..]))
}

/// If `syllable` is exactly a consonant followed by the virama, the
/// consonant.
fn bare_consonant<'a>(scheme: &Scheme, syllable: &'a str) -> Option<&'a str> {
    if scheme.is_roman() {
        return None;
    }
    let base = syllable.strip_suffix(scheme.virama())?;
    scheme
        .lookup(base)
        .filter(|slot| slot.category.is_consonant())
        .map(|_| base)
}

/// Longest grapheme of one of `categories` at the start of `text`, with its
/// length in bytes.
pub(crate) fn leading_in(
    scheme: &Scheme,
    text: &str,
    categories: &[Category],
) -> Option<(usize, Slot)> {
    let mut ends: Vec<usize> = text
        .char_indices()
        .map(|(offset, ch)| offset + ch.len_utf8())
        .take(scheme.max_grapheme_len())
        .collect();
    ends.reverse();
    ends.into_iter().find_map(|end| {
        scheme
            .lookup(&text[..end])
            .filter(|slot| categories.contains(&slot.category))
            .map(|slot| (end, slot))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn split_spells_out_vowels() {
        let dev = testutil::devanagari();
        assert_eq!(
            split_syllables(&dev, "क्ष्म्य"),
            ["क्ष्", "म्", "य्", "अ"]
        );
        assert_eq!(split_syllables(&dev, "तं जि"), ["त्", "अ", "ं", " ", "ज्", "इ"]);
    }

    #[test]
    fn accents_attach_to_previous_syllable() {
        let dev = testutil::devanagari();
        assert_eq!(
            split_syllables(&dev, "सैॗषा᳘ तं॑"),
            ["स्", "ऐॗ", "ष्", "आ᳘", " ", "त्", "अ", "ं॑"]
        );
    }

    #[test]
    fn split_and_join_round_trip() {
        let dev = testutil::devanagari();
        for text in [
            "सैॗषा᳘ निदा᳘नेना यदि᳘डा॥",
            "त॑स्माद्वा॑ अप॑ उ॑पस्पृशति॥ सो᳕ऽग्नि॑मेवा᳕भी॑क्षमाणः।",
            "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः ।",
            "तं जित्वा",
            "क्ष्म्य",
        ] {
            let syllables = split_syllables(&dev, text);
            assert_eq!(join_syllables(&dev, &syllables), text);
        }
    }

    #[test]
    fn roman_split_keeps_consonants_whole() {
        let hk = testutil::hk();
        assert_eq!(split_syllables(&hk, "kSa"), ["kS", "a"]);
        assert_eq!(join_syllables(&hk, &["kS", "a"]), "kSa");
    }

    #[test]
    fn vyanjana_svara_join() {
        let dev = testutil::devanagari();
        assert_eq!(do_vyanjana_svara_join(&dev, "ह्र्", "ईः").unwrap(), "ह्रीः");
        assert_eq!(do_vyanjana_svara_join(&dev, "वाक्", "अत्र").unwrap(), "वाकत्र");
        let err = do_vyanjana_svara_join(&dev, "वाक्", "त्र").unwrap_err();
        assert!(matches!(err, Error::NotVowelInitial(ref s) if s == "त्र"));

        let hk = testutil::hk();
        assert_eq!(do_vyanjana_svara_join(&hk, "vAk", "atra").unwrap(), "vAkatra");
    }
}
