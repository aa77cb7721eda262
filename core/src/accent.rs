// core/src/accent.rs
//
// Vedic accent repositioning. Every pass here works on the syllables of
// `split_syllables` and only moves, adds or removes accent glyphs; the
// letters of the text are left as they are.

use std::collections::HashSet;

use crate::scheme::{slots, Category, Scheme};
use crate::syllable::{join_syllables, leading_in, split_syllables};

/// Svarita (udātta in some traditions): U+0951.
pub const SVARITA: &str = "\u{0951}";
/// Anudātta: U+0952.
pub const ANUDATTA: &str = "\u{0952}";
/// Dīrgha svarita: U+1CDA.
pub const DIIRGHA_SVARITA: &str = "\u{1CDA}";
/// Default mark for [`add_accent_to_end`]: U+1CDF.
pub const END_ACCENT: &str = "\u{1CDF}";

/// Move an accent from the syllable it is written on to the nearest
/// preceding syllable that begins with a vowel or a yogavaaha.
///
/// `new_accent` is what gets written on that syllable (the old accent when
/// `None`). When no such syllable exists the accent is carried to the front
/// of the text, unless `drop_at_first_syllable` is set. The old accent is
/// removed unless `retain_old_accent` is set.
pub fn add_accent_to_previous_syllable(
    scheme: &Scheme,
    text: &str,
    old_accent: &str,
    new_accent: Option<&str>,
    drop_at_first_syllable: bool,
    retain_old_accent: bool,
) -> String {
    let new_accent = new_accent.unwrap_or(old_accent);
    if old_accent.is_empty() {
        return text.to_string();
    }

    let mut carry = String::new();
    let mut out: Vec<String> = Vec::new();
    for syllable in split_syllables(scheme, text) {
        if !syllable.ends_with(old_accent) {
            out.push(syllable);
            continue;
        }
        let target = out.iter_mut().rev().find(|previous| {
            leading_in(scheme, previous, &[Category::Vowels, Category::Yogavaahas]).is_some()
        });
        match target {
            Some(previous) => previous.push_str(new_accent),
            None if !drop_at_first_syllable => carry.push_str(new_accent),
            None => {}
        }
        let kept = if retain_old_accent {
            syllable.as_str()
        } else {
            &syllable[..syllable.len() - old_accent.len()]
        };
        out.push(kept.to_string());
    }
    carry + &join_syllables(scheme, &out)
}

/// Mark a svarita (U+0951) standing on a long vowel or after a yogavaaha
/// with `accent` (the dīrgha svarita U+1CDA when `None`).
pub fn set_diirgha_svaritas(scheme: &Scheme, text: &str, accent: Option<&str>) -> String {
    let accent = accent.unwrap_or(DIIRGHA_SVARITA);
    let mut long = scheme.long_vowel_graphemes();
    long.extend(
        scheme
            .graphemes(Category::Yogavaahas)
            .iter()
            .map(String::as_str)
            .filter(|g| !g.is_empty()),
    );

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(SVARITA) {
        out.push_str(&rest[..at]);
        if long.iter().any(|g| out.ends_with(g)) {
            out.push_str(accent);
        } else {
            out.push_str(SVARITA);
        }
        rest = &rest[at + SVARITA.len()..];
    }
    out.push_str(rest);
    out
}

/// Rewrite Vedic accents into the Śatapatha Brāhmaṇa convention: the udātta
/// is written with U+1CD8 after any yogavaaha, a candrabindu becomes
/// U+1CEB + anusvara, and a svarita (U+1CE1) moves onto the previous syllable
/// as U+0957.
pub fn to_shatapatha_svara(scheme: &Scheme, text: &str) -> String {
    const UDATTA: char = '\u{1CD8}';

    let mut out = String::with_capacity(text.len());
    let mut chars = text
        .chars()
        .map(|ch| if ch == '\u{A8E1}' { UDATTA } else { ch })
        .peekable();
    while let Some(ch) = chars.next() {
        if ch == UDATTA {
            if let Some(yogavaaha) =
                chars.next_if(|&c| matches!(c, '\u{0902}' | '\u{0903}' | '\u{0901}'))
            {
                push_shatapatha(&mut out, yogavaaha);
            }
        }
        push_shatapatha(&mut out, ch);
    }
    add_accent_to_previous_syllable(scheme, &out, "\u{1CE1}", Some("\u{0957}"), false, false)
}

fn push_shatapatha(out: &mut String, ch: char) {
    match ch {
        '\u{0901}' | '\u{A8F3}' => out.push_str("\u{1CEB}\u{0902}"),
        _ => out.push(ch),
    }
}

/// Put `accent` (U+1CDF when `None`) after the last letter of the text, when
/// the text ends in non-letters such as a danda. Text ending in a letter is
/// returned unchanged.
pub fn add_accent_to_end(scheme: &Scheme, text: &str, accent: Option<&str>) -> String {
    let accent = accent.unwrap_or(END_ACCENT);
    let letters: HashSet<char> = [
        Category::Vowels,
        Category::VowelMarks,
        Category::Virama,
        Category::Yogavaahas,
        Category::Consonants,
        Category::ExtraConsonants,
    ]
    .into_iter()
    .flat_map(|category| scheme.graphemes(category))
    .flat_map(|grapheme| grapheme.chars())
    .collect();

    let Some((at, last)) = text.char_indices().rev().find(|(_, ch)| letters.contains(ch)) else {
        return text.to_string();
    };
    let split = at + last.len_utf8();
    if split == text.len() {
        return text.to_string();
    }
    format!("{}{accent}{}", &text[..split], &text[split..])
}

/// Glyphs for [`to_us_accents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsAccents {
    /// Anudātta as written in the input.
    pub grave: String,
    /// Svarita as written in the input.
    pub circumflex: String,
    /// Mark written on syllables that come out acute.
    pub acute: String,
    /// Written after the acute of a syllable that carried both input marks.
    pub kampa_marker: String,
}

impl Default for UsAccents {
    fn default() -> Self {
        Self {
            grave: ANUDATTA.to_string(),
            circumflex: SVARITA.to_string(),
            acute: SVARITA.to_string(),
            kampa_marker: DIIRGHA_SVARITA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pitch {
    Unmarked,
    Grave,
    Circumflex,
    Acute,
    Kampa,
}

/// Convert Rigvedic anudātta/svarita marking into explicit acute marks.
///
/// Text is processed in spans between dandas and newlines. Within a span
/// the first syllable is acute unless marked, unmarked syllables directly
/// before a circumflex or directly after a grave are acute (the run stops
/// at the next marked syllable), and a syllable carrying both marks is
/// acute with the kampa marker. The input grave and circumflex glyphs are
/// removed.
pub fn to_us_accents(scheme: &Scheme, text: &str, accents: &UsAccents) -> String {
    let delimiters: Vec<&str> = [slots::DANDA, slots::DOUBLE_DANDA]
        .into_iter()
        .filter_map(|index| scheme.grapheme(Category::Symbols, index))
        .filter(|g| !g.is_empty())
        .chain(["\n"])
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next = delimiters
            .iter()
            .filter_map(|d| rest.find(d).map(|at| (at, d.len())))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        match next {
            Some((at, len)) => {
                out.push_str(&us_accents_span(scheme, &rest[..at], accents));
                out.push_str(&rest[at..at + len]);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(&us_accents_span(scheme, rest, accents));
                return out;
            }
        }
    }
}

fn us_accents_span(scheme: &Scheme, span: &str, accents: &UsAccents) -> String {
    if span.trim().is_empty() {
        return span.to_string();
    }
    let has = |text: &str, mark: &str| !mark.is_empty() && text.contains(mark);

    let mut tokens = split_syllables(scheme, span);
    // (nucleus token, end of trailing yogavaahas)
    let mut syllables: Vec<(usize, usize)> = Vec::new();
    for (k, token) in tokens.iter().enumerate() {
        if leading_in(scheme, token, &[Category::Vowels]).is_some() {
            syllables.push((k, k + 1));
        } else if leading_in(scheme, token, &[Category::Yogavaahas]).is_some() {
            if let Some(last) = syllables.last_mut().filter(|last| last.1 == k) {
                last.1 = k + 1;
            }
        }
    }
    if syllables.is_empty() {
        return span.to_string();
    }

    let mut pitches: Vec<Pitch> = syllables
        .iter()
        .map(|&(start, end)| {
            let text = tokens[start..end].concat();
            match (has(&text, &accents.grave), has(&text, &accents.circumflex)) {
                (true, true) => Pitch::Kampa,
                (true, false) => Pitch::Grave,
                (false, true) => Pitch::Circumflex,
                (false, false) => Pitch::Unmarked,
            }
        })
        .collect();

    if pitches[0] == Pitch::Unmarked {
        pitches[0] = Pitch::Acute;
    }
    for c in 0..pitches.len() {
        if pitches[c] != Pitch::Circumflex {
            continue;
        }
        for k in (0..c).rev() {
            if pitches[k] != Pitch::Unmarked {
                break;
            }
            pitches[k] = Pitch::Acute;
        }
    }
    for g in 0..pitches.len() {
        if pitches[g] != Pitch::Grave {
            continue;
        }
        for k in g + 1..pitches.len() {
            if pitches[k] != Pitch::Unmarked {
                break;
            }
            pitches[k] = Pitch::Acute;
        }
    }

    for token in tokens.iter_mut() {
        for mark in [&accents.grave, &accents.circumflex] {
            if !mark.is_empty() && token.contains(mark.as_str()) {
                *token = token.replace(mark.as_str(), "");
            }
        }
    }

    for (&(nucleus, _), pitch) in syllables.iter().zip(&pitches) {
        let suffix = match pitch {
            Pitch::Acute => accents.acute.clone(),
            Pitch::Kampa => format!("{}{}", accents.acute, accents.kampa_marker),
            _ => continue,
        };
        let token = &mut tokens[nucleus];
        let at = leading_in(scheme, token, &[Category::Vowels]).map_or(token.len(), |(len, _)| len);
        token.insert_str(at, &suffix);
    }

    join_syllables(scheme, &tokens)
}
