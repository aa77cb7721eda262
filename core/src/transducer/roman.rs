// core/src/transducer/roman.rs
//
// Roman input: vowels are written explicitly, so a vowel that directly
// follows a consonant becomes a vowel mark, and a consonant followed by
// anything else is closed with the destination virama.

use super::{char_bounds, Options};
use crate::scheme_map::SchemeMap;

pub(super) fn transduce(text: &str, map: &SchemeMap, options: &Options) -> String {
    let bounds = char_bounds(text);
    let n = bounds.len() - 1;
    let window = options
        .togglers
        .iter()
        .map(|toggler| toggler.chars().count())
        .fold(map.max_key_length(), usize::max);

    let mut out = String::with_capacity(text.len() * 2);
    let mut had_consonant = false;
    let mut toggled = false;
    let mut suspended = false;
    let mut i = 0;

    // `i == n` is visited once so that a dangling consonant gets its virama.
    while i <= n {
        let mut len = window.min(n - i);
        let mut found = false;
        while len > 0 {
            let token = &text[bounds[i]..bounds[i + len]];

            if options.togglers.contains(token) {
                toggled = !toggled;
                i += len;
                found = true;
                break;
            }
            if len == 1 {
                let ch = token.chars().next().unwrap_or_default();
                if options.suspend_on.contains(&ch) {
                    suspended = true;
                } else if options.suspend_off.contains(&ch) {
                    suspended = false;
                }
            }
            if toggled || suspended {
                len -= 1;
                continue;
            }

            if had_consonant {
                if let Some(vowel) = map.vowels.get(token) {
                    match map.vowel_marks.get(token) {
                        Some(mark) if !mark.is_empty() => out.push_str(mark),
                        _ if map.to_roman() => out.push_str(vowel),
                        _ => {}
                    }
                    found = true;
                }
            }
            if !found {
                if let Some(value) = map.other.get(token) {
                    if had_consonant {
                        out.push_str(&map.to_virama);
                    }
                    out.push_str(value);
                    found = true;
                }
            }

            if found {
                had_consonant = map.consonants.contains_key(token);
                i += len;
                break;
            }
            len -= 1;
        }

        if !found {
            if had_consonant {
                out.push_str(&map.to_virama);
            }
            if i < n {
                out.push_str(&text[bounds[i]..bounds[i + 1]]);
                had_consonant = false;
            }
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::scheme_map::SchemeMap;
    use crate::testutil;
    use crate::transducer::Options;
    use crate::ScriptKind;

    fn hk_to_devanagari(text: &str) -> String {
        let map = SchemeMap::new(&testutil::hk(), &testutil::devanagari()).unwrap();
        ScriptKind::Roman.transduce(&map, text, &Options::default())
    }

    #[test]
    fn consonants_take_marks_and_viramas() {
        assert_eq!(hk_to_devanagari("nara"), "नर");
        assert_eq!(hk_to_devanagari("rAmaH"), "रामः");
        assert_eq!(hk_to_devanagari("vAk"), "वाक्");
        assert_eq!(hk_to_devanagari("kSetre"), "क्षेत्रे");
    }

    #[test]
    fn unknown_characters_close_consonants() {
        assert_eq!(hk_to_devanagari("k#a"), "क्#अ");
        assert_eq!(hk_to_devanagari("a#kSara"), "अ#क्षर");
    }

    #[test]
    fn togglers_copy_text_through() {
        for (input, expected) in [
            ("akSa##kSa##ra", "अक्षkSaर"),
            ("##akSa##kSa##ra", "akSaक्षra"),
            ("akSa##ra##", "अक्षra"),
            ("akSa##ra", "अक्षra"),
            ("akSa##kSa##ra####", "अक्षkSaर"),
            ("a####kSara", "अक्षर"),
        ] {
            assert_eq!(hk_to_devanagari(input), expected, "{input}");
        }
    }

    #[test]
    fn suspend_characters_are_kept() {
        assert_eq!(hk_to_devanagari("<p>nara iti</p>"), "<p>नर इति</p>");
        assert_eq!(hk_to_devanagari("<p>##na##ra## iti</p>"), "<p>naर iti</p>");
    }

    #[test]
    fn custom_options() {
        let map = SchemeMap::new(&testutil::hk(), &testutil::devanagari()).unwrap();
        let mut options = Options::none();
        options.togglers.insert("$".to_string());
        assert_eq!(ScriptKind::Roman.transduce(&map, "ka$ka$<ka>", &options), "कka<क>");
    }

    #[test]
    fn roman_to_roman_spells_implicit_vowel() {
        let map = SchemeMap::new(&testutil::hk(), &testutil::iast()).unwrap();
        assert_eq!(
            ScriptKind::Roman.transduce(&map, "kRSNa", &Options::default()),
            "kṛṣṇa"
        );
    }
}
