// core/src/transducer/brahmic.rs
//
// Brahmic input: a consonant carries the inherent vowel unless a vowel mark
// or the virama follows it. When writing Roman, that vowel is spelled out
// before the next unit or at the end of input.

use super::char_bounds;
use crate::scheme_map::SchemeMap;

pub(super) fn transduce(text: &str, map: &SchemeMap) -> String {
    let bounds = char_bounds(text);
    let n = bounds.len() - 1;
    let window = map.max_key_length().max(1);
    let to_roman = map.to_roman();

    let mut out = String::with_capacity(text.len() * 2);
    let mut had_consonant = false;
    let mut i = 0;

    while i < n {
        let mut len = window.min(n - i);
        while len > 0 {
            let token = &text[bounds[i]..bounds[i + len]];
            let piece = if let Some(mark) = map.vowel_marks.get(token) {
                Some(mark.as_str())
            } else if let Some(virama) = map.virama.get(token) {
                Some(virama.as_str())
            } else if len == 1 || map.other.contains_key(token) {
                if had_consonant {
                    out.push_str(&map.implicit_vowel);
                }
                Some(map.other.get(token).map_or(token, String::as_str))
            } else {
                None
            };

            if let Some(piece) = piece {
                out.push_str(piece);
                had_consonant = to_roman && map.consonants.contains_key(token);
                i += len;
                break;
            }
            len -= 1;
        }
    }

    if had_consonant {
        out.push_str(&map.implicit_vowel);
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::scheme_map::SchemeMap;
    use crate::testutil;
    use crate::transducer::Options;
    use crate::ScriptKind;

    fn run(map: &SchemeMap, text: &str) -> String {
        ScriptKind::Brahmic.transduce(map, text, &Options::default())
    }

    #[test]
    fn inherent_vowel_is_spelled_out() {
        let map = SchemeMap::new(&testutil::devanagari(), &testutil::hk()).unwrap();
        assert_eq!(run(&map, "नर"), "nara");
        assert_eq!(run(&map, "रामः"), "rAmaH");
        assert_eq!(run(&map, "वाक्"), "vAk");
        assert_eq!(run(&map, "क्षेत्रे"), "kSetre");
    }

    #[test]
    fn unknown_characters_pass_through() {
        let map = SchemeMap::new(&testutil::devanagari(), &testutil::hk()).unwrap();
        assert_eq!(run(&map, "क#ख"), "ka#kha");
        assert_eq!(run(&map, "<p>नर</p>"), "<p>nara</p>");
    }

    #[test]
    fn brahmic_to_brahmic_keeps_marks() {
        let map =
            SchemeMap::new(&testutil::devanagari(), &testutil::tamil_superscripted()).unwrap();
        assert_eq!(run(&map, "कृष्ण"), "க\u{0943}ஷ்ண");
    }

    #[test]
    fn condensed_nasal_on_output() {
        let map = SchemeMap::new(&testutil::devanagari(), &testutil::optitrans()).unwrap();
        assert_eq!(run(&map, "शङ्कर"), "shankara");
    }

    #[test]
    fn precomposed_nukta_letters() {
        let map = SchemeMap::new(&testutil::devanagari(), &testutil::itrans()).unwrap();
        assert_eq!(run(&map, "\u{0958}"), "qa");
        assert_eq!(run(&map, "क\u{093C}"), "qa");
    }
}
