// sanscript/tests/scheme_vectors.rs
//
// Cross-scheme conversion of the shared reference passages.
//
// `data/scheme_vectors.json` holds, per scheme, the same groups of text
// (vowels, marks, consonants, symbols, short words, a verse line). Every
// group is converted from each Roman scheme and from Devanagari into every
// other scheme that has the group, and compared modulo whitespace.

use std::collections::BTreeMap;

use sanscript::{default_transliterator, schemes, ScriptKind};

type Vectors = BTreeMap<String, BTreeMap<String, String>>;

fn load_vectors() -> Vectors {
    let raw = include_str!("data/scheme_vectors.json");
    serde_json::from_str(raw).expect("scheme_vectors.json should parse")
}

fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn compare_all(vectors: &Vectors, from: &str) -> Vec<String> {
    let engine = default_transliterator().unwrap();
    let mut failures = Vec::new();
    let Some(source) = vectors.get(from) else {
        return failures;
    };
    for (to, target) in vectors {
        for (group, text) in source {
            let Some(expected) = target.get(group) else {
                continue;
            };
            let actual = engine.transliterate(text, from, to).unwrap();
            if squash(&actual) != squash(expected) {
                failures.push(format!(
                    "{from} -> {to} [{group}]\n  expected: {}\n  actual:   {}",
                    squash(expected),
                    squash(&actual)
                ));
            }
        }
    }
    failures
}

#[test]
fn every_vector_scheme_is_builtin() {
    let vectors = load_vectors();
    let registry = sanscript::builtin_registry().unwrap();
    for name in vectors.keys() {
        assert!(registry.contains(name), "{name} missing from the built-in registry");
    }
}

#[test]
fn roman_sources_convert_to_every_scheme() {
    let vectors = load_vectors();
    let engine = default_transliterator().unwrap();
    let mut failures = Vec::new();
    for name in vectors.keys() {
        if engine.scheme(name).unwrap().kind() == ScriptKind::Roman {
            failures.extend(compare_all(&vectors, name));
        }
    }
    assert!(failures.is_empty(), "{} mismatches:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn devanagari_converts_to_every_scheme() {
    let vectors = load_vectors();
    let failures = compare_all(&vectors, schemes::DEVANAGARI);
    assert!(failures.is_empty(), "{} mismatches:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn identity_conversion_keeps_text() {
    let vectors = load_vectors();
    let engine = default_transliterator().unwrap();
    for group in ["putra", "naraIti", "sentence"] {
        for name in [schemes::DEVANAGARI, schemes::TELUGU, schemes::HK, schemes::IAST] {
            let text = &vectors[name][group];
            assert_eq!(engine.transliterate(text, name, name).unwrap(), *text, "{name} [{group}]");
        }
    }
}
