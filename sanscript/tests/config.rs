// sanscript/tests/config.rs
//
// SanscriptConfig: TOML files on disk, extra scheme files and the options
// the resulting transliterator uses.

use std::path::PathBuf;

use sanscript::{schemes, SanscriptConfig};

const CUSTOM_SCHEME: &str = r#"
name = "ascii_caps"
kind = "roman"
vowels = ["A", "AA", "I", "II", "U", "UU"]
virama = [""]
consonants = [
    "K", "KH", "G", "GH", "NG",
    "C", "CH", "J", "JH", "NY",
    "TT", "TTH", "DD", "DDH", "NN",
    "T", "TH", "D", "DH", "N",
    "P", "PH", "B", "BH", "M",
    "Y", "R", "L", "V",
]
"#;

fn temp_path(file: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sanscript-{}-{file}", std::process::id()))
}

#[test]
fn scheme_files_extend_builtins() {
    let scheme_path = temp_path("ascii_caps.toml");
    std::fs::write(&scheme_path, CUSTOM_SCHEME).unwrap();

    let config = SanscriptConfig {
        scheme_files: vec![scheme_path.clone()],
        ..Default::default()
    };
    let engine = config.transliterator().unwrap();
    assert!(engine.registry().contains(schemes::DEVANAGARI));
    assert_eq!(
        engine.transliterate("NARA", "ascii_caps", schemes::DEVANAGARI).unwrap(),
        "नर"
    );
    assert_eq!(
        engine.transliterate("रामायण", schemes::DEVANAGARI, "ascii_caps").unwrap(),
        "RAAMAAYANNA"
    );

    std::fs::remove_file(&scheme_path).unwrap();
}

#[test]
fn config_file_controls_options_and_cache() {
    let config_path = temp_path("config.toml");
    std::fs::write(
        &config_path,
        r#"
        max_cache_size = 2
        togglers = ["$$"]
        suspend_on = []
        suspend_off = []
        "#,
    )
    .unwrap();

    let config = SanscriptConfig::load_toml(&config_path).unwrap();
    let engine = config.transliterator().unwrap();
    assert_eq!(engine.cache_capacity(), 2);
    assert_eq!(
        engine.transliterate("ka$$ka$$ka", schemes::HK, schemes::DEVANAGARI).unwrap(),
        "कkaक"
    );
    assert_eq!(
        engine.transliterate("<ka>", schemes::HK, schemes::DEVANAGARI).unwrap(),
        "<क>"
    );

    config.save_toml(&config_path).unwrap();
    assert_eq!(SanscriptConfig::load_toml(&config_path).unwrap(), config);
    std::fs::remove_file(&config_path).unwrap();
}
