// Scheme fixtures for unit tests, read from the data shipped with the
// `sanscript` crate.

use crate::Scheme;

fn load(source: &str) -> Scheme {
    Scheme::from_toml_str(source).expect("fixture scheme must load")
}

pub fn devanagari() -> Scheme {
    load(include_str!("../../sanscript/data/brahmic/devanagari.toml"))
}

pub fn tamil_superscripted() -> Scheme {
    load(include_str!("../../sanscript/data/brahmic/tamil_superscripted.toml"))
}

pub fn hk() -> Scheme {
    load(include_str!("../../sanscript/data/roman/hk.toml"))
}

pub fn iast() -> Scheme {
    load(include_str!("../../sanscript/data/roman/iast.toml"))
}

pub fn itrans() -> Scheme {
    load(include_str!("../../sanscript/data/roman/itrans.toml"))
}

pub fn optitrans() -> Scheme {
    load(include_str!("../../sanscript/data/roman/optitrans.toml"))
}
