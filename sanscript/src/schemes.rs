//! Built-in schemes.
//!
//! Each scheme is a TOML file under `data/`, embedded at compile time. The
//! constants name them for use with [`transliterate`](crate::transliterate).

use sanscript_core::{Registry, Result};

pub const DEVANAGARI: &str = "devanagari";
pub const BENGALI: &str = "bengali";
pub const GUJARATI: &str = "gujarati";
pub const GURMUKHI: &str = "gurmukhi";
pub const KANNADA: &str = "kannada";
pub const MALAYALAM: &str = "malayalam";
pub const ORIYA: &str = "oriya";
pub const TAMIL: &str = "tamil";
pub const TAMIL_SUPERSCRIPTED: &str = "tamil_superscripted";
pub const TAMIL_SUBSCRIPTED: &str = "tamil_subscripted";
pub const TELUGU: &str = "telugu";
pub const GRANTHA: &str = "grantha";
pub const GUNJALA_GONDI: &str = "gunjala_gondi";

pub const HK: &str = "hk";
pub const IAST: &str = "iast";
pub const ITRANS: &str = "itrans";
pub const OPTITRANS: &str = "optitrans";
pub const KOLKATA: &str = "kolkata";
pub const SLP1: &str = "slp1";
pub const VELTHUIS: &str = "velthuis";
pub const WX: &str = "wx";
pub const TITUS: &str = "titus";
pub const ISO: &str = "iso";

/// Brahmic scheme names, in the order of the data directory listing.
pub const BRAHMIC_SCHEMES: &[&str] = &[
    DEVANAGARI,
    BENGALI,
    GUJARATI,
    GURMUKHI,
    KANNADA,
    MALAYALAM,
    ORIYA,
    TAMIL,
    TAMIL_SUPERSCRIPTED,
    TAMIL_SUBSCRIPTED,
    TELUGU,
    GRANTHA,
    GUNJALA_GONDI,
];

pub const ROMAN_SCHEMES: &[&str] = &[HK, IAST, ITRANS, OPTITRANS, KOLKATA, SLP1, VELTHUIS, WX, TITUS, ISO];

static SOURCES: &[&str] = &[
    include_str!("../data/brahmic/devanagari.toml"),
    include_str!("../data/brahmic/bengali.toml"),
    include_str!("../data/brahmic/gujarati.toml"),
    include_str!("../data/brahmic/gurmukhi.toml"),
    include_str!("../data/brahmic/kannada.toml"),
    include_str!("../data/brahmic/malayalam.toml"),
    include_str!("../data/brahmic/oriya.toml"),
    include_str!("../data/brahmic/tamil.toml"),
    include_str!("../data/brahmic/tamil_superscripted.toml"),
    include_str!("../data/brahmic/tamil_subscripted.toml"),
    include_str!("../data/brahmic/telugu.toml"),
    include_str!("../data/brahmic/grantha.toml"),
    include_str!("../data/brahmic/gunjala_gondi.toml"),
    include_str!("../data/roman/hk.toml"),
    include_str!("../data/roman/iast.toml"),
    include_str!("../data/roman/itrans.toml"),
    include_str!("../data/roman/optitrans.toml"),
    include_str!("../data/roman/kolkata.toml"),
    include_str!("../data/roman/slp1.toml"),
    include_str!("../data/roman/velthuis.toml"),
    include_str!("../data/roman/wx.toml"),
    include_str!("../data/roman/titus.toml"),
    include_str!("../data/roman/iso.toml"),
];

/// TOML definitions of every built-in scheme.
pub fn builtin_sources() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().copied()
}

/// A registry holding every built-in scheme.
pub fn builtin_registry() -> Result<Registry> {
    Registry::from_sources(builtin_sources())
}
