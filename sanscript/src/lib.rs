//! sanscript crate root
//!
//! Transliteration of Sanskrit between Brahmic scripts (Devanagari, Tamil,
//! Gurmukhi, ...) and Roman schemes (IAST, Harvard-Kyoto, ITRANS, ...).
//!
//! This crate ships the built-in scheme data and a lazily built default
//! engine on top of `sanscript-core`.
//!
//! ```
//! use sanscript::{schemes, transliterate};
//!
//! let deva = transliterate("rAmaH", schemes::HK, schemes::DEVANAGARI).unwrap();
//! assert_eq!(deva, "रामः");
//! assert_eq!(transliterate(&deva, schemes::DEVANAGARI, schemes::IAST).unwrap(), "rāmaḥ");
//! ```
//!
//! Public API exported here:
//! - `transliterate`, `get_standard_form` and `default_transliterator`
//! - `schemes` - names and data of the built-in schemes
//! - `SanscriptConfig` - core configuration plus extra scheme files

pub mod config;
pub mod schemes;

use once_cell::sync::OnceCell;

// Convenience re-exports for common types used by callers.
pub use config::SanscriptConfig;
pub use sanscript_core::{
    accent, anusvara, syllable, Category, Config, Error, Options, Registry, Result, Scheme,
    SchemeMap, ScriptKind, Transliterator,
};
pub use schemes::builtin_registry;

static DEFAULT: OnceCell<Transliterator> = OnceCell::new();

/// Process-wide transliterator over the built-in schemes with the default
/// configuration, built on first use.
pub fn default_transliterator() -> Result<&'static Transliterator> {
    DEFAULT.get_or_try_init(|| Ok(Transliterator::new(builtin_registry()?)))
}

/// Transliterate `text` from one built-in scheme to another with the
/// default options (`##` toggles, `<`/`>` suspend).
pub fn transliterate(text: &str, from: &str, to: &str) -> Result<String> {
    default_transliterator()?.transliterate(text, from, to)
}

/// Canonical spelling of `text` in `scheme`, with alternate spellings
/// folded into the canonical ones by a round trip through Devanagari.
///
/// ```
/// # use sanscript::{get_standard_form, schemes};
/// assert_eq!(get_standard_form("raamaayaNa", schemes::ITRANS).unwrap(), "rAmAyaNa");
/// ```
pub fn get_standard_form(text: &str, scheme: &str) -> Result<String> {
    default_transliterator()?.standard_form(text, scheme, schemes::DEVANAGARI)
}
