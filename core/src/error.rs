// core/src/error.rs
//
// Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while loading schemes, building scheme maps or reading
/// configuration.
///
/// Unrecognized input characters are never an error: transducers pass them
/// through unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// No scheme with this name is registered.
    #[error("unknown scheme `{0}`")]
    UnknownScheme(String),

    /// A scheme definition, or a pairing of two schemes, is malformed.
    #[error("invalid data for scheme `{scheme}`: {reason}")]
    ScriptData { scheme: String, reason: String },

    /// A scheme or configuration file is not valid TOML for its shape.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration could not be written as TOML.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// `do_vyanjana_svara_join` was given a suffix that does not open with a
    /// vowel of the scheme.
    #[error("`{0}` does not begin with a vowel")]
    NotVowelInitial(String),
}

impl Error {
    pub(crate) fn script_data(scheme: &str, reason: impl Into<String>) -> Self {
        Error::ScriptData {
            scheme: scheme.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
