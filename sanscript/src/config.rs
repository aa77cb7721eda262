use std::path::{Path, PathBuf};

use sanscript_core::{Config, Registry, Result, Transliterator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schemes::builtin_registry;

/// Configuration that extends the base `Config` from core with extra scheme
/// definitions.
///
/// # Example
///
/// ```rust
/// use sanscript::SanscriptConfig;
///
/// let config = SanscriptConfig::from_toml_str(r###"
///     max_cache_size = 32
///     togglers = ["##", "{#"]
/// "###).unwrap();
/// assert_eq!(config.base().max_cache_size, 32);
/// assert!(config.scheme_files.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanscriptConfig {
    /// Cache size and transliteration options
    #[serde(flatten)]
    pub base: Config,

    /// Scheme definitions loaded after the built-ins. A file defining an
    /// existing name replaces that scheme.
    pub scheme_files: Vec<PathBuf>,
}

impl SanscriptConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Convert into the base config.
    pub fn into_base(self) -> Config {
        self.base
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }

    /// Built-in schemes plus the configured scheme files.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = builtin_registry()?;
        for path in &self.scheme_files {
            registry.load_file(path)?;
        }
        debug!(
            schemes = registry.len(),
            files = self.scheme_files.len(),
            "built registry from configuration"
        );
        Ok(registry)
    }

    /// A transliterator over [`registry`](Self::registry) using the base
    /// configuration.
    pub fn transliterator(&self) -> Result<Transliterator> {
        Ok(Transliterator::with_config(self.registry()?, &self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_keys() {
        let config = SanscriptConfig::from_toml_str(
            r#"
            max_cache_size = 2
            scheme_files = ["extra/scheme.toml"]
            "#,
        )
        .unwrap();
        assert_eq!(config.base.max_cache_size, 2);
        assert_eq!(config.base.togglers, ["##"]);
        assert_eq!(config.scheme_files, [PathBuf::from("extra/scheme.toml")]);

        let text = config.to_toml_string().unwrap();
        assert_eq!(SanscriptConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_scheme_file_fails() {
        let config = SanscriptConfig {
            scheme_files: vec![PathBuf::from("/nonexistent/scheme.toml")],
            ..Default::default()
        };
        assert!(config.registry().is_err());
    }
}
