// core/src/registry.rs
//
// Named collection of schemes. Built once, then read by every
// transliteration.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scheme::{Scheme, ScriptKind};

/// Schemes by name.
///
/// # Example
/// ```
/// use sanscript_core::Registry;
///
/// let registry = Registry::from_sources([r#"
///     name = "mini"
///     kind = "roman"
///     vowels = ["a"]
///     virama = [""]
/// "#]).unwrap();
///
/// assert!(registry.contains("mini"));
/// assert!(registry.get("nope").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemes: BTreeMap<String, Arc<Scheme>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from TOML scheme definitions. A later definition
    /// with the name of an earlier one replaces it.
    pub fn from_sources<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for source in sources {
            registry.register_toml(source.as_ref())?;
        }
        debug!(schemes = registry.len(), "built scheme registry");
        Ok(registry)
    }

    /// Add a scheme, returning the one it replaced.
    pub fn register(&mut self, scheme: Scheme) -> Option<Arc<Scheme>> {
        let name = scheme.name().to_string();
        let replaced = self.schemes.insert(name.clone(), Arc::new(scheme));
        if replaced.is_some() {
            debug!(scheme = %name, "replaced registered scheme");
        }
        replaced
    }

    /// Parse a TOML definition and add it. Returns the scheme's name.
    pub fn register_toml(&mut self, source: &str) -> Result<String> {
        let scheme = Scheme::from_toml_str(source)?;
        let name = scheme.name().to_string();
        self.register(scheme);
        Ok(name)
    }

    /// Read a TOML definition from disk and add it.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let name = self.register_toml(&content)?;
        debug!(scheme = %name, path = %path.as_ref().display(), "loaded scheme file");
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Result<Arc<Scheme>> {
        self.schemes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemes.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    pub fn schemes_of_kind(&self, kind: ScriptKind) -> impl Iterator<Item = &Arc<Scheme>> {
        self.schemes.values().filter(move |scheme| scheme.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_ROMAN: &str = r#"
        name = "tiny"
        kind = "roman"
        vowels = ["a"]
        virama = [""]
        consonants = ["k"]
    "#;

    const TINY_BRAHMIC: &str = r#"
        name = "tiny"
        kind = "brahmic"
        vowels = ["अ"]
        virama = ["्"]
        consonants = ["क"]
    "#;

    #[test]
    fn unknown_scheme() {
        let registry = Registry::new();
        let err = registry.get("iast").unwrap_err();
        assert!(matches!(err, Error::UnknownScheme(ref name) if name == "iast"));
    }

    #[test]
    fn later_definition_replaces_earlier() {
        let registry = Registry::from_sources([TINY_ROMAN, TINY_BRAHMIC]).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("tiny").unwrap().kind(), ScriptKind::Brahmic);
    }

    #[test]
    fn invalid_source_fails_whole_build() {
        let result = Registry::from_sources([TINY_ROMAN, "name = 3"]);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn filters_by_kind() {
        let mut registry = Registry::from_sources([TINY_ROMAN]).unwrap();
        registry.register_toml(&TINY_BRAHMIC.replace("tiny", "tinier")).unwrap();
        let brahmic: Vec<&str> = registry
            .schemes_of_kind(ScriptKind::Brahmic)
            .map(|s| s.name())
            .collect();
        assert_eq!(brahmic, ["tinier"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["tinier", "tiny"]);
    }

    #[test]
    fn load_file_reports_io_errors() {
        let mut registry = Registry::new();
        let err = registry.load_file("/nonexistent/scheme.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
