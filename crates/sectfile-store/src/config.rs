//! Store configuration.
//!
//! The store file location is always explicit: `<base_dir>/<name>.<extension>`.
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! base_dir = "files"
//! name = "trail"
//! extension = "txt"
//! line_ending = "lf"
//! rewrite_mode = "legacy"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::format::LineEnding;
use crate::index::RewriteMode;

/// Where a store lives and how it is rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding store files.
    pub base_dir: PathBuf,
    /// Logical store name, without extension.
    pub name: String,
    /// File extension appended to the name. Empty for none.
    pub extension: String,
    /// Terminator written after each line.
    pub line_ending: LineEnding,
    /// How rewrites treat malformed files.
    pub rewrite_mode: RewriteMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("files"),
            name: "save".to_string(),
            extension: "txt".to_string(),
            line_ending: LineEnding::default(),
            rewrite_mode: RewriteMode::default(),
        }
    }
}

impl StoreConfig {
    /// Configuration for store `name` under `base_dir`, other fields default.
    pub fn new(base_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rewrite_mode(mut self, mode: RewriteMode) -> Self {
        self.rewrite_mode = mode;
        self
    }

    pub fn with_line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = ending;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Full path of the store file.
    pub fn path(&self) -> PathBuf {
        if self.extension.is_empty() {
            self.base_dir.join(&self.name)
        } else {
            self.base_dir.join(format!("{}.{}", self.name, self.extension))
        }
    }

    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> StoreResult<String> {
        toml::to_string(self).map_err(|e| StoreError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.base_dir, PathBuf::from("files"));
        assert_eq!(c.extension, "txt");
        assert_eq!(c.line_ending, LineEnding::Native);
        assert_eq!(c.rewrite_mode, RewriteMode::Lossless);
        assert_eq!(c.path(), PathBuf::from("files").join("save.txt"));
    }

    #[test]
    fn path_without_extension() {
        let c = StoreConfig::new("data", "slot").with_extension("");
        assert_eq!(c.path(), PathBuf::from("data").join("slot"));
    }

    #[test]
    fn parse_partial_toml() {
        let c = StoreConfig::from_toml_str("name = \"trail\"\nrewrite_mode = \"legacy\"\n").unwrap();
        assert_eq!(c.name, "trail");
        assert_eq!(c.rewrite_mode, RewriteMode::Legacy);
        assert_eq!(c.extension, "txt");
    }

    #[test]
    fn parse_line_endings() {
        let c = StoreConfig::from_toml_str("line_ending = \"crlf\"").unwrap();
        assert_eq!(c.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn reject_unknown_mode() {
        let err = StoreConfig::from_toml_str("rewrite_mode = \"sometimes\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = StoreConfig::new("saves", "slot2")
            .with_line_ending(LineEnding::Lf)
            .with_rewrite_mode(RewriteMode::Legacy);
        let text = c.to_toml_string().unwrap();
        assert_eq!(StoreConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sectfile.toml");
        fs::write(&path, "base_dir = \"saves\"\nname = \"slot3\"\n").unwrap();
        let c = StoreConfig::load(&path).unwrap();
        assert_eq!(c.path(), PathBuf::from("saves").join("slot3.txt"));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = StoreConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
