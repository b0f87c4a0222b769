//! Dialog configuration types.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::DialogError;

/// Default window title.
pub const DEFAULT_TITLE: &str = "Universal File Dialog";

/// Per-session dialog policy. Never mutated once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DialogConfig {
    /// Title shown by the front-end.
    #[builder(default = "DEFAULT_TITLE.to_string()")]
    #[serde(default = "default_title")]
    pub title: String,

    /// Ask providers to include hidden entries.
    #[builder(default = "false")]
    #[serde(default)]
    pub show_hidden: bool,

    /// Show plain files in the tree, not only containers.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_files: bool,

    /// Allow choosing more than one candidate.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub multiselect: bool,

    /// Offer directories as candidates.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub select_dirs: bool,

    /// Offer files as candidates.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub select_files: bool,

    /// Return paths with the host-native delimiter instead of `/`.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub use_external_delimiter: bool,
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn check_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().any(char::is_control) {
        return Err("Title cannot contain control characters".to_string());
    }
    Ok(())
}

impl DialogConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.title {
            Some(ref title) => check_title(title),
            None => Ok(()),
        }
    }
}

impl From<DialogConfigBuilderError> for DialogError {
    fn from(err: DialogConfigBuilderError) -> Self {
        DialogError::InvalidConfiguration {
            message: err.to_string(),
        }
    }
}

impl DialogConfig {
    /// Create a new config builder.
    pub fn builder() -> DialogConfigBuilder {
        DialogConfigBuilder::default()
    }

    /// Check a config that did not come through the builder (e.g. deserialized).
    pub fn validate(&self) -> Result<(), DialogError> {
        check_title(&self.title).map_err(|message| DialogError::InvalidConfiguration { message })
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_hidden: false,
            include_files: true,
            multiselect: true,
            select_dirs: true,
            select_files: true,
            use_external_delimiter: true,
        }
    }
}

impl fmt::Display for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DialogConfig(title={:?}, show_hidden={}, include_files={}, multiselect={}, \
             select_dirs={}, select_files={}, use_external_delimiter={})",
            self.title,
            self.show_hidden,
            self.include_files,
            self.multiselect,
            self.select_dirs,
            self.select_files,
            self.use_external_delimiter,
        )
    }
}
