//! Renderer configuration.

use serde::Deserialize;

use crate::errors::{LoadError, SourceContext};
use crate::render::defaults;

/// Settings that fill in what scene items leave unspecified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Font family for text items without a `font`.
    pub font: String,
    /// Font size in pixels for text items without a `fontSize`.
    pub font_size: f64,
    /// Prefix for relative image URLs.
    #[serde(rename = "baseURL")]
    pub base_url: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: defaults::FONT.to_string(),
            font_size: defaults::FONT_SIZE,
            base_url: None,
        }
    }
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text)
            .map_err(|e| SourceContext::new("<config>", text).json_error("config", &e))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}
