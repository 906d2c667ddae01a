pub mod escher;

use serde::Serialize;

use crate::input::{InputError, MapAsset};
use crate::pipeline::stage1_extract::Mapping;

pub use escher::EscherHtmlRenderer;

pub const DEFAULT_SCALE_PRESET: &str = "GaBuRd";
pub const DEFAULT_ESCHER_URL: &str = "https://unpkg.com/escher@1.7.3/dist/escher.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Zoom,
    Pan,
    #[value(name = "none")]
    #[serde(rename = "none")]
    Disabled,
}

/// Presentation settings handed to every render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub reaction_scale_preset: String,
    pub scroll_behavior: ScrollBehavior,
    pub never_ask_before_quit: bool,
    pub escher_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            reaction_scale_preset: DEFAULT_SCALE_PRESET.to_string(),
            scroll_behavior: ScrollBehavior::Zoom,
            never_ask_before_quit: true,
            escher_url: DEFAULT_ESCHER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub column: &'a str,
    pub asset: &'a MapAsset,
    pub overlay: &'a Mapping,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("map asset {0} is not UTF-8 text")]
    NotText(String),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),
}

/// Turns one map asset plus one overlay into a self-contained page.
pub trait MapRenderer {
    fn render(
        &self,
        request: &RenderRequest<'_>,
        options: &RenderOptions,
    ) -> Result<String, RenderError>;
}
