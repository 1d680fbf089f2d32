//! Plot configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Histogram bin count; `None` picks Sturges' rule
    pub bins: Option<usize>,

    /// Overlay a Gaussian kernel density estimate on histograms
    pub kde: bool,

    pub font_family: String,

    pub caption_size: u32,

    pub label_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            bins: None,
            kde: true,
            font_family: "sans-serif".to_string(),
            caption_size: 20,
            label_size: 12,
        }
    }
}

impl PlotConfig {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
