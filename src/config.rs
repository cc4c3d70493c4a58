//! Configuration types for HueStream

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effect::HueMode;
use crate::error::{Error, Result};
use crate::format::{select_send_format, SendFormat};
use crate::types::Resolution;

/// Filter session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Hue effect applied to every frame
    pub hue: HueMode,
    /// Resolution the downstream consumer asked for; resolved against the
    /// capability table by `send_format`
    pub requested: Option<Resolution>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hue: HueMode::None,
            requested: None,
        }
    }
}

impl FilterConfig {
    pub fn with_hue(mut self, hue: HueMode) -> Self {
        self.hue = hue;
        self
    }

    pub fn with_requested(mut self, width: u32, height: u32) -> Self {
        self.requested = Some(Resolution::new(width, height));
        self
    }

    /// Send capability to advertise for this session
    ///
    /// With no requested resolution the table default is used, same as an
    /// unmatched request.
    pub fn send_format(&self) -> SendFormat {
        match self.requested {
            Some(resolution) => select_send_format(resolution),
            None => SendFormat::DEFAULT,
        }
    }
}

/// File pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input frame resolution; raw NV12 files carry no header, so the
    /// caller declares it
    pub resolution: Resolution,
    /// Filter settings
    pub filter: FilterConfig,
    /// Filter worker threads (0 or 1 runs the filter on the reader thread)
    pub workers: usize,
    /// Stop after this many frames (None = run to end of input)
    pub frame_cap: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            filter: FilterConfig::default(),
            workers: 1,
            frame_cap: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Resolution::new(width, height);
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_frame_cap(mut self, cap: u64) -> Self {
        self.frame_cap = Some(cap);
        self
    }

    /// Load a pipeline configuration from a TOML file
    ///
    /// ```toml
    /// workers = 4
    /// resolution = { width = 1280, height = 720 }
    ///
    /// [filter]
    /// hue = "warhol"
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        tracing::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }
}
