//! HueStream — real-time NV12 hue effects
//!
//! Color-transform filters for raw NV12 video frames: solid chroma tints
//! and a four-quadrant pop-art split, applied in place per frame.
//!
//! # Features
//!
//! - **Effects**: red/green/blue solid tints and the "Warhol" quadrant split
//! - **Capabilities**: fixed sendable-format table with width-match lookup
//! - **Pipeline**: filter raw `.nv12` files with optional worker threads
//!
//! # Example
//!
//! ```rust
//! use huestream::{HueFilter, HueMode, VideoFrame};
//!
//! let frame = VideoFrame::new(1280, 720);
//! let filter = HueFilter::new(HueMode::Warhol);
//! let filtered = filter.apply(&frame);
//! assert_eq!(filtered.len(), frame.data.len());
//! ```

pub mod config;
pub mod effect;
pub mod error;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod raw;
pub mod types;

// Re-exports for convenience
pub use config::{FilterConfig, PipelineConfig};
pub use effect::{apply_hue, ChromaDelta, HueMode, Quadrant};
pub use error::{Error, Result};
pub use filter::{filter_frame, HueFilter};
pub use format::{select_send_format, SendFormat};
pub use pipeline::{run_file_pipeline, PipelineSummary};
pub use types::{FilterStats, Framerate, Resolution, VideoFrame};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
