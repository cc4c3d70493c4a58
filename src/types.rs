//! Common types used throughout HueStream

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Calculate total pixels
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Byte length of one NV12 frame at this resolution
    pub const fn nv12_len(&self) -> usize {
        self.width as usize * self.height as usize * 3 / 2
    }

    /// Both dimensions even, so the quadrant grid divides the frame exactly
    pub fn is_even(&self) -> bool {
        self.width % 2 == 0 && self.height % 2 == 0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(424, 240)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Framerate representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framerate {
    pub num: u32,
    pub den: u32,
}

impl Framerate {
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    // Common framerates
    pub const FPS_15: Self = Self::new(15, 1);
    pub const FPS_30: Self = Self::new(30, 1);

    /// Get framerate as f64
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Get framerate as integer fps (numerator when den=1)
    pub fn fps(&self) -> u32 {
        if self.den == 0 {
            self.num
        } else {
            self.num / self.den
        }
    }
}

impl Default for Framerate {
    fn default() -> Self {
        Self::FPS_15
    }
}

impl std::fmt::Display for Framerate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{} fps", self.num)
        } else {
            write!(f, "{:.2} fps", self.as_f64())
        }
    }
}

/// A raw NV12 video frame
///
/// The buffer is `width * height` luma (Y) bytes followed by
/// `width * height / 2` interleaved chroma bytes (U/V pairs, one pair per
/// 2x2 pixel block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Raw NV12 data
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

impl VideoFrame {
    /// Create a new zeroed frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; Resolution::new(width, height).nv12_len()],
            width,
            height,
        }
    }

    /// Create a frame from existing NV12 data
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Get resolution
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Expected buffer length for the declared dimensions
    pub fn expected_len(&self) -> usize {
        self.resolution().nv12_len()
    }

    /// Luma (Y) plane
    pub fn luma(&self) -> &[u8] {
        &self.data[..self.luma_len()]
    }

    /// Interleaved chroma (UV) plane
    pub fn chroma(&self) -> &[u8] {
        &self.data[self.luma_len()..self.expected_len()]
    }

    /// Check that the buffer holds exactly one frame at the declared size
    pub fn validate(&self) -> Result<()> {
        let expected = self.expected_len();
        if self.data.len() != expected {
            return Err(Error::FrameSize {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    fn luma_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct FilterStats {
    /// Frames run through the filter
    pub frames_filtered: u64,
    /// Total bytes produced
    pub bytes_out: u64,
}
