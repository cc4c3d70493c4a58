//! Sendable NV12 format capabilities
//!
//! The filter advertises a fixed set of output formats, one canonical
//! resolution/framerate pair per supported request width. A downstream
//! consumer asks for a resolution and gets the matching table entry back,
//! or the safe default when nothing matches.

use serde::{Deserialize, Serialize};

use crate::types::{Framerate, Resolution};

/// One sendable NV12 capability: a canonical resolution bound to a framerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFormat {
    pub resolution: Resolution,
    pub framerate: Framerate,
}

impl SendFormat {
    pub const fn new(width: u32, height: u32, fps: u32) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            framerate: Framerate::new(fps, 1),
        }
    }

    // Supported capability set
    pub const NV12_270X480_15: Self = Self::new(270, 480, 15);
    pub const NV12_320X180_15: Self = Self::new(320, 180, 15);
    pub const NV12_360X640_15: Self = Self::new(360, 640, 15);
    pub const NV12_424X240_15: Self = Self::new(424, 240, 15);
    pub const NV12_480X270_15: Self = Self::new(480, 270, 15);
    pub const NV12_480X848_30: Self = Self::new(480, 848, 30);
    pub const NV12_640X360_15: Self = Self::new(640, 360, 15);
    pub const NV12_720X1280_30: Self = Self::new(720, 1280, 30);
    pub const NV12_848X480_30: Self = Self::new(848, 480, 30);
    pub const NV12_960X540_30: Self = Self::new(960, 540, 30);
    pub const NV12_1280X720_30: Self = Self::new(1280, 720, 30);
    pub const NV12_1920X1080_30: Self = Self::new(1920, 1080, 30);

    /// Capability used when no table entry matches the request
    pub const DEFAULT: Self = Self::NV12_424X240_15;

    /// Every supported capability, ordered by request width
    pub const ALL: [Self; 12] = [
        Self::NV12_270X480_15,
        Self::NV12_320X180_15,
        Self::NV12_360X640_15,
        Self::NV12_424X240_15,
        Self::NV12_480X270_15,
        Self::NV12_480X848_30,
        Self::NV12_640X360_15,
        Self::NV12_720X1280_30,
        Self::NV12_848X480_30,
        Self::NV12_960X540_30,
        Self::NV12_1280X720_30,
        Self::NV12_1920X1080_30,
    ];

    /// Byte length of one NV12 frame in this format
    pub fn frame_len(&self) -> usize {
        self.resolution.nv12_len()
    }
}

impl std::fmt::Display for SendFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.resolution, self.framerate)
    }
}

/// Pick the send capability for a requested resolution
///
/// The lookup matches on width alone except for 480, where a height of 270
/// keeps the landscape entry and anything else maps to the portrait
/// 480x848 one. A width with no table entry falls back to
/// [`SendFormat::DEFAULT`] rather than failing.
pub fn select_send_format(requested: Resolution) -> SendFormat {
    match requested.width {
        270 => SendFormat::NV12_270X480_15,
        320 => SendFormat::NV12_320X180_15,
        360 => SendFormat::NV12_360X640_15,
        424 => SendFormat::NV12_424X240_15,
        480 if requested.height == 270 => SendFormat::NV12_480X270_15,
        480 => SendFormat::NV12_480X848_30,
        640 => SendFormat::NV12_640X360_15,
        720 => SendFormat::NV12_720X1280_30,
        848 => SendFormat::NV12_848X480_30,
        960 => SendFormat::NV12_960X540_30,
        1280 => SendFormat::NV12_1280X720_30,
        1920 => SendFormat::NV12_1920X1080_30,
        _ => SendFormat::DEFAULT,
    }
}
