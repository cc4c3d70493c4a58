//! Per-frame filter entry point
//!
//! `HueFilter` owns a session's hue selection and turns source frames into
//! freshly owned, effect-applied NV12 buffers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::effect::{apply_hue, HueMode};
use crate::types::{FilterStats, Resolution, VideoFrame};

/// Apply `mode` to one source buffer, returning a new owned frame
///
/// Exactly `width * height * 3 / 2` bytes are copied out of `data` before
/// any transform runs, so the result never aliases the source and the
/// source may be recycled immediately. That copy happens for
/// `HueMode::None` too. Panics if `data` holds fewer bytes than one frame
/// at the declared dimensions.
pub fn filter_frame(data: &[u8], width: u32, height: u32, mode: HueMode) -> Vec<u8> {
    let len = Resolution::new(width, height).nv12_len();
    let mut out = data[..len].to_vec();
    apply_hue(&mut out, width, height, mode);
    out
}

/// Session-scoped hue filter
///
/// The hue mode is fixed at construction; each `apply` is an independent
/// transformation of one frame, so a single filter can be shared across
/// worker threads. Counters track lifetime totals.
#[derive(Debug)]
pub struct HueFilter {
    mode: HueMode,
    frames_filtered: AtomicU64,
    bytes_out: AtomicU64,
}

impl HueFilter {
    /// Create a filter for one hue selection
    pub fn new(mode: HueMode) -> Self {
        Self {
            mode,
            frames_filtered: AtomicU64::new(0),
            bytes_out: AtomicU64::new(0),
        }
    }

    /// The session's hue mode
    pub fn mode(&self) -> HueMode {
        self.mode
    }

    /// Filter one frame into a new owned buffer
    pub fn apply(&self, frame: &VideoFrame) -> Vec<u8> {
        let out = filter_frame(&frame.data, frame.width, frame.height, self.mode);
        self.frames_filtered.fetch_add(1, Ordering::Relaxed);
        self.bytes_out.fetch_add(out.len() as u64, Ordering::Relaxed);
        tracing::trace!(
            "Filtered {}x{} frame ({})",
            frame.width,
            frame.height,
            self.mode
        );
        out
    }

    /// Counters accumulated since construction
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            frames_filtered: self.frames_filtered.load(Ordering::Relaxed),
            bytes_out: self.bytes_out.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_mode_copies() {
        let frame = VideoFrame::from_data((0..24).collect(), 4, 4);
        let out = filter_frame(&frame.data, 4, 4, HueMode::None);
        assert_eq!(out, frame.data);

        // The copy is independent of the source
        let mut out = out;
        out[0] = 99;
        assert_eq!(frame.data[0], 0);
    }

    #[test]
    fn test_oversized_source_truncated() {
        let data = vec![1u8; 30];
        let out = filter_frame(&data, 4, 4, HueMode::None);
        assert_eq!(out.len(), 24);
    }

    #[test]
    fn test_red_through_filter() {
        let filter = HueFilter::new(HueMode::Red);
        assert_eq!(filter.mode(), HueMode::Red);

        let frame = VideoFrame::new(2, 2);
        let out = filter.apply(&frame);
        assert_eq!(out, [0, 0, 0, 0, 0, 50]);
    }

    #[test]
    fn test_filter_counters() {
        let filter = HueFilter::new(HueMode::Blue);
        let frame = VideoFrame::new(2, 2);
        filter.apply(&frame);
        filter.apply(&frame);

        let stats = filter.stats();
        assert_eq!(stats.frames_filtered, 2);
        assert_eq!(stats.bytes_out, 12);
    }

    #[test]
    fn test_warhol_through_filter() {
        let filter = HueFilter::new(HueMode::Warhol);
        let frame = VideoFrame::new(4, 4);
        let out = filter.apply(&frame);
        assert_eq!(out.len(), 24);
        assert_eq!(&out[16..], [84, 255, 0, 0, 255, 120, 0, 148]);
    }
}
