//! Four-quadrant pop-art split
//!
//! Two passes over one NV12 buffer. The geometry pass decimates the luma
//! plane into four identical quadrant copies of the frame; the color pass
//! flattens all chroma to neutral grey and pushes each quadrant toward its
//! own hue.

use super::ChromaDelta;

/// Neutral chroma value; a (128, 128) pair carries no color
const GREY: u8 = 128;

/// Image quadrant a chroma pair falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// All quadrants, reading order
    pub const ALL: [Self; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Chroma tint applied to this quadrant after desaturation
    pub const fn tint(self) -> ChromaDelta {
        match self {
            Quadrant::UpperLeft => ChromaDelta::new(-44, 127),
            Quadrant::UpperRight => ChromaDelta::new(-128, -128),
            Quadrant::LowerLeft => ChromaDelta::new(127, -8),
            Quadrant::LowerRight => ChromaDelta::new(-128, 20),
        }
    }

    /// Position plus the hue it carries
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::UpperLeft => "upper-left (red)",
            Quadrant::UpperRight => "upper-right (green)",
            Quadrant::LowerLeft => "lower-left (blue)",
            Quadrant::LowerRight => "lower-right (yellow)",
        }
    }

    /// Which quadrant covers the chroma pair at byte `offset` into a chroma
    /// plane of `rows` rows, each `width` bytes wide
    ///
    /// Both comparisons are strict, so a pair exactly on the row midline or
    /// the column threshold lands in the lower or right half.
    fn covering(offset: usize, width: usize, rows: usize) -> Self {
        let upper = offset < width * rows / 2;
        let left = offset % width < width / 2;
        match (upper, left) {
            (true, true) => Quadrant::UpperLeft,
            (true, false) => Quadrant::UpperRight,
            (false, true) => Quadrant::LowerLeft,
            (false, false) => Quadrant::LowerRight,
        }
    }
}

/// Retile the luma plane into four quadrant copies of the frame
///
/// Every even-coordinate sample `(x, y)` is replicated to `(x/2, y/2)` in
/// each of the four quadrants, discarding the odd rows and columns. Source
/// and destination regions overlap, so reads go through a snapshot taken
/// before the first write. Chroma bytes are not part of the copy. Odd
/// dimensions truncate the quadrant grid; every write still lands inside
/// the `width * height * 3 / 2` frame buffer.
pub fn split_quadrants(buffer: &mut [u8], width: u32, height: u32) {
    let w = width as usize;
    let h = height as usize;
    let half_w = w / 2;
    // Offset from a top quadrant sample to its bottom twin, h/2 rows down
    let lower = w * h / 2;

    let source = buffer[..w * h].to_vec();

    for y in (0..h).step_by(2) {
        let src_row = y * w;
        // Top-left destination for this source row, (y/2) * w when the
        // width is even
        let mut dst = y * half_w;
        for x in (0..w).step_by(2) {
            let sample = source[src_row + x];
            buffer[dst] = sample;
            buffer[dst + half_w] = sample;
            buffer[dst + lower] = sample;
            buffer[dst + lower + half_w] = sample;
            dst += 1;
        }
    }
}

/// Grey out the chroma plane and tint each pair by the quadrant it covers
///
/// Every pair is first forced to neutral grey, discarding the source color
/// entirely, then shifted by its quadrant's tint. The chroma plane is
/// `height / 2` rows of `width` bytes; quadrant membership comes from the
/// pair's byte offset within that plane.
pub fn tint_quadrants(buffer: &mut [u8], width: u32, height: u32) {
    let w = width as usize;
    let h = height as usize;
    let luma_len = w * h;
    let chroma = &mut buffer[luma_len..luma_len * 3 / 2];

    for (i, pair) in chroma.chunks_exact_mut(2).enumerate() {
        pair[0] = GREY;
        pair[1] = GREY;
        Quadrant::covering(i * 2, w, h / 2).tint().apply(pair);
    }
}
