//! Solid chroma tints

use super::ChromaDelta;

/// Tint every chroma pair of an NV12 buffer by one fixed delta
///
/// Walks the chroma plane, bytes `[width*height, width*height*3/2)`, two at
/// a time. The luma plane is left as-is, so brightness and detail survive
/// and only the color cast changes.
pub fn tint_chroma(buffer: &mut [u8], width: u32, height: u32, delta: ChromaDelta) {
    let luma_len = width as usize * height as usize;
    let chroma_end = luma_len * 3 / 2;

    for pair in buffer[luma_len..chroma_end].chunks_exact_mut(2) {
        delta.apply(pair);
    }
}
