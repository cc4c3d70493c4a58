//! Raw NV12 file transport
//!
//! A `.nv12` file is nothing but consecutive `width * height * 3 / 2`-byte
//! frames, no header and no timing. The dimensions travel out of band, so
//! both ends of the transport are constructed with an explicit resolution.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Resolution, VideoFrame};

/// Sequential reader of raw NV12 frames
#[derive(Debug)]
pub struct RawFrameReader {
    reader: BufReader<File>,
    resolution: Resolution,
    frame_len: usize,
    frames_read: u64,
}

impl RawFrameReader {
    /// Open `path` for reading frames at `resolution`
    pub fn open(path: impl AsRef<Path>, resolution: Resolution) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let frame_len = resolution.nv12_len();
        tracing::debug!(
            "Reading {} ({} bytes/frame at {})",
            path.display(),
            frame_len,
            resolution
        );
        Ok(Self {
            reader: BufReader::new(file),
            resolution,
            frame_len,
            frames_read: 0,
        })
    }

    /// Read the next frame, `Ok(None)` at clean end of stream
    ///
    /// A trailing partial frame is reported as [`Error::TruncatedFrame`].
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        let mut data = vec![0u8; self.frame_len];
        let mut filled = 0;

        while filled < self.frame_len {
            match self.reader.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.frame_len {
            return Err(Error::TruncatedFrame {
                expected: self.frame_len,
                got: filled,
            });
        }

        self.frames_read += 1;
        Ok(Some(VideoFrame::from_data(
            data,
            self.resolution.width,
            self.resolution.height,
        )))
    }

    /// Frames read so far
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

/// Sequential writer of raw NV12 frames
#[derive(Debug)]
pub struct RawFrameWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    frames_written: u64,
    bytes_written: u64,
}

impl RawFrameWriter {
    /// Create or truncate `path` for writing
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            frames_written: 0,
            bytes_written: 0,
        })
    }

    /// Append one frame's bytes
    pub fn write_frame(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.frames_written += 1;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Flush buffered bytes and log the totals
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        tracing::info!(
            "Output finished: {} ({} frames, {} bytes, {:.2} MB)",
            self.path.display(),
            self.frames_written,
            self.bytes_written,
            self.bytes_written as f64 / 1_000_000.0
        );
        Ok(())
    }

    /// Frames written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.nv12");
        let resolution = Resolution::new(4, 2);

        let mut writer = RawFrameWriter::create(&path).unwrap();
        for i in 0..3u8 {
            writer.write_frame(&vec![i; resolution.nv12_len()]).unwrap();
        }
        writer.finish().unwrap();
        assert_eq!(writer.frames_written(), 3);
        assert_eq!(writer.bytes_written(), 36);

        let mut reader = RawFrameReader::open(&path, resolution).unwrap();
        for i in 0..3u8 {
            let frame = reader.next_frame().unwrap().unwrap();
            assert_eq!(frame.width, 4);
            assert_eq!(frame.height, 2);
            assert!(frame.data.iter().all(|&b| b == i));
        }
        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(reader.frames_read(), 3);
    }

    #[test]
    fn test_empty_file_yields_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.nv12");
        std::fs::write(&path, []).unwrap();

        let mut reader = RawFrameReader::open(&path, Resolution::new(2, 2)).unwrap();
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_partial_tail_is_truncation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.nv12");
        // One full 2x2 frame (6 bytes) plus half a frame
        std::fs::write(&path, [1u8; 9]).unwrap();

        let mut reader = RawFrameReader::open(&path, Resolution::new(2, 2)).unwrap();
        assert!(reader.next_frame().unwrap().is_some());
        match reader.next_frame() {
            Err(Error::TruncatedFrame { expected, got }) => {
                assert_eq!(expected, 6);
                assert_eq!(got, 3);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn test_create_makes_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/clip.nv12");
        let mut writer = RawFrameWriter::create(&path).unwrap();
        writer.write_frame(&[0u8; 6]).unwrap();
        writer.finish().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RawFrameReader::open("/nonexistent/clip.nv12", Resolution::new(2, 2))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_data_error());
    }
}
