//! Raw-file filter pipeline
//!
//! Connects reader → filter workers → writer for headerless NV12 files.
//! Each frame is tagged with its input index on the way in, and the writer
//! restores input order before touching the file, so worker count never
//! changes the output bytes.

use std::collections::BTreeMap;
use std::path::Path;
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::filter::HueFilter;
use crate::raw::{RawFrameReader, RawFrameWriter};
use crate::types::VideoFrame;

/// Depth of the bounded hand-off queues between stages
const QUEUE_DEPTH: usize = 4;

/// Totals reported after a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineSummary {
    /// Frames read from the input
    pub frames_in: u64,
    /// Frames written to the output
    pub frames_out: u64,
    /// Bytes written to the output
    pub bytes_out: u64,
    /// Wall-clock processing time in seconds
    pub elapsed_secs: f64,
    /// Input ended on a partial frame that was dropped
    pub truncated_input: bool,
}

impl PipelineSummary {
    /// Average throughput in frames per second
    pub fn fps(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.frames_out as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

/// One frame in flight, tagged with its input position
struct IndexedFrame {
    index: u64,
    frame: VideoFrame,
}

/// One filtered result, tagged for reordering
struct IndexedResult {
    index: u64,
    data: Vec<u8>,
}

/// Filter a raw NV12 file into another raw NV12 file
///
/// Reads `input` at the configured resolution, runs every frame through the
/// configured hue filter and writes the results to `output` in input order.
/// A partial frame at the end of the input is dropped with a warning rather
/// than failing the whole run.
pub fn run_file_pipeline(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<PipelineSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    if input == output {
        return Err(Error::Pipeline(
            "Input and output paths must differ".into(),
        ));
    }

    let start = Instant::now();
    let mut reader = RawFrameReader::open(input, config.resolution)?;
    let mut writer = RawFrameWriter::create(output)?;
    let filter = HueFilter::new(config.filter.hue);

    tracing::info!(
        "Pipeline starting: {} @ {}, {} worker(s)",
        config.filter.hue,
        config.resolution,
        config.workers.max(1)
    );

    let mut truncated = false;
    let frames_in = if config.workers <= 1 {
        run_sequential(&mut reader, &mut writer, &filter, config, &mut truncated)?
    } else {
        run_parallel(&mut reader, &mut writer, &filter, config, &mut truncated)?
    };

    writer.finish()?;

    let summary = PipelineSummary {
        frames_in,
        frames_out: writer.frames_written(),
        bytes_out: writer.bytes_written(),
        elapsed_secs: start.elapsed().as_secs_f64(),
        truncated_input: truncated,
    };
    tracing::info!(
        "Pipeline finished: {} frames in {:.2}s ({:.1} fps)",
        summary.frames_out,
        summary.elapsed_secs,
        summary.fps()
    );
    Ok(summary)
}

/// Read, filter and write on the calling thread
fn run_sequential(
    reader: &mut RawFrameReader,
    writer: &mut RawFrameWriter,
    filter: &HueFilter,
    config: &PipelineConfig,
    truncated: &mut bool,
) -> Result<u64> {
    let mut frames_in = 0u64;

    loop {
        if let Some(cap) = config.frame_cap {
            if frames_in >= cap {
                tracing::debug!("Frame cap {} reached", cap);
                break;
            }
        }
        match reader.next_frame() {
            Ok(Some(frame)) => {
                frames_in += 1;
                writer.write_frame(&filter.apply(&frame))?;
            }
            Ok(None) => break,
            Err(e) if e.is_data_error() => {
                tracing::warn!("Dropping partial frame at end of input: {}", e);
                *truncated = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(frames_in)
}

/// Fan frames out to filter workers, restore order on the writer thread
fn run_parallel(
    reader: &mut RawFrameReader,
    writer: &mut RawFrameWriter,
    filter: &HueFilter,
    config: &PipelineConfig,
    truncated: &mut bool,
) -> Result<u64> {
    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<IndexedFrame>(QUEUE_DEPTH);
    let (result_tx, result_rx) = crossbeam_channel::bounded::<IndexedResult>(QUEUE_DEPTH);

    let first_error: Mutex<Option<Error>> = Mutex::new(None);
    let mut frames_in = 0u64;

    thread::scope(|scope| {
        // Filter workers: pull indexed frames, push indexed results
        for _ in 0..config.workers {
            let frame_rx = frame_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for IndexedFrame { index, frame } in frame_rx.iter() {
                    let data = filter.apply(&frame);
                    if result_tx.send(IndexedResult { index, data }).is_err() {
                        break;
                    }
                }
            });
        }
        // The originals must go so the channels close once the reader and
        // the workers hang up
        drop(frame_rx);
        drop(result_tx);

        // Writer: results arrive in completion order, the file gets them
        // in input order
        let error_slot = &first_error;
        scope.spawn(move || {
            let mut pending: BTreeMap<u64, Vec<u8>> = BTreeMap::new();
            let mut next_index = 0u64;

            'drain: for IndexedResult { index, data } in result_rx.iter() {
                pending.insert(index, data);
                while let Some(ready) = pending.remove(&next_index) {
                    if let Err(e) = writer.write_frame(&ready) {
                        record_error(error_slot, e);
                        break 'drain;
                    }
                    next_index += 1;
                }
            }
        });

        // Reader stays on the calling thread
        loop {
            if let Some(cap) = config.frame_cap {
                if frames_in >= cap {
                    tracing::debug!("Frame cap {} reached", cap);
                    break;
                }
            }
            match reader.next_frame() {
                Ok(Some(frame)) => {
                    let indexed = IndexedFrame {
                        index: frames_in,
                        frame,
                    };
                    frames_in += 1;
                    // A closed channel means downstream failed and recorded why
                    if frame_tx.send(indexed).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) if e.is_data_error() => {
                    tracing::warn!("Dropping partial frame at end of input: {}", e);
                    *truncated = true;
                    break;
                }
                Err(e) => {
                    record_error(&first_error, e);
                    break;
                }
            }
        }
        drop(frame_tx);
    });

    match first_error.into_inner() {
        Some(error) => Err(error),
        None => Ok(frames_in),
    }
}

/// Keep the first error a pipeline stage hits
fn record_error(slot: &Mutex<Option<Error>>, error: Error) {
    let mut slot = slot.lock();
    if slot.is_none() {
        tracing::error!("Pipeline stage failed: {}", error);
        *slot = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::effect::HueMode;
    use crate::filter::filter_frame;
    use crate::types::Resolution;
    use std::fs;

    /// Write `frames` deterministic frames and return them individually
    fn write_test_clip(path: &Path, resolution: Resolution, frames: usize) -> Vec<Vec<u8>> {
        let len = resolution.nv12_len();
        let mut clip = Vec::new();
        let mut file_bytes = Vec::new();
        for i in 0..frames {
            let frame: Vec<u8> = (0..len).map(|j| ((i * 31 + j) % 251) as u8).collect();
            file_bytes.extend_from_slice(&frame);
            clip.push(frame);
        }
        fs::write(path, file_bytes).unwrap();
        clip
    }

    #[test]
    fn test_sequential_none_copies_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        let output = dir.path().join("out.nv12");
        write_test_clip(&input, Resolution::new(4, 4), 5);

        let config = PipelineConfig::default().with_resolution(4, 4);
        let summary = run_file_pipeline(&input, &output, &config).unwrap();

        assert_eq!(summary.frames_in, 5);
        assert_eq!(summary.frames_out, 5);
        assert_eq!(summary.bytes_out, 120);
        assert!(!summary.truncated_input);
        assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn test_parallel_preserves_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        let output = dir.path().join("out.nv12");
        write_test_clip(&input, Resolution::new(4, 4), 24);

        let config = PipelineConfig::default()
            .with_resolution(4, 4)
            .with_workers(4);
        let summary = run_file_pipeline(&input, &output, &config).unwrap();

        assert_eq!(summary.frames_out, 24);
        // Pass-through output must be byte-identical, any reordering shows
        assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        let clip = write_test_clip(&input, Resolution::new(8, 8), 6);

        let run = |workers: usize, name: &str| {
            let output = dir.path().join(name);
            let config = PipelineConfig::default()
                .with_resolution(8, 8)
                .with_filter(FilterConfig::default().with_hue(HueMode::Warhol))
                .with_workers(workers);
            run_file_pipeline(&input, &output, &config).unwrap();
            fs::read(&output).unwrap()
        };

        let sequential = run(1, "seq.nv12");
        let parallel = run(3, "par.nv12");
        assert_eq!(sequential, parallel);

        // Both must equal the plain per-frame filter output
        let expected: Vec<u8> = clip
            .iter()
            .flat_map(|frame| filter_frame(frame, 8, 8, HueMode::Warhol))
            .collect();
        assert_eq!(sequential, expected);
    }

    #[test]
    fn test_frame_cap_stops_early() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        let output = dir.path().join("out.nv12");
        write_test_clip(&input, Resolution::new(4, 4), 5);

        let config = PipelineConfig::default()
            .with_resolution(4, 4)
            .with_frame_cap(2);
        let summary = run_file_pipeline(&input, &output, &config).unwrap();

        assert_eq!(summary.frames_out, 2);
        assert_eq!(fs::read(&output).unwrap().len(), 48);
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        let output = dir.path().join("out.nv12");
        let mut bytes = vec![3u8; 2 * 24];
        bytes.extend_from_slice(&[9u8; 5]);
        fs::write(&input, bytes).unwrap();

        let config = PipelineConfig::default().with_resolution(4, 4);
        let summary = run_file_pipeline(&input, &output, &config).unwrap();

        assert!(summary.truncated_input);
        assert_eq!(summary.frames_in, 2);
        assert_eq!(summary.frames_out, 2);
    }

    #[test]
    fn test_same_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.nv12");
        write_test_clip(&input, Resolution::new(4, 4), 1);

        let config = PipelineConfig::default().with_resolution(4, 4);
        let err = run_file_pipeline(&input, &input, &config).unwrap_err();
        assert!(matches!(err, Error::Pipeline(_)));
    }
}
