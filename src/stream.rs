//! Collaborator seams of the frame loop.
//!
//! - [`FrameSource`] delivers frames; `None` marks end-of-stream.
//! - [`RenderSink`] receives one [`FrameReport`] per processed tick.
//!
//! File-backed implementations are provided for the command-line tools.
use crate::diagnostics::FrameReport;
use crate::error::{GaugeError, Result};
use crate::image::io::{ensure_parent_dir, load_color_frame};
use crate::image::OwnedFrame;
use log::{debug, warn};
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait FrameSource {
    /// Next frame, an error for a frame that could not be acquired, or
    /// `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Option<Result<OwnedFrame>>;
}

pub trait RenderSink {
    fn render(&mut self, report: &FrameReport);
}

impl<F> FrameSource for F
where
    F: FnMut() -> Option<Result<OwnedFrame>>,
{
    fn next_frame(&mut self) -> Option<Result<OwnedFrame>> {
        self()
    }
}

/// Keeps every report in memory.
impl RenderSink for Vec<FrameReport> {
    fn render(&mut self, report: &FrameReport) {
        self.push(report.clone());
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Reads one frame per image file, in path order.
#[derive(Clone, Debug, Default)]
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut paths: Vec<PathBuf> = paths.into_iter().collect();
        paths.sort();
        Self {
            paths: paths.into(),
        }
    }

    /// Every image file directly inside `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .map_err(|e| GaugeError::Io(format!("Failed to list {}: {e}", dir.display())))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| GaugeError::Io(format!("Failed to list {}: {e}", dir.display())))?
                .path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image && path.is_file() {
                paths.push(path);
            }
        }
        debug!("image sequence {}: {} frames", dir.display(), paths.len());
        Ok(Self::from_paths(paths))
    }

    /// Frames not yet delivered.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Option<Result<OwnedFrame>> {
        let path = self.paths.pop_front()?;
        Some(load_color_frame(&path).map_err(GaugeError::Io))
    }
}

/// Writes each report as one line of JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    failures: usize,
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: &Path) -> std::result::Result<Self, String> {
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failures: 0,
        }
    }

    /// Reports that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_report(&mut self, report: &FrameReport) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, report: &FrameReport) {
        if let Err(e) = self.write_report(report) {
            self.failures += 1;
            warn!("Failed to write frame report: {e}");
        }
    }
}
