use anyhow::{Context, bail};
use log::debug;
use parking_lot::Mutex;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::{
    geometry::{Extent, GeometrySnapshot, GeometrySource},
    services::platform::Platform,
};

#[derive(Deserialize)]
struct SnapshotFile {
    /// Platform of the host the recording was taken on.
    #[serde(default)]
    platform: Option<Platform>,
    #[serde(flatten)]
    geometry: RecordedFrames,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordedFrames {
    Frames { frames: Vec<GeometrySnapshot> },
    Single(GeometrySnapshot),
}

/// Geometry recorded from a host and replayed to the classifier.
///
/// A popup that is still opening is recorded as leading frames with a zero inner
/// size; each poll of such a frame moves on to the next one. The first sized frame
/// (or the last frame) is reported for good.
#[derive(Debug)]
pub struct RecordedGeometry {
    frames: Vec<GeometrySnapshot>,
    cursor: Mutex<usize>,
    platform: Option<Platform>,
}

impl RecordedGeometry {
    pub fn new(frames: Vec<GeometrySnapshot>) -> anyhow::Result<Self> {
        if frames.is_empty() {
            bail!("geometry recording has no frames");
        }

        Ok(Self {
            frames,
            cursor: Mutex::new(0),
            platform: None,
        })
    }

    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let file: SnapshotFile = toml::from_str(content).context("invalid TOML geometry")?;
        Self::from_file(file)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content).context("invalid JSON geometry")?;
        Self::from_file(file)
    }

    fn from_file(file: SnapshotFile) -> anyhow::Result<Self> {
        let recording = match file.geometry {
            RecordedFrames::Frames { frames } => Self::new(frames),
            RecordedFrames::Single(snapshot) => Self::new(vec![snapshot]),
        }?;

        Ok(recording.with_platform(file.platform))
    }

    /// Load a recording, picking the format from the file extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read geometry from {}", path.display()))?;

        let recording = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
        .with_context(|| format!("failed to parse {}", path.display()))?;

        debug!(
            "Loaded {} geometry frame(s) from {}",
            recording.frames.len(),
            path.display()
        );

        Ok(recording)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Platform stored alongside the frames, if the recorder captured it.
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }
}

impl GeometrySource for RecordedGeometry {
    fn inner_size(&self) -> Extent {
        let mut cursor = self.cursor.lock();
        let inner = self.frames[*cursor].inner;
        if inner.is_degenerate() && *cursor + 1 < self.frames.len() {
            *cursor += 1;
        }
        inner
    }

    fn snapshot(&self) -> GeometrySnapshot {
        self.frames[*self.cursor.lock()]
    }
}
