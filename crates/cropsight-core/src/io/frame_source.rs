use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::frame::Frame;

use super::image_io::{is_frame_file, load_frame};

/// Result of asking a source for the next frame.
#[derive(Debug)]
pub enum FrameFetch {
    Frame(Frame),
    /// Transient failure; try again next cycle.
    Skip,
    Exhausted,
}

/// Anything that yields frames, e.g. a camera or a recorded sequence.
pub trait FrameSource {
    fn next_frame(&mut self) -> FrameFetch;

    /// Number of frames, if known in advance.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// Image files replayed in file-name order.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl ImageSequence {
    /// Collect the image files of `dir`, sorted by name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_frame_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        info!(dir = %dir.display(), frames = paths.len(), "Image sequence opened");
        Ok(Self::from_paths(paths))
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths, cursor: 0 }
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> FrameFetch {
        let Some(path) = self.paths.get(self.cursor) else {
            return FrameFetch::Exhausted;
        };
        self.cursor += 1;
        match load_frame(path) {
            Ok(frame) => FrameFetch::Frame(frame),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Could not decode frame");
                FrameFetch::Skip
            }
        }
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.paths.len())
    }
}

/// Frames held in memory, mostly for replay and tests.
pub struct FrameQueue {
    frames: std::collections::VecDeque<Frame>,
}

impl FrameQueue {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for FrameQueue {
    fn next_frame(&mut self) -> FrameFetch {
        self.frames
            .pop_front()
            .map_or(FrameFetch::Exhausted, FrameFetch::Frame)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}
