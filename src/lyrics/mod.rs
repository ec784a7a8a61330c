// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lyric set model and line sources.
//!
//! A lyric file is plain text with one lyric line per non-empty text
//! line. Blank lines are filtered out at parse time and the resulting
//! set is immutable for the rest of the session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Error fetching the lyric source
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read
    #[error("failed to read lyric source: {0}")]
    Io(#[from] io::Error),
}

/// A source of raw lyric text, fetched once at startup
pub trait LineSource {
    /// Fetch the full text of the source
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Line source backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn fetch(&self) -> Result<String, LoadError> {
        let text = fs::read_to_string(&self.path)?;
        debug!(path = %self.path.display(), bytes = text.len(), "lyric source read");
        Ok(text)
    }
}

/// An ordered, immutable set of lyric lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSet {
    lines: Vec<String>,
}

impl LyricSet {
    /// Parse raw text into a lyric set, trimming lines and dropping
    /// empty ones. An empty result is a valid degenerate set.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { lines }
    }

    /// Create an empty set
    pub fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the set has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line at an index, if in range
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Index after `index`, wrapping past the last line to the first.
    /// Meaningful only for a non-empty set.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.lines.len() {
            index + 1
        } else {
            0
        }
    }

    /// Index before `index`, wrapping before the first line to the last.
    /// Meaningful only for a non-empty set.
    pub fn prev_index(&self, index: usize) -> usize {
        if index > 0 {
            index - 1
        } else {
            self.lines.len().saturating_sub(1)
        }
    }
}
