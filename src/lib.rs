// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One-line-at-a-time lyrics practice for the terminal.
//!
//! The core is a small playback controller: a lyric set loaded once at
//! startup, a current line, and an autoplay timer with adjustable
//! tempo. Navigation wraps around at both ends.

pub mod config;
pub mod lyrics;
pub mod player;
pub mod ui;
