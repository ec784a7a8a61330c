// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback controller.
//!
//! Owns the lyric set, the current line, the play/stop state and the
//! tempo. The UI consumes snapshots via [`PlayerController::view`]
//! and never touches the state machine directly.

pub mod controller;
pub mod ticker;

pub use controller::{DisplayState, LineView, PlayerController, PlayerView, Sentinel};
pub use ticker::Ticker;
