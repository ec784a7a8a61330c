// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::Event;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lyric_trainer::config::ConfigFile;
use lyric_trainer::lyrics::{FileSource, LineSource, LyricSet};
use lyric_trainer::player::PlayerController;
use lyric_trainer::ui::{App, KeyAction};

fn print_usage() {
    println!("LYRIC-TRAINER - One-line-at-a-time lyrics practice");
    println!();
    println!("Usage: lyric-trainer [FILE] [OPTIONS]");
    println!();
    println!("Arguments:");
    println!("  FILE                    Lyric text file (one line per lyric line)");
    println!();
    println!("Options:");
    println!("  --config <PATH>         Load settings from a YAML config file");
    println!("  --tempo <SECS>          Autoplay tempo in seconds per line");
    println!("  --check <FILE>          Report the usable line count of a lyric file");
    println!("  --help                  Show this help message");
}

/// Parse a lyric file and report what the trainer would load
fn check_lyrics(path: &str) -> Result<()> {
    let source = FileSource::new(path);
    let text = source
        .fetch()
        .with_context(|| format!("Failed to read lyric file: {}", path))?;
    let set = LyricSet::parse(&text);

    if set.is_empty() {
        println!("{}: no usable lines (all blank)", path);
    } else {
        println!("{}: {} usable lines", path, set.len());
        println!("  first: {}", set.line(0).unwrap_or_default());
        println!("  last:  {}", set.line(set.len() - 1).unwrap_or_default());
    }
    Ok(())
}

/// Set up file logging when RUST_LOG is present. The terminal belongs
/// to the TUI, so log output goes to a file next to the binary.
fn init_logging() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        return Ok(());
    }
    let file = File::create("lyric-trainer.log").context("Failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the trainer UI until quit
fn run(config: &ConfigFile) -> Result<()> {
    let source = FileSource::new(&config.playback.lyrics_path);
    let mut controller = PlayerController::load(&source, &config.playback);

    let mut app = App::new(config.display.frame_rate)?;
    info!("ui started");

    while app.is_running() {
        // Drive the autoplay timer before waiting on input
        controller.poll();

        if let Some(event) = app.poll_event(controller.time_until_tick())? {
            if App::is_press(&event) {
                if let Event::Key(key) = event {
                    let action = app.handle_key(key.code, key.modifiers);
                    apply_action(&mut controller, action);
                }
            }
        }

        app.draw(&controller.view())?;
    }

    // Teardown: release the timer before the terminal is restored
    controller.stop();
    info!("ui stopped");
    Ok(())
}

/// Apply a key action to the controller
fn apply_action(controller: &mut PlayerController, action: KeyAction) {
    match action {
        KeyAction::TogglePlay => controller.toggle_play(),
        // Buttons interrupt autoplay before navigating
        KeyAction::NextLine => controller.step_next(),
        KeyAction::PrevLine => controller.step_prev(),
        // Arrows navigate only while stopped; the controller gates this
        KeyAction::SeekForward => controller.seek_next(),
        KeyAction::SeekBack => controller.seek_prev(),
        KeyAction::TempoUp => controller.nudge_tempo(1),
        KeyAction::TempoDown => controller.nudge_tempo(-1),
        KeyAction::None | KeyAction::Quit | KeyAction::ToggleHelp => {}
    }
}

/// Validate the loaded configuration, then fold in a `--tempo`
/// override clamped to the configured range. Validation must come
/// first: clamping against an inverted range would panic before the
/// range error could be reported.
fn finalize_config(config: &mut ConfigFile, tempo_override: Option<u64>) -> Result<()> {
    config.validate()?;
    if let Some(secs) = tempo_override {
        config.playback.tempo_secs = secs.clamp(
            config.playback.min_tempo_secs,
            config.playback.max_tempo_secs,
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut config = ConfigFile::default();
    let mut lyrics_file: Option<String> = None;
    let mut tempo_override: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--check" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --check requires a file path");
                    std::process::exit(1);
                }
                return check_lyrics(&args[i + 1]);
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config = ConfigFile::load(&args[i + 1])?;
                i += 1;
            }
            "--tempo" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --tempo requires a value in seconds");
                    std::process::exit(1);
                }
                let secs: u64 = args[i + 1]
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid tempo: {}", args[i + 1]))?;
                tempo_override = Some(secs);
                i += 1;
            }
            arg if arg.starts_with("--") => {
                eprintln!("Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            arg => {
                if lyrics_file.is_some() {
                    eprintln!("Unexpected argument: {}", arg);
                    print_usage();
                    std::process::exit(1);
                }
                lyrics_file = Some(arg.to_string());
            }
        }
        i += 1;
    }

    if let Some(file) = lyrics_file {
        config.playback.lyrics_path = file;
    }
    finalize_config(&mut config, tempo_override)?;

    init_logging()?;
    info!(lyrics = %config.playback.lyrics_path, "starting");

    if !Path::new(&config.playback.lyrics_path).exists() {
        // The controller will show its load-error sentinel
        info!("lyric file missing, running with sentinel display");
    }

    run(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_reports_inverted_range_instead_of_panicking() {
        let mut config = ConfigFile::default();
        config.playback.min_tempo_secs = 8;
        config.playback.max_tempo_secs = 3;

        let result = finalize_config(&mut config, Some(5));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_tempo_secs"));
    }

    #[test]
    fn test_finalize_clamps_tempo_override() {
        let mut config = ConfigFile::default();
        finalize_config(&mut config, Some(99)).unwrap();
        assert_eq!(config.playback.tempo_secs, 10);

        finalize_config(&mut config, Some(0)).unwrap();
        assert_eq!(config.playback.tempo_secs, 1);
    }

    #[test]
    fn test_finalize_without_override_keeps_config_tempo() {
        let mut config = ConfigFile::default();
        config.playback.tempo_secs = 4;
        finalize_config(&mut config, None).unwrap();
        assert_eq!(config.playback.tempo_secs, 4);
    }
}
