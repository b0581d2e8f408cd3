/// Main entry point for JEDI Player
use anyhow::Context;
use clap::Parser;
use jedi_player::{App, Catalog, Config, PlaybackController, PlaybackState, PlayerError, TickOutcome};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "JEDI Player",
    version = "0.1.0",
    about = "Terminal music player mockup with simulated playback",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Append logs to this file; the TUI discards logs otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Start the interactive UI
    Tui,

    /// Show the initial playback state
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the tracks of the playlist
    Playlist,

    /// Run the progress simulation without a terminal UI
    Simulate {
        /// Number of timer ticks to run
        #[arg(short, long, default_value_t = 10)]
        ticks: usize,

        /// Enable repeat before playing
        #[arg(short, long)]
        repeat: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Outcome of a headless simulation run
#[derive(Debug, Serialize)]
struct SimulationReport {
    ticks: usize,
    advanced: usize,
    looped: usize,
    /// Tick on which playback reached the end, counted from 1
    finished_at: Option<usize>,
    elapsed: String,
    state: PlaybackState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::read(args.config.as_deref()).context("Failed to load configuration")?;

    let tui = matches!(args.command, None | Some(Command::Tui));
    let level = args.log_level.as_deref().unwrap_or(&config.general.log_level);
    init_logging(level, args.log_file.as_deref(), tui)?;

    info!("Starting JEDI Player v0.1.0");
    let config = config.validate();
    let catalog = Catalog::sample().context("Failed to build the sample catalog")?;
    info!("Catalog ready with {} tracks", catalog.tracks.len());

    match args.command {
        Some(Command::Tui) | None => {
            info!("Starting TUI mode");
            let app = App::new(catalog, &config);
            jedi_player::ui::run(app, &config).await?;
        }
        Some(Command::Status { json }) => {
            handle_status_command(&catalog, &config, json)?;
        }
        Some(Command::Playlist) => {
            handle_playlist_command(&catalog, &config);
        }
        Some(Command::Simulate {
            ticks,
            repeat,
            json,
        }) => {
            handle_simulate_command(&catalog, &config, ticks, repeat, json)?;
        }
        Some(Command::Config) => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(level: &str, log_file: Option<&Path>, tui: bool) -> anyhow::Result<()> {
    let level_filter: LevelFilter = level
        .parse()
        .map_err(|_| PlayerError::InvalidLogLevel(level.to_string()))?;
    let builder = tracing_subscriber::fmt().with_max_level(level_filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // The alternate screen would be corrupted by log lines
        None if tui => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn controller(catalog: &Catalog, config: &Config) -> PlaybackController {
    PlaybackController::with_config(catalog.playlist.clone(), &config.player)
        .with_favorites(catalog.favorites.iter().copied())
}

fn handle_status_command(catalog: &Catalog, config: &Config, json: bool) -> anyhow::Result<()> {
    let controller = controller(catalog, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
        return Ok(());
    }

    let track = controller.current_track();
    let heart = if controller.is_favorite() { " ♥" } else { "" };
    println!("Current playback status:");
    println!("  Track:    {} - {}{}", track.title, track.artist, heart);
    println!(
        "  Position: {} / {} ({:.1}%)",
        controller.elapsed_label(),
        track.duration,
        controller.progress()
    );
    println!(
        "  State:    {}",
        if controller.is_playing() { "playing" } else { "paused" }
    );
    println!(
        "  Shuffle:  {}   Repeat: {}",
        on_off(controller.shuffle()),
        on_off(controller.repeat())
    );
    println!(
        "  Volume:   {} {}%",
        controller.volume_level().icon(),
        controller.volume()
    );
    Ok(())
}

fn handle_playlist_command(catalog: &Catalog, config: &Config) {
    let controller = controller(catalog, config);
    let playlist = controller.playlist();
    let current = controller.current_index();

    println!("{} ({} tracks)", playlist.name, playlist.len());
    for (index, track) in playlist.tracks().iter().enumerate() {
        let marker = if current == Some(index) { "▶" } else { " " };
        println!(
            "{} {:>2}. {:<20} {:<16} {:>5}",
            marker,
            index + 1,
            track.title,
            track.artist,
            track.duration.to_string()
        );
    }
}

fn handle_simulate_command(
    catalog: &Catalog,
    config: &Config,
    ticks: usize,
    repeat: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = controller(catalog, config);
    if repeat {
        controller.toggle_repeat();
    }
    controller.play();
    info!(
        "Simulating {} ticks of '{}' from {:.1}%",
        ticks,
        controller.current_track().title,
        controller.progress()
    );

    let mut report = SimulationReport {
        ticks,
        advanced: 0,
        looped: 0,
        finished_at: None,
        elapsed: String::new(),
        state: controller.snapshot(),
    };
    for tick in 1..=ticks {
        match controller.tick() {
            TickOutcome::Advanced => report.advanced += 1,
            TickOutcome::Looped => report.looped += 1,
            TickOutcome::Finished => {
                report.finished_at = Some(tick);
                break;
            }
            TickOutcome::Idle => break,
        }
    }
    report.elapsed = controller.elapsed_label();
    report.state = controller.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} / {} ({:.1}%)",
        controller.current_track().title,
        report.elapsed,
        controller.current_track().duration,
        report.state.progress
    );
    println!("  advanced {} ticks, looped {} times", report.advanced, report.looped);
    match report.finished_at {
        Some(tick) => println!("  finished on tick {}", tick),
        None => println!(
            "  still {}",
            if report.state.is_playing { "playing" } else { "paused" }
        ),
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
