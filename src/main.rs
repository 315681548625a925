//! Math Catcher entry point
//!
//! Headless shell: loads settings and scores, drives one session at the fixed
//! timestep with the autopilot steering, records the result and prints the
//! leaderboard.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use math_catcher::audio::{AudioManager, LogSink};
use math_catcher::consts::{MAX_SUBSTEPS, SIM_DT};
use math_catcher::highscores::format_age;
use math_catcher::sim::{DifficultyTier, GameSession, TickInput};
use math_catcher::{HighScores, Resolution, Settings, platform};

/// Falling-numbers arithmetic game, played headless by the autopilot.
#[derive(Debug, Parser)]
#[command(
    name = "math-catcher",
    version,
    about = "Catch the falling number that answers the equation.",
    long_about = "Math Catcher runs one session at a fixed 60 Hz step with the autopilot \
        steering, records the score on the starting tier's leaderboard and prints it.\n\n\
        Set RUST_LOG=debug to see every catch and audio cue."
)]
struct Args {
    /// Starting difficulty. Clearing a tier's quota moves the run to the next one.
    #[arg(short, long, default_value = "easy")]
    tier: Tier,

    /// RNG seed. Taken from the clock if not set.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Set and save the playfield resolution, e.g. 1024x768.
    #[arg(long, value_name = "WxH", value_parser = parse_resolution)]
    resolution: Option<Resolution>,

    /// Where settings and scores are stored. Defaults to the executable's directory.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Run at 60 ticks per second instead of flat out.
    #[arg(long)]
    realtime: bool,

    /// Print the tier's leaderboard and exit.
    #[arg(long)]
    leaderboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Tier {
    #[default]
    #[value(alias = "e")]
    Easy,
    #[value(alias = "med", alias = "m")]
    Medium,
    #[value(alias = "h")]
    Hard,
}

impl From<Tier> for DifficultyTier {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Easy => DifficultyTier::Easy,
            Tier::Medium => DifficultyTier::Medium,
            Tier::Hard => DifficultyTier::Hard,
        }
    }
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    Resolution::parse(s).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let tier = DifficultyTier::from(args.tier);

    let dir = platform::data_dir(args.data_dir.as_deref());
    let scores_path = platform::highscores_path(&dir);
    let mut high_scores = HighScores::load(&scores_path);

    if args.leaderboard {
        print_leaderboard(&high_scores, tier);
        return ExitCode::SUCCESS;
    }

    let settings_path = platform::settings_path(&dir);
    let mut settings = Settings::load(&settings_path);
    if let Some(res) = args.resolution {
        if let Err(e) = settings.set_resolution(res.width, res.height) {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
        if let Err(e) = settings.save(&settings_path) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    let mut audio = AudioManager::new(Box::new(LogSink));
    audio.apply_settings(&settings);

    log::info!("Math Catcher (headless) starting...");
    let seed = args.seed.unwrap_or_else(platform::time_seed);
    let mut session = GameSession::new(tier, settings.playfield(), seed);
    run_session(&mut session, &mut audio, args.realtime);

    println!();
    println!(
        "Run over ({:?}) - score {}, level {}, reached {}",
        session.game_over_reason(),
        session.score(),
        session.level(),
        session.tier()
    );

    let tier = session.starting_tier();
    match high_scores.add_score(tier, session.score(), platform::now_millis()) {
        Some(rank) => {
            println!("New {} high score! Rank #{}", tier, rank);
            if let Err(e) = high_scores.save(&scores_path) {
                log::warn!("Could not save high scores: {}", e);
            }
        }
        None => println!("No leaderboard entry this time."),
    }
    print_leaderboard(&high_scores, tier);

    ExitCode::SUCCESS
}

/// Drive the session until it ends
fn run_session(session: &mut GameSession, audio: &mut AudioManager, realtime: bool) {
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut hud_second = session.time_remaining();

    if !realtime {
        while !session.is_game_over() {
            step(session, audio, &input, &mut hud_second);
        }
        return;
    }

    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    while !session.is_game_over() {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(0.1);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step(session, audio, &input, &mut hud_second);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        std::thread::sleep(Duration::from_millis(4));
    }
}

fn step(
    session: &mut GameSession,
    audio: &mut AudioManager,
    input: &TickInput,
    hud_second: &mut u32,
) {
    session.advance(input, SIM_DT);
    audio.handle_events(&session.take_events());

    if session.time_remaining() != *hud_second {
        *hud_second = session.time_remaining();
        log::info!(
            "[{:>3}s] {:<20} score {:>6}  level {:>3}  lives {}  {}",
            session.time_remaining(),
            session.equation_text(),
            session.score(),
            session.level(),
            session.lives_remaining(),
            session.tier()
        );
    }
}

fn print_leaderboard(high_scores: &HighScores, tier: DifficultyTier) {
    println!();
    println!("=== {} leaderboard ===", tier);
    let entries = high_scores.entries(tier);
    if entries.is_empty() {
        println!("  (no scores yet)");
        return;
    }
    let now = platform::now_millis();
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {:>8}  {}",
            i + 1,
            entry.score,
            format_age(entry.timestamp, now)
        );
    }
}
