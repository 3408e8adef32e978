//! Lane Runner headless driver
//!
//! Runs the simulation core with the autopilot standing in for input and a
//! fixed render rate standing in for the renderer, then prints the final
//! snapshot as JSON. Each rendered frame is clamped and split into fixed
//! `FRAME_DT` steps.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lane_runner::consts::{FRAME_DT, MAX_FRAME_DT, MAX_SUBSTEPS};
use lane_runner::sim::{FrameOutput, GamePhase, GameState, TickInput, autopilot, tick};
use lane_runner::tuning::ObstaclePolicy;
use lane_runner::{FrameSnapshot, TuningConfig};

#[derive(Parser)]
#[command(version, about = "Headless lane-runner simulation")]
struct Cli {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum rendered frames to simulate
    #[arg(long, default_value_t = 60 * 120)]
    frames: u64,

    /// Rendered frames per second (simulation always steps at 60 Hz)
    #[arg(long)]
    fps: Option<f32>,

    /// Obstacle policy override: single or multi
    #[arg(long, value_parser = parse_policy)]
    policy: Option<ObstaclePolicy>,

    /// JSON tuning file (missing fields use defaults)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective tuning and exit
    #[arg(long)]
    dump_config: bool,

    /// Stand still instead of using the autopilot
    #[arg(long)]
    idle: bool,
}

fn parse_policy(s: &str) -> Result<ObstaclePolicy, String> {
    ObstaclePolicy::from_str(s).ok_or_else(|| format!("unknown obstacle policy '{}'", s))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match TuningConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => TuningConfig::default(),
    };

    if let Some(policy) = cli.policy {
        config.obstacle_policy = policy;
    }

    if cli.dump_config {
        println!("{}", config.to_json());
        return ExitCode::SUCCESS;
    }

    let mut state = match GameState::with_config(cli.seed, config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid tuning: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let frame_dt = cli
        .fps
        .filter(|fps| *fps > 0.0)
        .map_or(FRAME_DT, |fps| 1.0 / fps)
        .min(MAX_FRAME_DT);
    log::info!(
        "Lane Runner (headless) running {} frames at dt={:.4}",
        cli.frames,
        frame_dt
    );

    let mut accumulator = 0.0;
    let mut last: Option<FrameOutput> = None;
    'frames: for _ in 0..cli.frames {
        accumulator += frame_dt;

        let mut substeps = 0;
        while accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            let input = if cli.idle {
                TickInput::IDLE
            } else {
                autopilot(&state)
            };
            last = Some(tick(&mut state, &input, FRAME_DT));
            accumulator -= FRAME_DT;
            substeps += 1;

            if state.phase() == GamePhase::GameOver {
                break 'frames;
            }
        }
    }

    let snapshot = FrameSnapshot::capture(&state, &last.unwrap_or_default());
    println!("{}", snapshot.to_json());
    ExitCode::SUCCESS
}
