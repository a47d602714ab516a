//! Headless session runner (default binary).
//!
//! Drives a seeded game with a fixed 16ms timestep and a small
//! deterministic input script, then prints the final summary. Useful for
//! exercising the full lock/clear/spawn protocol without any rendering or
//! keyboard wiring; the same seed always produces the same run.

use anyhow::{anyhow, Result};

use blockfall::core::{SessionDriver, SessionEvent};
use blockfall::types::InputCommand;

const TICK_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimConfig {
    seed: u32,
    ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            ticks: 20_000,
        }
    }
}

fn parse_args(args: &[String]) -> Result<SimConfig> {
    let mut config = SimConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("sim: invalid --seed value: {}", v))?;
            }
            "--ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --ticks"))?;
                config.ticks = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("sim: invalid --ticks value: {}", v))?;
            }
            other => {
                return Err(anyhow!("sim: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut driver = SessionDriver::with_seed(config.seed);
    driver.start();

    let mut pieces_locked = 0u32;
    let mut clear_events = 0u32;
    let mut ticks_run = 0u32;

    'run: for step in 0..config.ticks {
        // A fixed nudge-and-rotate script keeps runs deterministic while
        // still exercising movement, rotation, and soft drop.
        match step % 53 {
            5 => {
                driver.handle(InputCommand::MoveLeft);
            }
            11 => {
                driver.handle(InputCommand::Rotate);
            }
            17 => {
                driver.handle(InputCommand::MoveRight);
            }
            23 => {
                driver.handle(InputCommand::SoftDropStart);
            }
            29 => {
                driver.handle(InputCommand::SoftDropStop);
            }
            _ => {}
        }

        ticks_run = step + 1;
        for event in driver.tick(TICK_MS) {
            match event {
                SessionEvent::Locked => pieces_locked += 1,
                SessionEvent::LinesCleared { .. } => clear_events += 1,
                SessionEvent::GameOver => break 'run,
                _ => {}
            }
        }
    }

    let session = driver.session();
    println!("seed      {}", config.seed);
    println!("ticks     {} ({}ms simulated)", ticks_run, ticks_run * TICK_MS);
    println!("status    {}", session.status().as_str());
    println!("score     {}", session.score());
    println!("level     {}", session.level());
    println!("lines     {}", session.lines());
    println!("locked    {}", pieces_locked);
    println!("clears    {}", clear_events);

    Ok(())
}
