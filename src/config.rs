//! Command-line configuration for the terminal front end.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "space_invaders", version, about = "Space Invaders in the terminal")]
pub struct Args {
    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = 10)]
    pub tick_ms: u64,

    /// Redraw the terminal every N ticks.
    #[arg(long, default_value_t = 3)]
    pub render_every: u64,

    /// Ticks a key stays held without repeat events on terminals that
    /// cannot report key releases.
    #[arg(long, default_value_t = 14)]
    pub hold_window: u64,

    /// Write logs here instead of stderr (which the game screen covers).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run a scripted player for TICKS ticks without a terminal and print
    /// the final state as JSON.
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_ms > 0, "--tick-ms must be at least 1");
        ensure!(self.render_every > 0, "--render-every must be at least 1");
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
