//! Command-line argument parsing.

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Frequency Garden")]
#[command(about = "Audio-driven generative garden simulation", long_about = None)]
pub struct Args {
    /// Number of frames to simulate
    #[arg(long, value_name = "FRAMES", default_value = "600")]
    pub frames: u64,

    /// Noise field seed
    #[arg(long, value_name = "SEED", default_value = "0")]
    pub seed: u32,

    /// Frames between synthetic bass kicks in the demo envelope
    #[arg(long, value_name = "FRAMES", default_value = "90")]
    pub kick_interval: u64,

    /// Pause for this many frames halfway through the run (0 = never pause)
    #[arg(long, value_name = "FRAMES", default_value = "0")]
    pub pause_frames: u64,

    /// Print a scene summary every N frames (0 = only at the end)
    #[arg(long, value_name = "FRAMES", default_value = "120")]
    pub summary_every: u64,
}
