use clap::Parser;

/// Slawatch — terminal console for the ticket-analytics backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "slawatch")]
pub struct CliArgs {
    /// Base URL of the analytics backend
    #[arg(short = 'b', long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Skip the initial overview/diagnostics/metrics fetches
    #[arg(long = "no-bootstrap")]
    pub no_bootstrap: bool,

    /// Run a single console command and exit
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,
}

pub struct ConsoleConfig {
    pub base_url: String,
    pub bootstrap: bool,
    pub one_shot: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

// Diagnostics display constants. The backend caps the issue strings it
// returns at the same threshold; anything past it is summarized in a single
// overflow line.
pub const ISSUE_OVERFLOW_THRESHOLD: u64 = 50;

// Notice feed constants
pub const NOTICE_BUFFER_SIZE: usize = 20;

// Control captions: idle caption and the busy caption swapped in while the
// action is pending.
pub const TRAIN_CAPTION: &str = "Train Model";
pub const TRAIN_BUSY_CAPTION: &str = "Training...";
pub const REINGEST_CAPTION: &str = "Re-run Ingestion";
pub const REINGEST_BUSY_CAPTION: &str = "Processing...";
pub const PREDICT_CAPTION: &str = "Predict";
pub const PREDICT_BUSY_CAPTION: &str = "Predicting...";

impl ConsoleConfig {
    pub fn from_args(args: CliArgs) -> Self {
        ConsoleConfig {
            base_url: args.base_url.trim_end_matches('/').to_string(),
            bootstrap: !args.no_bootstrap,
            one_shot: args.command,
        }
    }
}
