//! CLI subcommand definitions

use clap::builder::FalseyValueParser;
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log a new command line
    Log {
        /// Command session identifier
        session: String,
        /// Command line arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Generate a report from the command log
    Report(ReportArgs),
    /// Print log line filters
    Filters,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Print also the current directory where the command was run
    #[arg(long, env = "CMDLOG_PWD", value_parser = FalseyValueParser::new())]
    pub(crate) pwd: bool,

    /// Display commands of the given session
    #[arg(long, env = "CMDLOG_SESSION")]
    pub(crate) session: Option<String>,

    /// Display commands starting from the given time (unix seconds, YYYY-MM-DD, YYYYMMDD or YYYY-MM-DDTHH:MM:SS)
    #[arg(short = 'd', long, env = "CMDLOG_SINCE")]
    pub(crate) since: Option<String>,

    /// Display commands in reverse
    #[arg(short, long, env = "CMDLOG_REVERSE", value_parser = FalseyValueParser::new())]
    pub(crate) reverse: bool,

    /// Display commands matching the given words, in order
    #[arg(long, env = "CMDLOG_GREP")]
    pub(crate) grep: Option<String>,

    /// Timezone for absolute times and --since (e.g. "UTC", "Europe/Helsinki")
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Number of parser threads (defaults to the available parallelism)
    #[arg(long, value_name = "N")]
    pub(crate) workers: Option<usize>,
}
