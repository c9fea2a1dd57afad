use clap::Parser;

/// testfix — summarize a browser test report and suggest fixes for failures
#[derive(Parser, Debug, Clone)]
#[command(name = "testfix", version, about)]
pub struct Cli {
    /// Report file path (Windows-style paths are translated) or a literal JSON report.
    /// Reads standard input when omitted or when the path cannot be found.
    pub input: Option<String>,

    /// Path to config file (default: .testfix.toml if present)
    #[arg(long)]
    pub config: Option<String>,

    /// Directory that receives the analysis and fix-suggestion files
    #[arg(long)]
    pub results_dir: Option<String>,

    /// Number of leading failures that get detailed fix suggestions
    #[arg(long)]
    pub fix_limit: Option<usize>,

    /// Exit 0 even when the report contains failed tests
    #[arg(long)]
    pub no_fail: bool,
}
