//! gemini-export — export shared Gemini conversations as text or JSON.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use gemini_export::cli::output::{self, OutputMode};
use gemini_export::cli::{export_cmd, inspect_cmd, selectors_cmd};
use gemini_export::export::ExportFormat;
use gemini_export::readiness::RetryPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Export a shared Gemini conversation from a saved page.
#[derive(Parser, Debug)]
#[command(name = "gemini-export", author, version, about, long_about = None)]
struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show extra detail and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the conversation in a page snapshot
    Export {
        /// Saved page HTML, or - for stdin
        input: String,

        /// Output format [default: both, or json with --stdout]
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Source address recorded in the export (default: the page's canonical URL)
        #[arg(long)]
        url: Option<String>,

        /// Directory to write files into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Write to stdout instead of files
        #[arg(long, conflicts_with = "out_dir")]
        stdout: bool,

        /// Replace existing files
        #[arg(long)]
        overwrite: bool,

        /// JSON file overriding the page selectors
        #[arg(long)]
        selectors: Option<PathBuf>,

        /// Re-read the input until it contains a conversation turn
        #[arg(long)]
        wait: bool,

        /// Attempts made by --wait
        #[arg(long, default_value_t = RetryPolicy::default().max_attempts)]
        attempts: u32,

        /// Delay between --wait attempts, in milliseconds
        #[arg(long, default_value_t = RetryPolicy::default().delay_ms)]
        delay_ms: u64,
    },

    /// Report what an export of a page snapshot would contain
    Inspect {
        /// Saved page HTML, or - for stdin
        input: String,

        /// JSON file overriding the page selectors
        #[arg(long)]
        selectors: Option<PathBuf>,

        /// Source address override
        #[arg(long)]
        url: Option<String>,
    },

    /// Print the built-in page selectors as JSON
    Selectors,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Txt,
    Json,
    Both,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Txt => vec![ExportFormat::Text],
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::Both => ExportFormat::ALL.to_vec(),
        }
    }
}

fn init_tracing(verbose: bool, log_json: bool) {
    let default = if verbose {
        "gemini_export=debug"
    } else {
        "gemini_export=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mode = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: output::color_enabled(cli.no_color),
    };

    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Export {
            input,
            format,
            url,
            out_dir,
            stdout,
            overwrite,
            selectors,
            wait,
            attempts,
            delay_ms,
        } => {
            let requested = format.map(FormatArg::formats);
            let opts = export_cmd::ExportOptions {
                input,
                formats: export_cmd::select_formats(requested.as_deref(), stdout)?,
                url,
                out_dir,
                to_stdout: stdout,
                overwrite,
                selectors,
                wait: wait.then_some(RetryPolicy {
                    max_attempts: attempts,
                    delay_ms,
                }),
            };
            let status = export_cmd::run(&opts, &mode).await?;
            if status != export_cmd::ExitStatus::Exported {
                std::process::exit(status.code());
            }
            Ok(())
        }
        Commands::Inspect {
            input,
            selectors,
            url,
        } => inspect_cmd::run(&input, selectors.as_deref(), url.as_deref(), &mode).await,
        Commands::Selectors => selectors_cmd::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "gemini-export", &mut std::io::stdout());
            Ok(())
        }
    }
}
