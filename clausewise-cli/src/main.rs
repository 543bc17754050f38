use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

mod commands;

use commands::{run_analyze, run_info, run_serve};

#[derive(Parser, Debug)]
#[command(name = "clausewise", version)]
#[command(about = "Clausewise - contract clause classification, summarization and risk detection")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a contract and print the result as JSON
    Analyze {
        /// Contract file (pdf, docx, txt)
        file: PathBuf,
        /// Single-line JSON instead of pretty printed
        #[arg(long)]
        compact: bool,
        /// Skip LLM enrichment even when enabled in the environment
        #[arg(long)]
        no_llm: bool,
    },
    /// Show basic document information
    Info {
        /// Contract file (pdf, docx, txt)
        file: PathBuf,
    },
    /// Start the HTTP API
    Serve {
        /// Bind address (overrides CLAUSEWISE_HOST)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Bind port (overrides CLAUSEWISE_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout stays machine readable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match cli.command {
        Commands::Analyze {
            file,
            compact,
            no_llm,
        } => run_analyze(&file, compact, no_llm).await,
        Commands::Info { file } => run_info(&file),
        Commands::Serve { host, port } => run_serve(host, port).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
