use clausewise::{AnalyzerConfig, ClausewiseError, ConfigError, ContractAnalyzer, TextExtractor};
use clausewise_http::{AppState, HttpConfig, serve};
use serde::Serialize;
use std::net::IpAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] ClausewiseError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

pub async fn run_analyze(file: &Path, compact: bool, no_llm: bool) -> CliResult<()> {
    let mut config = AnalyzerConfig::from_env()?;
    if no_llm {
        config.llm.enabled = false;
    }

    let analyzer = ContractAnalyzer::from_config(&config)?;
    let analysis = analyzer.analyze_file(file).await?;
    print_json(&analysis, compact)
}

pub fn run_info(file: &Path) -> CliResult<()> {
    let info = TextExtractor::new()
        .document_info(file)
        .map_err(ClausewiseError::from)?;
    print_json(&info, false)
}

pub async fn run_serve(host: Option<IpAddr>, port: Option<u16>) -> CliResult<()> {
    let analyzer_config = AnalyzerConfig::from_env()?;
    let mut http_config = HttpConfig::from_env()?;
    if let Some(host) = host {
        http_config.host = host;
    }
    if let Some(port) = port {
        http_config.port = port;
    }

    let analyzer = ContractAnalyzer::from_config(&analyzer_config)?;
    serve(AppState::new(analyzer, http_config)).await?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> CliResult<()> {
    let output = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{output}");
    Ok(())
}
