//! `localml <model> <prompt>`: one-shot prompt against a local chat server.

use std::process::ExitCode;

use clap::Parser;
use localml::{
    ClientConfig, LocalClient,
    config::{DEFAULT_BASE_URL, TOKEN_ENV_VAR, env_token},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "localml", version, about = "Send a prompt to a local OpenWebUI or Ollama server")]
struct Cli {
    /// Model identifier, e.g. `gemma3`.
    model: String,

    /// Prompt to send.
    prompt: String,

    /// Base URL of the server.
    #[arg(long, env = "LLM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,

    /// System prompt to send instead of the default persona.
    #[arg(long)]
    system: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    Ok(run(cli, env_token()))
}

/// Sends the prompt and prints the reply. Every failure has already been
/// logged by the time `FAILURE` is returned.
fn run(cli: Cli, token: Option<String>) -> ExitCode {
    let Some(token) = token else {
        tracing::warn!("Missing API token. Please set {TOKEN_ENV_VAR} as a user environment variable.");
        return ExitCode::FAILURE;
    };

    let mut config = ClientConfig::default()
        .base_url(cli.base_url)
        .token(token)
        .model(cli.model);
    if let Some(temperature) = cli.temperature {
        config = config.temperature(temperature);
    }

    let client = match LocalClient::connect(config) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match client.send_prompt(&cli.prompt, cli.system.as_deref()) {
        Some(reply) => {
            println!("{reply}");
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
