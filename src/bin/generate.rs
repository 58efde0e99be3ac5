//! One-shot generation from the command line.
//!
//! `generate [PROMPT...]` prints the first candidate for the prompt, or for
//! "Hello, how are you?" when none is given.

use anyhow::Context;
use chatbot_gateway::{build_generator, config::AppConfig, telemetry};

const DEFAULT_PROMPT: &str = "Hello, how are you?";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        args.join(" ")
    };

    let generator = build_generator(&config);
    let text = generator
        .complete(&prompt)
        .await
        .context("generation failed")?;

    println!("{text}");
    Ok(())
}
