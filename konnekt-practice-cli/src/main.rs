use clap::Parser;
use konnekt_practice_cli::presentation::console::{ConsoleApp, ConsoleSynthesizer, NoSynthesizer};
use konnekt_practice_cli::{CliArgs, CliError, LogConfig, PracticeConfig, PracticeRuntime, Result};
use konnekt_practice_core::{PracticeCommand, PracticeLoop, SpeechSynthesizer};
use konnekt_practice_gateway::{GeminiGateway, PracticeContentService};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = PracticeConfig::from_args(args)?;

    LogConfig::default()
        .with_level_name(&config.log_level)?
        .init()?;

    let gateway = GeminiGateway::new(config.gateway.clone())?;
    info!(model = %config.gateway.model, "Using Gemini gateway");
    let service = PracticeContentService::new(Arc::new(gateway));

    let synthesizer: Arc<dyn SpeechSynthesizer> = if config.capabilities.synthesis {
        Arc::new(ConsoleSynthesizer::stdout())
    } else {
        Arc::new(NoSynthesizer)
    };

    let practice_loop = PracticeLoop::new(config.capabilities, 10, 100);
    let runtime = PracticeRuntime::spawn(practice_loop, service);

    if let Some(kind) = config.start {
        runtime
            .submit_command(PracticeCommand::SelectActivity { kind })
            .await
            .map_err(|_| CliError::RuntimeStopped)?;
    }

    let app = ConsoleApp::new(runtime, synthesizer, std::io::stdout());
    app.run(BufReader::new(tokio::io::stdin())).await?;

    println!("Bye! 👋");
    Ok(())
}
