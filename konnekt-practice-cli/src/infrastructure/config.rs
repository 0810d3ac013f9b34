use crate::infrastructure::error::{CliError, Result};
use clap::Parser;
use konnekt_practice_core::{ActivityKind, SpeechCapabilities};
use konnekt_practice_gateway::GatewayConfig;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "konnekt-practice")]
#[command(
    version,
    about = "Konnekt Practice - AI-generated English exercises in your terminal"
)]
pub struct CliArgs {
    /// Gemini model name
    #[arg(short = 'm', long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub base_url: Option<String>,

    /// HTTP timeout for a single AI call
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Disable speech playback and recognition
    #[arg(long)]
    pub no_speech: bool,

    /// Log level for the practice crates (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "warn")]
    pub log_level: String,

    /// Activity to open on start instead of the menu
    #[arg(short = 'a', long)]
    pub activity: Option<String>,
}

/// Resolved settings for one practice session
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeConfig {
    pub gateway: GatewayConfig,
    pub capabilities: SpeechCapabilities,
    pub start: Option<ActivityKind>,
    pub log_level: String,
}

impl PracticeConfig {
    /// Resolve from arguments and the process environment
    pub fn from_args(args: CliArgs) -> Result<Self> {
        Self::resolve(args, GatewayConfig::from_env())
    }

    /// Arguments take precedence over `env`
    pub fn resolve(args: CliArgs, env: GatewayConfig) -> Result<Self> {
        if args.timeout_secs == 0 {
            return Err(CliError::invalid_config("--timeout-secs must be at least 1"));
        }

        let mut gateway = env.with_timeout(Duration::from_secs(args.timeout_secs));
        if let Some(model) = args.model.filter(|m| !m.trim().is_empty()) {
            gateway = gateway.with_model(model);
        }
        if let Some(base_url) = args.base_url.filter(|u| !u.trim().is_empty()) {
            gateway = gateway.with_base_url(base_url);
        }

        let start = args
            .activity
            .as_deref()
            .map(str::parse::<ActivityKind>)
            .transpose()?
            .filter(ActivityKind::is_practice);

        let capabilities = if args.no_speech {
            SpeechCapabilities::none()
        } else {
            SpeechCapabilities::all()
        };

        Ok(Self {
            gateway,
            capabilities,
            start,
            log_level: args.log_level,
        })
    }
}
