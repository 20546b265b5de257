use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct LogArgs {
    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Where the connection's three fields are read from.
#[derive(Debug, Args, Clone)]
pub struct CredentialArgs {
    /// `env` or `file:<dir>`.
    #[arg(long, default_value = "env")]
    pub secrets: String,
    #[arg(long, default_value = "secrets://VOIPMS_API_USERNAME")]
    pub username_ref: String,
    #[arg(long, default_value = "secrets://VOIPMS_API_PASSWORD")]
    pub password_ref: String,
    #[arg(long, default_value = "secrets://VOIPMS_BASE_URL")]
    pub base_url_ref: String,
    /// Overrides whatever `--base-url-ref` resolves to.
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ClientArgs {
    /// Whole-request timeout in milliseconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}
