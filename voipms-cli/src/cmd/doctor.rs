use serde::Serialize;
use voipms_core::{validate_credentials, CredentialBundle};
use voipms_exec::executor::endpoint;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{CredentialArgs, OutputArgs};

use super::config::{build_secrets_provider, credential_source};

#[derive(Serialize)]
struct Check {
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Check {
    fn ok(name: &str, message: impl Into<String>) -> Self {
        Self::with_status(name, "ok", message)
    }

    fn error(name: &str, message: impl Into<String>) -> Self {
        Self::with_status(name, "error", message)
    }

    fn with_status(name: &str, status: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: status.to_string(),
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
struct DoctorResult {
    checks: Vec<Check>,
    all_passed: bool,
}

/// Local checks only; nothing here calls the API.
pub async fn doctor_cmd(credentials: CredentialArgs, output: OutputArgs) -> i32 {
    let mut checks = vec![check_secrets(&credentials)];

    match resolve(&credentials).await {
        Err(check) => checks.push(check),
        Ok(bundle) => {
            checks.push(check_credentials(&bundle));
            checks.push(check_endpoint(&bundle));
        }
    }

    let all_passed = checks.iter().all(|c| c.status == "ok");
    let result = DoctorResult { checks, all_passed };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Environment checks:");
        for c in &result.checks {
            let icon = if c.status == "ok" { "✓" } else { "✗" };
            print!("  {} {}: {}", icon, c.name, c.status);
            if let Some(msg) = &c.message {
                print!(" - {msg}");
            }
            println!();
        }
        if result.all_passed {
            println!("\nAll checks passed.");
        } else {
            println!("\nSome checks failed.");
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if all_passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUNTIME_ERROR
    }
}

fn check_secrets(args: &CredentialArgs) -> Check {
    if let Some(dir) = args.secrets.strip_prefix("file:") {
        if !std::path::Path::new(dir).is_dir() {
            return Check::error("secrets", format!("secrets directory not found: {dir}"));
        }
        return Check::ok("secrets", format!("file provider: {dir}"));
    }
    match build_secrets_provider(args) {
        Ok(_) => Check::ok("secrets", "using environment variables"),
        Err(e) => Check::error("secrets", e),
    }
}

async fn resolve(args: &CredentialArgs) -> Result<CredentialBundle, Check> {
    let provider = build_secrets_provider(args).map_err(|e| Check::error("credentials", e))?;
    let source = credential_source(args).map_err(|e| Check::error("credentials", e))?;
    let bundle = source
        .resolve(provider.as_ref())
        .await
        .map_err(|e| Check::error("credentials", e.to_string()))?
        .ok_or_else(|| {
            Check::error(
                "credentials",
                format!(
                    "no credentials stored at {} / {}",
                    source.username, source.password
                ),
            )
        })?;
    Ok(match &args.base_url {
        Some(url) => bundle.with_base_url(url.clone()),
        None => bundle,
    })
}

fn check_credentials(bundle: &CredentialBundle) -> Check {
    match validate_credentials(bundle) {
        Ok(()) => Check::ok("credentials", "username and password present"),
        Err(e) => {
            let details: Vec<String> = e.violations.iter().map(ToString::to_string).collect();
            Check::error("credentials", details.join("; "))
        }
    }
}

fn check_endpoint(bundle: &CredentialBundle) -> Check {
    match endpoint(bundle) {
        Ok(url) => Check::ok("endpoint", url.to_string()),
        Err(e) => Check::error("endpoint", format!("invalid base URL: {e}")),
    }
}
