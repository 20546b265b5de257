use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use voipms_core::{parse_items_str, CredentialBundle, DocumentFormat, ParseError, ParsedItems};
use voipms_exec::executor::ClientConfig;
use voipms_exec::secrets::{
    CredentialSource, EnvSecretsProvider, FileSecretsProvider, SecretRef, SecretsProvider,
};
use voipms_exec::{HttpClient, ReqwestHttpClient};

use crate::exit_codes;
use crate::output::print_error;
use crate::{ClientArgs, CredentialArgs, OutputArgs};

pub fn build_secrets_provider(args: &CredentialArgs) -> Result<Box<dyn SecretsProvider>, String> {
    match args.secrets.as_str() {
        "env" => Ok(Box::new(EnvSecretsProvider::default())),
        s => match s.strip_prefix("file:") {
            Some(dir) if !dir.is_empty() => Ok(Box::new(FileSecretsProvider::new(dir))),
            _ => Err(format!(
                "unknown secrets provider '{s}' (expected env or file:<dir>)"
            )),
        },
    }
}

pub fn credential_source(args: &CredentialArgs) -> Result<CredentialSource, String> {
    let parse = |flag: &str, value: &str| {
        SecretRef::parse(value).map_err(|e| format!("{flag}: {e}"))
    };
    Ok(CredentialSource {
        username: parse("--username-ref", &args.username_ref)?,
        password: parse("--password-ref", &args.password_ref)?,
        base_url: Some(parse("--base-url-ref", &args.base_url_ref)?),
    })
}

/// `Ok(None)` when username or password is not stored; the executor turns
/// that into its own error.
pub async fn resolve_credentials(args: &CredentialArgs) -> Result<Option<CredentialBundle>, String> {
    let provider = build_secrets_provider(args)?;
    let source = credential_source(args)?;
    let bundle = source
        .resolve(provider.as_ref())
        .await
        .map_err(|e| format!("failed to read credentials: {e}"))?;
    Ok(match (bundle, &args.base_url) {
        (Some(b), Some(url)) => Some(b.with_base_url(url.clone())),
        (b, _) => b,
    })
}

pub fn build_http_client(args: &ClientArgs) -> Result<Arc<dyn HttpClient>, String> {
    let config = ClientConfig {
        timeout: args.timeout.map(Duration::from_millis),
        ..ClientConfig::default()
    };
    let client = ReqwestHttpClient::new(config)
        .map_err(|e| format!("failed to create HTTP client: {e}"))?;
    Ok(Arc::new(client))
}

/// Reads and parses an items file, printing the failure and returning the
/// exit code on error.
pub fn load_items(path: &Path, output: &OutputArgs) -> Result<ParsedItems, i32> {
    let content = match std::fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };

    parse_items_str(&content, DocumentFormat::Auto).map_err(|e| {
        let message = match e {
            ParseError::Json(e) => format!("JSON parse failed: {e}"),
            ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
            ParseError::UnknownFormat => "input is neither valid JSON nor valid YAML".to_string(),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(secrets: &str) -> CredentialArgs {
        CredentialArgs {
            secrets: secrets.to_string(),
            username_ref: "secrets://VOIPMS_API_USERNAME".to_string(),
            password_ref: "secrets://VOIPMS_API_PASSWORD".to_string(),
            base_url_ref: "secrets://VOIPMS_BASE_URL".to_string(),
            base_url: None,
        }
    }

    #[test]
    fn secrets_provider_names() {
        assert!(build_secrets_provider(&args("env")).is_ok());
        assert!(build_secrets_provider(&args("file:/run/secrets")).is_ok());
        assert!(build_secrets_provider(&args("file:")).is_err());
        assert!(build_secrets_provider(&args("vault")).is_err());
    }

    #[test]
    fn bad_reference_names_the_flag() {
        let mut a = args("env");
        a.password_ref = "VOIPMS_API_PASSWORD".to_string();
        let err = credential_source(&a).unwrap_err();
        assert!(err.starts_with("--password-ref"), "{err}");
    }

    #[tokio::test]
    async fn base_url_flag_overrides_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("VOIPMS_API_USERNAME"), "u").unwrap();
        std::fs::write(dir.path().join("VOIPMS_API_PASSWORD"), "p").unwrap();
        std::fs::write(dir.path().join("VOIPMS_BASE_URL"), "https://stored.example").unwrap();

        let mut a = args(&format!("file:{}", dir.path().display()));
        let bundle = resolve_credentials(&a).await.unwrap().unwrap();
        assert_eq!(bundle.resolved_base_url(), "https://stored.example");

        a.base_url = Some("http://localhost:9999".to_string());
        let bundle = resolve_credentials(&a).await.unwrap().unwrap();
        assert_eq!(bundle.resolved_base_url(), "http://localhost:9999");
    }
}
