use crate::types::CredentialBundle;
use crate::validate::validator::Validator;

pub(crate) fn validate_credentials(v: &mut Validator, path: &str, c: &CredentialBundle) {
    if c.api_username().trim().is_empty() {
        v.push(format!("{path}.apiUsername"), "must not be empty");
    }
    if c.api_password().is_empty() {
        v.push(format!("{path}.apiPassword"), "must not be empty");
    }

    // An unset base URL falls back to the production endpoint.
    let Some(base_url) = c.base_url().filter(|u| !u.trim().is_empty()) else {
        return;
    };
    match url::Url::parse(base_url.trim()) {
        Ok(u) if u.scheme() == "https" || u.scheme() == "http" => {
            if u.query().is_some() {
                v.push(format!("{path}.baseUrl"), "must not carry a query string");
            }
        }
        Ok(u) => v.push(
            format!("{path}.baseUrl"),
            format!("unsupported scheme '{}' (expected http or https)", u.scheme()),
        ),
        Err(e) => v.push(format!("{path}.baseUrl"), format!("invalid URL: {e}")),
    }
}
