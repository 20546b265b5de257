use std::borrow::Cow;

const REDACTED: &str = "<redacted>";

/// Query keys whose values are credentials.
pub const SENSITIVE_QUERY_KEYS: &[&str] = &["api_username", "api_password"];

/// Renders `url` for logs with credential query values replaced.
pub fn redact_url(url: &url::Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> = url
        .query_pairs()
        .map(|(k, v)| {
            if SENSITIVE_QUERY_KEYS.iter().any(|s| k.eq_ignore_ascii_case(s)) {
                (k, Cow::Borrowed(REDACTED))
            } else {
                (k, v)
            }
        })
        .collect();

    let mut out = url.clone();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}
