use std::fmt;

use voipms_core::{CredentialBundle, OperationDescriptor};

/// Path of the provider's single REST endpoint, relative to the base URL.
pub const REST_PATH: &str = "/api/v1/rest.php";

const SECRET_KEYS: &[&str] = &["api_username", "api_password"];

/// Ordered query-string parameters for one provider call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteQuery {
    pairs: Vec<(String, String)>,
}

impl RemoteQuery {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends every pair to `url`, form-encoding keys and values.
    pub fn apply_to(&self, url: &mut url::Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut qp = url.query_pairs_mut();
        for (k, v) in &self.pairs {
            qp.append_pair(k, v);
        }
    }
}

impl fmt::Debug for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.pairs {
            if SECRET_KEYS.contains(&k.as_str()) {
                map.entry(k, &"<redacted>");
            } else {
                map.entry(k, v);
            }
        }
        map.finish()
    }
}

/// Assembles the query for one item. Extra fields are copied verbatim; a
/// field the item does not provide is sent empty.
pub fn build_remote_query(
    descriptor: &OperationDescriptor,
    credentials: &CredentialBundle,
    mut field: impl FnMut(&str) -> Option<String>,
) -> RemoteQuery {
    let mut qs = RemoteQuery::default();
    qs.push("api_username", credentials.api_username());
    qs.push("api_password", credentials.api_password());
    qs.push("method", descriptor.wire_method);
    qs.push("format", "json");
    for &name in descriptor.extra_fields {
        qs.push(name, field(name).unwrap_or_default());
    }
    qs
}

/// `{baseUrl}/api/v1/rest.php`, with the production base URL when unset.
pub fn endpoint(credentials: &CredentialBundle) -> Result<url::Url, url::ParseError> {
    url::Url::parse(&format!("{}{REST_PATH}", credentials.resolved_base_url()))
}
