use std::fmt;

use secrecy::{ExposeSecret, SecretString};

pub const CREDENTIAL_TYPE: &str = "voipMsApi";
pub const DEFAULT_BASE_URL: &str = "https://api.voip.ms";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    String,
    SecretString,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialField {
    pub display_name: String,
    pub name: String,
    pub field_type: FieldType,
    pub default: String,
    pub required: bool,
    pub description: String,
}

/// Schema the host uses to collect and store a VoIP.ms connection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescriptor {
    pub name: String,
    pub display_name: String,
    pub documentation_url: String,
    pub properties: Vec<CredentialField>,
}

impl CredentialDescriptor {
    pub fn voipms() -> Self {
        Self {
            name: CREDENTIAL_TYPE.to_string(),
            display_name: "VoIP.ms API".to_string(),
            documentation_url: "https://voip.ms/m/apidocs.php".to_string(),
            properties: vec![
                CredentialField {
                    display_name: "API Username".to_string(),
                    name: "apiUsername".to_string(),
                    field_type: FieldType::String,
                    default: String::new(),
                    required: true,
                    description: "Your VoIP.ms API username".to_string(),
                },
                CredentialField {
                    display_name: "API Password".to_string(),
                    name: "apiPassword".to_string(),
                    field_type: FieldType::SecretString,
                    default: String::new(),
                    required: true,
                    description: "Your VoIP.ms API password (API key)".to_string(),
                },
                CredentialField {
                    display_name: "API Base URL".to_string(),
                    name: "baseUrl".to_string(),
                    field_type: FieldType::String,
                    default: DEFAULT_BASE_URL.to_string(),
                    required: true,
                    description: "VoIP.ms API base URL (keep default unless instructed otherwise)"
                        .to_string(),
                },
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&CredentialField> {
        self.properties.iter().find(|f| f.name == name)
    }
}

/// Resolved connection values, injected by the host for the lifetime of a run.
#[derive(Clone)]
pub struct CredentialBundle {
    api_username: SecretString,
    api_password: SecretString,
    base_url: Option<String>,
}

impl CredentialBundle {
    pub fn new(api_username: impl Into<String>, api_password: impl Into<String>) -> Self {
        Self {
            api_username: SecretString::from(api_username.into()),
            api_password: SecretString::from(api_password.into()),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_username(&self) -> &str {
        self.api_username.expose_secret()
    }

    pub fn api_password(&self) -> &str {
        self.api_password.expose_secret()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The configured base URL, or the production endpoint when unset or empty.
    pub fn resolved_base_url(&self) -> &str {
        match self.base_url.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => u.trim_end_matches('/'),
            _ => DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("api_username", &"<redacted>")
            .field("api_password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
