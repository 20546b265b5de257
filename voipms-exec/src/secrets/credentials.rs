use voipms_core::CredentialBundle;

use crate::secrets::{CredentialError, SecretRef, SecretValue, SecretsProvider};

/// Where a host keeps the three fields of a VoIP.ms connection.
#[derive(Debug, Clone)]
pub struct CredentialSource {
    pub username: SecretRef,
    pub password: SecretRef,
    pub base_url: Option<SecretRef>,
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self {
            username: SecretRef::new("secrets", "VOIPMS_API_USERNAME"),
            password: SecretRef::new("secrets", "VOIPMS_API_PASSWORD"),
            base_url: Some(SecretRef::new("secrets", "VOIPMS_BASE_URL")),
        }
    }
}

impl CredentialSource {
    /// `Ok(None)` when the username or password is not stored at all; a
    /// missing base URL is not an error and falls back to the default.
    pub async fn resolve(
        &self,
        provider: &dyn SecretsProvider,
    ) -> Result<Option<CredentialBundle>, CredentialError> {
        let Some(username) = provider.get_optional(&self.username).await? else {
            return Ok(None);
        };
        let Some(password) = provider.get_optional(&self.password).await? else {
            return Ok(None);
        };

        let mut bundle = CredentialBundle::new(
            utf8(&username, "apiUsername")?,
            utf8(&password, "apiPassword")?,
        );
        if let Some(base_ref) = &self.base_url {
            if let Some(base) = provider.get_optional(base_ref).await? {
                bundle = bundle.with_base_url(utf8(&base, "baseUrl")?);
            }
        }
        Ok(Some(bundle))
    }
}

fn utf8(value: &SecretValue, field: &'static str) -> Result<String, CredentialError> {
    value
        .expose_str()
        .map(str::to_string)
        .map_err(|_| CredentialError::NotUtf8 { field })
}
