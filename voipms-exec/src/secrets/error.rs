use crate::secrets::SecretRef;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(SecretRef),
    #[error("secret provider error for {secret_ref}: {message}")]
    Provider {
        secret_ref: SecretRef,
        message: String,
    },
}

impl SecretError {
    pub fn provider(secret_ref: SecretRef, message: impl Into<String>) -> Self {
        Self::Provider {
            secret_ref,
            message: message.into(),
        }
    }
}

/// Failure to read a stored connection, as opposed to it being absent.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Secret(#[from] SecretError),
    #[error("credential field {field} is not valid UTF-8")]
    NotUtf8 { field: &'static str },
}
