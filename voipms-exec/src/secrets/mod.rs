mod credentials;
mod error;
mod provider;
mod redact;
mod r#ref;
mod value;

pub use credentials::CredentialSource;
pub use error::{CredentialError, SecretError};
pub use provider::{
    CompositeProvider, EnvSecretsProvider, FileSecretsProvider, SecretsProvider,
    StaticSecretsProvider,
};
pub use redact::{redact_url, SENSITIVE_QUERY_KEYS};
pub use r#ref::{SecretRef, SecretRefParseError};
pub use value::SecretValue;
