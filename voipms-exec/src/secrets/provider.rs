use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::secrets::{SecretError, SecretRef, SecretValue};

#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn get(&self, secret_ref: &SecretRef) -> Result<SecretValue, SecretError>;

    /// Like `get`, but an absent secret is `Ok(None)` rather than an error.
    async fn get_optional(&self, secret_ref: &SecretRef) -> Result<Option<SecretValue>, SecretError> {
        match self.get(secret_ref).await {
            Ok(v) => Ok(Some(v)),
            Err(SecretError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Tries each provider in order; the first that knows the reference wins.
#[derive(Default)]
pub struct CompositeProvider {
    providers: Vec<Box<dyn SecretsProvider>>,
}

impl CompositeProvider {
    pub fn new(providers: Vec<Box<dyn SecretsProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl SecretsProvider for CompositeProvider {
    async fn get(&self, secret_ref: &SecretRef) -> Result<SecretValue, SecretError> {
        for p in &self.providers {
            match p.get(secret_ref).await {
                Ok(v) => return Ok(v),
                Err(SecretError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(SecretError::NotFound(secret_ref.clone()))
    }
}

/// Reads `secrets://NAME` from the environment variable `NAME`.
#[derive(Debug, Clone)]
pub struct EnvSecretsProvider {
    pub scheme: String,
    pub env_prefix: Option<String>,
}

impl Default for EnvSecretsProvider {
    fn default() -> Self {
        Self {
            scheme: "secrets".to_string(),
            env_prefix: None,
        }
    }
}

#[async_trait]
impl SecretsProvider for EnvSecretsProvider {
    async fn get(&self, secret_ref: &SecretRef) -> Result<SecretValue, SecretError> {
        if secret_ref.scheme != self.scheme {
            return Err(SecretError::NotFound(secret_ref.clone()));
        }
        let key = match &self.env_prefix {
            None => secret_ref.id.clone(),
            Some(p) => format!("{p}{}", secret_ref.id),
        };
        match std::env::var(&key) {
            Ok(v) => Ok(SecretValue::from_string(v)),
            Err(std::env::VarError::NotPresent) => Err(SecretError::NotFound(secret_ref.clone())),
            Err(e) => Err(SecretError::provider(secret_ref.clone(), e.to_string())),
        }
    }
}

/// Reads `secrets://NAME` from the file `base_dir/NAME`.
#[derive(Debug, Clone)]
pub struct FileSecretsProvider {
    pub scheme: String,
    pub base_dir: PathBuf,
}

impl FileSecretsProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            scheme: "secrets".to_string(),
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl SecretsProvider for FileSecretsProvider {
    async fn get(&self, secret_ref: &SecretRef) -> Result<SecretValue, SecretError> {
        if secret_ref.scheme != self.scheme {
            return Err(SecretError::NotFound(secret_ref.clone()));
        }
        if secret_ref.id.split('/').any(|seg| seg == "..") {
            return Err(SecretError::provider(
                secret_ref.clone(),
                "secret id must not escape the secrets directory",
            ));
        }
        let path = self.base_dir.join(&secret_ref.id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(SecretValue::from_bytes(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SecretError::NotFound(secret_ref.clone()))
            }
            Err(e) => Err(SecretError::provider(secret_ref.clone(), e.to_string())),
        }
    }
}

/// In-memory secrets, keyed by the full reference.
#[derive(Default)]
pub struct StaticSecretsProvider {
    values: BTreeMap<SecretRef, SecretValue>,
}

impl StaticSecretsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, secret_ref: SecretRef, value: impl Into<String>) -> Self {
        self.values
            .insert(secret_ref, SecretValue::from_string(value.into()));
        self
    }
}

#[async_trait]
impl SecretsProvider for StaticSecretsProvider {
    async fn get(&self, secret_ref: &SecretRef) -> Result<SecretValue, SecretError> {
        self.values
            .get(secret_ref)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_ref.clone()))
    }
}
