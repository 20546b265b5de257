use std::fmt;
use std::str::FromStr;

/// Names a secret without holding it, e.g. `secrets://VOIPMS_API_PASSWORD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecretRef {
    pub scheme: String,
    pub id: String,
}

impl SecretRef {
    pub fn new(scheme: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            id: id.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, SecretRefParseError> {
        let (scheme, id) = input
            .trim()
            .split_once("://")
            .ok_or(SecretRefParseError::MissingScheme)?;
        if scheme.is_empty() {
            return Err(SecretRefParseError::EmptyScheme);
        }
        if !is_valid_scheme(scheme) {
            return Err(SecretRefParseError::InvalidScheme(scheme.to_string()));
        }
        if id.is_empty() {
            return Err(SecretRefParseError::EmptyId);
        }
        Ok(Self::new(scheme, id))
    }
}

impl FromStr for SecretRef {
    type Err = SecretRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // an identifier, never the value
        write!(f, "{}://{}", self.scheme, self.id)
    }
}

// URI scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SecretRefParseError {
    #[error("secret reference must be URI-like (e.g. secrets://NAME)")]
    MissingScheme,
    #[error("secret reference scheme must not be empty")]
    EmptyScheme,
    #[error("invalid secret reference scheme: {0}")]
    InvalidScheme(String),
    #[error("secret reference id must not be empty")]
    EmptyId,
}
