use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::types::{CredentialBundle, InvocationItem, NodeDescription};

use super::rules;

/// Numbers as VoIP.ms accepts them: digits only, optional leading `+`.
pub(crate) static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid"));

/// Longest message the provider accepts in a single SMS.
pub(crate) const MAX_SMS_CHARS: usize = 160;

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_items(&mut self, node: &NodeDescription, items: &[InvocationItem]) {
        for (idx, item) in items.iter().enumerate() {
            rules::item::validate_item(self, node, &format!("items[{idx}]"), item);
        }
    }

    pub fn validate_credentials(&mut self, credentials: &CredentialBundle) {
        rules::credentials::validate_credentials(self, "credentials", credentials);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }
}
