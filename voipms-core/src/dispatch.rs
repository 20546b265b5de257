//! The flat `(resource, operation)` table that drives request construction.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resource {
    #[serde(rename = "account")]
    Account,
    #[serde(rename = "did")]
    Did,
    #[serde(rename = "sms")]
    Sms,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Account, Resource::Did, Resource::Sms];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Account => "account",
            Resource::Did => "did",
            Resource::Sms => "sms",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Resource::Account => "Account",
            Resource::Did => "DID",
            Resource::Sms => "SMS",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownSelector(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    #[serde(rename = "getBalance")]
    GetBalance,
    #[serde(rename = "listDIDs")]
    ListDids,
    #[serde(rename = "sendSMS")]
    SendSms,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::GetBalance, Operation::ListDids, Operation::SendSms];

    /// User-facing label; not necessarily the provider's method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::GetBalance => "getBalance",
            Operation::ListDids => "listDIDs",
            Operation::SendSms => "sendSMS",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownSelector(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selector: {0}")]
pub struct UnknownSelector(pub String);

/// One supported `(resource, operation)` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub resource: Resource,
    pub operation: Operation,
    pub display_name: &'static str,
    /// Value of the `method` query parameter sent to the provider.
    pub wire_method: &'static str,
    /// Item fields forwarded verbatim as extra query parameters, in order.
    pub extra_fields: &'static [&'static str],
}

pub const SMS_FIELDS: &[&str] = &["source", "destination", "message"];

pub static OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        resource: Resource::Account,
        operation: Operation::GetBalance,
        display_name: "Get Balance",
        wire_method: "getBalance",
        extra_fields: &[],
    },
    OperationDescriptor {
        resource: Resource::Did,
        operation: Operation::ListDids,
        display_name: "List DIDs",
        wire_method: "getDIDs",
        extra_fields: &[],
    },
    OperationDescriptor {
        resource: Resource::Sms,
        operation: Operation::SendSms,
        display_name: "Send SMS",
        wire_method: "sendSMS",
        extra_fields: SMS_FIELDS,
    },
];

/// Looks up the raw selector strings of an item. Unknown strings and known
/// but mismatched pairs both miss.
pub fn lookup(resource: &str, operation: &str) -> Option<&'static OperationDescriptor> {
    OPERATIONS
        .iter()
        .find(|d| d.resource.as_str() == resource && d.operation.as_str() == operation)
}

pub fn operations_for(resource: Resource) -> impl Iterator<Item = &'static OperationDescriptor> {
    OPERATIONS.iter().filter(move |d| d.resource == resource)
}
