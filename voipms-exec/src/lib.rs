#![forbid(unsafe_code)]

//! Runtime half of the VoIP.ms connector.
//!
//! The [`Executor`] turns each input item into one `GET {baseUrl}/api/v1/rest.php`
//! call through the capabilities of an [`ExecutionContext`]. Hosts that do not
//! bring their own context can use [`ItemContext`] together with a
//! [`secrets::CredentialSource`] to resolve the connection.

pub mod executor;
pub mod secrets;

pub use crate::executor::{
    execute_items, ExecutionContext, Executor, HttpClient, ItemContext, ReqwestHttpClient,
};
