use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use voipms_core::types::CREDENTIAL_TYPE;
use voipms_core::{CredentialBundle, InvocationItem, NodeDescription, NodeRef};

use crate::executor::http::{HttpClient, HttpError, HttpRequestParts};
use crate::executor::query::RemoteQuery;
use crate::secrets::{redact_url, CredentialError};

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: String,
    pub uri: url::Url,
    pub qs: RemoteQuery,
    /// Decode the response body as JSON.
    pub json: bool,
}

impl RequestOptions {
    pub fn get(uri: url::Url, qs: RemoteQuery) -> Self {
        Self {
            method: "GET".to_string(),
            uri,
            qs,
            json: true,
        }
    }
}

/// Capabilities the host hands to the executor for one node invocation.
#[async_trait]
pub trait ExecutionContext: Send + Sync {
    fn node(&self) -> &NodeRef;

    fn input_len(&self) -> usize;

    async fn get_credentials(
        &self,
        credential_type: &str,
    ) -> Result<Option<CredentialBundle>, CredentialError>;

    /// Value of a node parameter for one item, `None` when it has neither a
    /// value nor a schema default.
    fn get_node_parameter(&self, name: &str, item_index: usize) -> Option<String>;

    async fn request(&self, options: RequestOptions) -> Result<serde_json::Value, HttpError>;
}

/// Context over an in-memory batch, the way a host would drive the node.
pub struct ItemContext {
    node: NodeRef,
    description: NodeDescription,
    items: Vec<InvocationItem>,
    credentials: Option<CredentialBundle>,
    client: Arc<dyn HttpClient>,
}

impl ItemContext {
    pub fn new(
        items: Vec<InvocationItem>,
        credentials: Option<CredentialBundle>,
        client: Arc<dyn HttpClient>,
    ) -> Self {
        let description = NodeDescription::voipms();
        Self {
            node: NodeRef::new(&description.defaults.name, &description.name),
            description,
            items,
            credentials,
            client,
        }
    }

    pub fn with_node(mut self, node: NodeRef) -> Self {
        self.node = node;
        self
    }

    pub fn items(&self) -> &[InvocationItem] {
        &self.items
    }
}

#[async_trait]
impl ExecutionContext for ItemContext {
    fn node(&self) -> &NodeRef {
        &self.node
    }

    fn input_len(&self) -> usize {
        self.items.len()
    }

    async fn get_credentials(
        &self,
        credential_type: &str,
    ) -> Result<Option<CredentialBundle>, CredentialError> {
        if credential_type != CREDENTIAL_TYPE {
            return Ok(None);
        }
        Ok(self.credentials.clone())
    }

    fn get_node_parameter(&self, name: &str, item_index: usize) -> Option<String> {
        let item = self.items.get(item_index)?;
        if let Some(v) = item.get(name) {
            return Some(v.to_string());
        }
        let params: BTreeMap<String, String> = self.description.resolve_selectors(&item.parameters);
        if let Some(v) = params.get(name) {
            return Some(v.clone());
        }
        self.description
            .parameter_default(name, &params)
            .map(str::to_string)
    }

    async fn request(&self, options: RequestOptions) -> Result<serde_json::Value, HttpError> {
        let mut url = options.uri;
        options.qs.apply_to(&mut url);
        tracing::debug!(method = %options.method, url = %redact_url(&url), "sending request");

        let mut headers = BTreeMap::new();
        if options.json {
            headers.insert("Accept".to_string(), "application/json".to_string());
        }
        let resp = self
            .client
            .send(HttpRequestParts {
                method: options.method,
                url,
                headers,
            })
            .await?;
        tracing::debug!(status = resp.status, bytes = resp.body.len(), "response received");

        if options.json {
            serde_json::from_slice(&resp.body).map_err(|e| HttpError::Decode(e.to_string()))
        } else {
            Ok(serde_json::Value::String(
                String::from_utf8_lossy(&resp.body).into_owned(),
            ))
        }
    }
}
