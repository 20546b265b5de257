use std::sync::Arc;

use voipms_core::types::CREDENTIAL_TYPE;
use voipms_core::{
    lookup, CredentialBundle, InvocationItem, NodeOperationError, OperationErrorKind, OutputRecord,
};

use crate::executor::context::{ExecutionContext, ItemContext, RequestOptions};
use crate::executor::events::{Event, EventSink, TracingEventSink};
use crate::executor::http::HttpClient;
use crate::executor::query::{build_remote_query, endpoint};

/// Runs a batch of items against the provider, one request per item, in
/// order. The first failure aborts the batch.
pub struct Executor {
    events: Arc<dyn EventSink>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    pub fn new() -> Self {
        Self {
            events: Arc::new(TracingEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub async fn execute(
        &self,
        ctx: &dyn ExecutionContext,
    ) -> Result<Vec<OutputRecord>, NodeOperationError> {
        let node = ctx.node().clone();
        self.events
            .emit(Event::BatchStarted {
                node: node.name.clone(),
                items: ctx.input_len(),
            })
            .await;

        let mut records = Vec::with_capacity(ctx.input_len());
        let outcome = self.run(ctx, &mut records).await;

        self.events
            .emit(Event::BatchFinished {
                node: node.name.clone(),
                succeeded: records.len(),
                failed: outcome.is_err(),
            })
            .await;

        match outcome {
            Ok(()) => Ok(records),
            Err((item_index, kind)) => Err(NodeOperationError::new(node, kind).at_item(item_index)),
        }
    }

    async fn run(
        &self,
        ctx: &dyn ExecutionContext,
        records: &mut Vec<OutputRecord>,
    ) -> Result<(), (usize, OperationErrorKind)> {
        let total = ctx.input_len();
        if total == 0 {
            return Ok(());
        }

        // Resolved once; the bundle is immutable for the run. No item has
        // started yet, so only BatchFinished reports this failure.
        let credentials = resolve_credentials(ctx).await.map_err(|kind| (0, kind))?;

        for item_index in 0..total {
            match self.run_item(ctx, &credentials, item_index).await {
                Ok(json) => {
                    records.push(OutputRecord::new(json));
                    self.events.emit(Event::ItemSucceeded { item_index }).await;
                }
                Err(kind) => {
                    self.item_failed(item_index, &kind).await;
                    return Err((item_index, kind));
                }
            }
        }
        Ok(())
    }

    async fn run_item(
        &self,
        ctx: &dyn ExecutionContext,
        credentials: &CredentialBundle,
        item_index: usize,
    ) -> Result<serde_json::Value, OperationErrorKind> {
        let resource = ctx
            .get_node_parameter("resource", item_index)
            .unwrap_or_default();
        let operation = ctx
            .get_node_parameter("operation", item_index)
            .unwrap_or_default();
        self.events
            .emit(Event::ItemStarted {
                item_index,
                resource: resource.clone(),
                operation: operation.clone(),
            })
            .await;

        let Some(descriptor) = lookup(&resource, &operation) else {
            return Err(OperationErrorKind::UnimplementedOperation {
                resource,
                operation,
            });
        };

        let qs = build_remote_query(descriptor, credentials, |name| {
            ctx.get_node_parameter(name, item_index)
        });
        let uri = endpoint(credentials)
            .map_err(|e| request_failed(format!("invalid base URL: {e}")))?;

        ctx.request(RequestOptions::get(uri, qs))
            .await
            .map_err(|e| request_failed(e.to_string()))
    }

    async fn item_failed(&self, item_index: usize, kind: &OperationErrorKind) {
        self.events
            .emit(Event::ItemFailed {
                item_index,
                reason: kind.to_string(),
            })
            .await;
    }
}

async fn resolve_credentials(
    ctx: &dyn ExecutionContext,
) -> Result<CredentialBundle, OperationErrorKind> {
    match ctx.get_credentials(CREDENTIAL_TYPE).await {
        Ok(Some(c)) => Ok(c),
        Ok(None) => Err(OperationErrorKind::MissingCredentials),
        Err(e) => {
            tracing::warn!(error = %e, "credential lookup failed");
            Err(OperationErrorKind::MissingCredentials)
        }
    }
}

/// Transport errors never carry the request URL, so the text is kept as is.
fn request_failed(message: String) -> OperationErrorKind {
    OperationErrorKind::RequestFailed { message }
}

/// Runs `items` with the stock [`ItemContext`].
pub async fn execute_items(
    items: Vec<InvocationItem>,
    credentials: Option<CredentialBundle>,
    client: Arc<dyn HttpClient>,
) -> Result<Vec<OutputRecord>, NodeOperationError> {
    let ctx = ItemContext::new(items, credentials, client);
    Executor::new().execute(&ctx).await
}
