use async_trait::async_trait;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BatchStarted {
        node: String,
        items: usize,
    },
    BatchFinished {
        node: String,
        succeeded: usize,
        failed: bool,
    },
    ItemStarted {
        item_index: usize,
        resource: String,
        operation: String,
    },
    ItemSucceeded {
        item_index: usize,
    },
    ItemFailed {
        item_index: usize,
        reason: String,
    },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BatchStarted { .. } => "batch.started",
            Event::BatchFinished { .. } => "batch.finished",
            Event::ItemStarted { .. } => "item.started",
            Event::ItemSucceeded { .. } => "item.succeeded",
            Event::ItemFailed { .. } => "item.failed",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut v = match self {
            Event::BatchStarted { node, items } => json!({ "node": node, "items": items }),
            Event::BatchFinished {
                node,
                succeeded,
                failed,
            } => json!({ "node": node, "succeeded": succeeded, "failed": failed }),
            Event::ItemStarted {
                item_index,
                resource,
                operation,
            } => json!({ "item_index": item_index, "resource": resource, "operation": operation }),
            Event::ItemSucceeded { item_index } => json!({ "item_index": item_index }),
            Event::ItemFailed { item_index, reason } => {
                json!({ "item_index": item_index, "reason": reason })
            }
        };
        v["type"] = json!(self.event_type());
        v
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Forwards events to the `tracing` subscriber installed by the host.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match &event {
            Event::BatchStarted { node, items } => {
                tracing::info!(node = %node, items, "batch started");
            }
            Event::BatchFinished {
                node,
                succeeded,
                failed,
            } => {
                tracing::info!(node = %node, succeeded, failed, "batch finished");
            }
            Event::ItemStarted {
                item_index,
                resource,
                operation,
            } => {
                tracing::debug!(item_index, resource = %resource, operation = %operation, "item started");
            }
            Event::ItemSucceeded { item_index } => {
                tracing::debug!(item_index, "item succeeded");
            }
            Event::ItemFailed { item_index, reason } => {
                tracing::warn!(item_index, reason = %reason, "item failed");
            }
        }
    }
}

/// Writes each event as one JSON line on stderr.
pub struct StderrEventSink;

#[async_trait]
impl EventSink for StderrEventSink {
    async fn emit(&self, event: Event) {
        eprintln!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_type_tag() {
        let v = Event::ItemFailed {
            item_index: 2,
            reason: "boom".to_string(),
        }
        .to_json();
        assert_eq!(v["type"], "item.failed");
        assert_eq!(v["item_index"], 2);
        assert_eq!(v["reason"], "boom");
    }

    #[tokio::test]
    async fn composite_fans_out_to_every_sink() {
        use std::sync::{Arc, Mutex};

        struct Counting(Arc<Mutex<usize>>);

        #[async_trait]
        impl EventSink for Counting {
            async fn emit(&self, _event: Event) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let count = Arc::new(Mutex::new(0));
        let mut sink = CompositeEventSink::new();
        sink.add(Box::new(Counting(count.clone())));
        sink.add(Box::new(NoOpEventSink));
        sink.add(Box::new(Counting(count.clone())));
        sink.emit(Event::ItemSucceeded { item_index: 0 }).await;
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
