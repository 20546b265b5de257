use std::sync::Arc;

use serde::Serialize;
use voipms_core::{InvocationItem, NodeOperationError};
use voipms_exec::executor::{CompositeEventSink, EventSink, StderrEventSink, TracingEventSink};
use voipms_exec::{Executor, ItemContext};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, CredentialArgs, OutputArgs};

use super::config::{build_http_client, resolve_credentials};

#[derive(Serialize)]
struct RunFailure<'a> {
    error: String,
    node: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_index: Option<usize>,
}

/// Runs a batch and prints one JSON value per record on success.
pub async fn run_items(
    items: Vec<InvocationItem>,
    emit_events: bool,
    output: &OutputArgs,
    credentials: &CredentialArgs,
    client: &ClientArgs,
) -> i32 {
    let bundle = match resolve_credentials(credentials).await {
        Ok(b) => b,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let http = match build_http_client(client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let mut executor = Executor::new();
    if emit_events {
        let mut sinks = CompositeEventSink::new();
        sinks.add(Box::new(TracingEventSink));
        sinks.add(Box::new(StderrEventSink));
        executor = executor.with_events(Arc::new(sinks) as Arc<dyn EventSink>);
    }

    let ctx = ItemContext::new(items, bundle, http);
    match executor.execute(&ctx).await {
        Ok(records) => {
            let bodies: Vec<&serde_json::Value> = records.iter().map(|r| &r.json).collect();
            print_result(output.format, output.quiet, &bodies);
            exit_codes::SUCCESS
        }
        Err(e) => {
            report_failure(output, &e);
            exit_codes::RUN_FAILED
        }
    }
}

fn report_failure(output: &OutputArgs, err: &NodeOperationError) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => match err.item_index {
            Some(idx) => eprintln!("error: item {idx}: {err}"),
            None => eprintln!("error: {err}"),
        },
        OutputFormat::Json => {
            let failure = RunFailure {
                error: err.to_string(),
                node: &err.node.name,
                item_index: err.item_index,
            };
            eprintln!("{}", serde_json::to_string(&failure).unwrap_or_default());
        }
    }
}
