use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use voipms_core::{CredentialBundle, InvocationItem, OperationErrorKind};
use voipms_exec::executor::{
    Event, EventSink, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ItemContext,
};
use voipms_exec::{execute_items, Executor};

// Replays scripted responses in order and records every request it sees.
#[derive(Default)]
struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponseParts, HttpError>>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedHttpClient {
    fn replying(bodies: &[serde_json::Value]) -> Arc<Self> {
        let client = Self::default();
        for b in bodies {
            client.push_json(b.clone());
        }
        Arc::new(client)
    }

    fn push_json(&self, body: serde_json::Value) {
        self.push_raw(serde_json::to_vec(&body).unwrap());
    }

    fn push_raw(&self, body: Vec<u8>) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponseParts {
            status: 200,
            headers: BTreeMap::new(),
            body,
        }));
    }

    fn push_error(&self, err: HttpError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    fn query(&self, idx: usize) -> BTreeMap<String, String> {
        self.requests()[idx]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Other("no scripted response".to_string())))
    }
}

#[derive(Default)]
struct RecordingEventSink(Mutex<Vec<Event>>);

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

fn creds() -> Option<CredentialBundle> {
    Some(CredentialBundle::new("alice@example.com", "s3cret-key"))
}

#[tokio::test]
async fn balance_then_dids_returns_bodies_in_order() {
    let client = ScriptedHttpClient::replying(&[
        json!({"status":"success","balance":{"balance":"10.00"}}),
        json!({"status":"success","dids":[]}),
    ]);
    let items = vec![
        InvocationItem::new("account", "getBalance"),
        InvocationItem::new("did", "listDIDs"),
    ];

    let out = execute_items(items, creds(), client.clone()).await.unwrap();

    let bodies: Vec<_> = out.iter().map(|r| r.json.clone()).collect();
    assert_eq!(
        bodies,
        vec![
            json!({"status":"success","balance":{"balance":"10.00"}}),
            json!({"status":"success","dids":[]}),
        ]
    );
    assert_eq!(client.query(0)["method"], "getBalance");
    assert_eq!(client.query(1)["method"], "getDIDs");
}

#[tokio::test]
async fn every_request_targets_the_rest_endpoint_with_credentials() {
    let client = ScriptedHttpClient::replying(&[json!({"status":"success"})]);
    execute_items(vec![InvocationItem::new("account", "getBalance")], creds(), client.clone())
        .await
        .unwrap();

    let req = &client.requests()[0];
    assert_eq!(req.method, "GET");
    assert_eq!(req.url.scheme(), "https");
    assert_eq!(req.url.host_str(), Some("api.voip.ms"));
    assert_eq!(req.url.path(), "/api/v1/rest.php");
    let q = client.query(0);
    assert_eq!(q["api_username"], "alice@example.com");
    assert_eq!(q["api_password"], "s3cret-key");
    assert_eq!(q["format"], "json");
    assert_eq!(q.len(), 4);
}

#[tokio::test]
async fn empty_base_url_falls_back_to_production() {
    let client = ScriptedHttpClient::replying(&[json!({}), json!({})]);
    let with_empty = CredentialBundle::new("u", "p").with_base_url("");
    execute_items(vec![InvocationItem::new("did", "listDIDs")], Some(with_empty), client.clone())
        .await
        .unwrap();
    let custom = CredentialBundle::new("u", "p").with_base_url("http://127.0.0.1:9/");
    execute_items(vec![InvocationItem::new("did", "listDIDs")], Some(custom), client.clone())
        .await
        .unwrap();

    let reqs = client.requests();
    let base = |i: usize| {
        let mut u = reqs[i].url.clone();
        u.set_query(None);
        u.to_string()
    };
    assert_eq!(base(0), "https://api.voip.ms/api/v1/rest.php");
    assert_eq!(base(1), "http://127.0.0.1:9/api/v1/rest.php");
}

#[tokio::test]
async fn send_sms_forwards_exactly_three_fields_verbatim() {
    let client = ScriptedHttpClient::replying(&[json!({"status":"success","sms":23434})]);
    let item = InvocationItem::send_sms(" 5551234567", "5557654321", "Héllo & goodbye  ");

    execute_items(vec![item], creds(), client.clone()).await.unwrap();

    let q = client.query(0);
    assert_eq!(q["method"], "sendSMS");
    assert_eq!(q["source"], " 5551234567");
    assert_eq!(q["destination"], "5557654321");
    assert_eq!(q["message"], "Héllo & goodbye  ");
    let keys: Vec<_> = q.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["api_password", "api_username", "destination", "format", "message", "method", "source"]
    );
}

#[tokio::test]
async fn unsupported_pair_fails_before_any_request() {
    let client = ScriptedHttpClient::replying(&[json!({})]);
    let err = execute_items(vec![InvocationItem::new("did", "sendSMS")], creds(), client.clone())
        .await
        .unwrap_err();

    assert!(client.requests().is_empty());
    assert_eq!(err.item_index, Some(0));
    assert_eq!(
        err.to_string(),
        "The resource/operation combination \"did/sendSMS\" is not implemented."
    );
    assert!(matches!(err.kind, OperationErrorKind::UnimplementedOperation { .. }));
}

#[tokio::test]
async fn missing_credentials_abort_before_network() {
    let client = ScriptedHttpClient::replying(&[json!({})]);
    let err = execute_items(vec![InvocationItem::new("account", "getBalance")], None, client.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind, OperationErrorKind::MissingCredentials);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn empty_batch_needs_no_credentials() {
    let client = ScriptedHttpClient::replying(&[]);
    let out = execute_items(vec![], None, client.clone()).await.unwrap();
    assert!(out.is_empty());
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn transport_failure_on_item_k_stops_the_batch() {
    let client = Arc::new(ScriptedHttpClient::default());
    client.push_json(json!({"n": 1}));
    client.push_json(json!({"n": 2}));
    client.push_error(HttpError::Network("connection reset".to_string()));
    client.push_json(json!({"n": 4}));

    let items = vec![
        InvocationItem::new("account", "getBalance"),
        InvocationItem::new("did", "listDIDs"),
        InvocationItem::new("account", "getBalance"),
        InvocationItem::new("did", "listDIDs"),
        InvocationItem::new("account", "getBalance"),
    ];
    let events = Arc::new(RecordingEventSink::default());
    let ctx = ItemContext::new(items, creds(), client.clone());

    let err = Executor::new()
        .with_events(events.clone())
        .execute(&ctx)
        .await
        .unwrap_err();

    assert_eq!(err.item_index, Some(2));
    assert_eq!(
        err.to_string(),
        "VoIP.ms API request failed: connect/dns/tls error: connection reset"
    );
    assert_eq!(client.requests().len(), 3);

    let events = events.0.lock().unwrap().clone();
    let succeeded: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::ItemSucceeded { item_index } => Some(*item_index),
            _ => None,
        })
        .collect();
    assert_eq!(succeeded, [0, 1]);
    assert!(matches!(
        events.last(),
        Some(Event::BatchFinished { succeeded: 2, failed: true, .. })
    ));
}

#[tokio::test]
async fn provider_error_status_is_passed_through() {
    let client = ScriptedHttpClient::replying(&[json!({"status":"invalid_credentials"})]);
    let out = execute_items(vec![InvocationItem::new("account", "getBalance")], creds(), client)
        .await
        .unwrap();
    assert_eq!(out[0].json, json!({"status":"invalid_credentials"}));
}

#[tokio::test]
async fn non_json_body_is_a_prefixed_failure() {
    let client = Arc::new(ScriptedHttpClient::default());
    client.push_raw(b"<html>maintenance</html>".to_vec());
    let err = execute_items(vec![InvocationItem::new("did", "listDIDs")], creds(), client)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, OperationErrorKind::RequestFailed { .. }));
    assert!(err.to_string().starts_with("VoIP.ms API request failed: invalid JSON response"));
}

#[tokio::test]
async fn failure_text_is_kept_verbatim_for_short_credentials() {
    let client = Arc::new(ScriptedHttpClient::default());
    client.push_raw(b"<html>oops</html>".to_vec());
    let creds = CredentialBundle::new("e", "pw");
    let err = execute_items(vec![InvocationItem::new("did", "listDIDs")], Some(creds), client)
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(!msg.contains("<redacted>"), "{msg}");
    assert!(
        msg.starts_with("VoIP.ms API request failed: invalid JSON response: expected value"),
        "{msg}"
    );
}

#[tokio::test]
async fn missing_credentials_report_only_batch_events() {
    let client = ScriptedHttpClient::replying(&[]);
    let events = Arc::new(RecordingEventSink::default());
    let ctx = ItemContext::new(vec![InvocationItem::new("account", "getBalance")], None, client);

    Executor::new()
        .with_events(events.clone())
        .execute(&ctx)
        .await
        .unwrap_err();

    let events = events.0.lock().unwrap().clone();
    assert_eq!(events.len(), 2, "{events:?}");
    assert!(matches!(events[0], Event::BatchStarted { items: 1, .. }));
    assert!(matches!(
        events[1],
        Event::BatchFinished { succeeded: 0, failed: true, .. }
    ));
}

#[tokio::test]
async fn items_without_selectors_use_schema_defaults() {
    let client = ScriptedHttpClient::replying(&[json!({}), json!({})]);
    let items = vec![
        InvocationItem::default(),
        InvocationItem::default().with_param("resource", "did"),
    ];
    execute_items(items, creds(), client.clone()).await.unwrap();
    assert_eq!(client.query(0)["method"], "getBalance");
    assert_eq!(client.query(1)["method"], "getDIDs");
}

#[tokio::test]
async fn errors_name_the_originating_node() {
    let client = ScriptedHttpClient::replying(&[]);
    let ctx = ItemContext::new(vec![InvocationItem::new("sms", "getBalance")], creds(), client)
        .with_node(voipms_core::NodeRef::new("Notify on-call", "voipMs"));
    let err = Executor::new().execute(&ctx).await.unwrap_err();
    assert_eq!(err.node.name, "Notify on-call");
}
