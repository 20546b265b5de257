mod context;
pub mod events;
pub mod http;
mod query;
mod runner;

pub use context::{ExecutionContext, ItemContext, RequestOptions};
pub use events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, StderrEventSink, TracingEventSink,
};
pub use http::{
    ClientConfig, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
};
pub use query::{build_remote_query, endpoint, RemoteQuery, REST_PATH};
pub use runner::{execute_items, Executor};
