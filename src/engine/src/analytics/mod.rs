pub mod backends;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

pub use backends::{RecordingBackend, TracingBackend};

pub type EventParams = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub params: EventParams,
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Fire-and-forget event logging. Implementations must never fail the caller.
pub trait AnalyticsSink {
    fn log_event(&self, name: &str, params: Option<&EventParams>);
}

/// Delivery of a single event, which may fail
pub trait EventBackend {
    fn send(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Wraps a backend so delivery failures are logged and dropped.
pub struct Analytics<B> {
    backend: B,
}

impl<B: EventBackend> Analytics<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: EventBackend> AnalyticsSink for Analytics<B> {
    fn log_event(&self, name: &str, params: Option<&EventParams>) {
        let event = AnalyticsEvent {
            name: name.to_string(),
            params: params.cloned().unwrap_or_default(),
        };
        if let Err(e) = self.backend.send(&event) {
            warn!("Dropping analytics event {}: {}", name, e);
        }
    }
}
