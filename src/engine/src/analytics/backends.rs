use std::sync::Mutex;

use tracing::info;

use super::{AnalyticsError, AnalyticsEvent, EventBackend};

/// Writes each event to the `analytics` tracing target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBackend;

impl EventBackend for TracingBackend {
    fn send(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let params = serde_json::to_string(&event.params)?;
        info!(target: "analytics", event = %event.name, %params, "analytics event");
        Ok(())
    }
}

/// Keeps events in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct RecordingBackend {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingBackend {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventBackend for RecordingBackend {
    fn send(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))?;
        events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::EventParams;

    #[test]
    fn test_tracing_backend_accepts_events() {
        let event = AnalyticsEvent {
            name: "map_generated".to_string(),
            params: EventParams::new(),
        };
        assert!(TracingBackend.send(&event).is_ok());
    }
}
