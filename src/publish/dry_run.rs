//! Publisher that only logs.

use super::traits::{PublishRequest, Publisher};
use crate::error::PublishError;
use tracing::info;

/// Publisher that logs each request instead of contacting a broker.
///
/// Every call succeeds. The number of requests seen is kept for reporting.
#[derive(Debug, Default)]
pub struct DryRunPublisher {
    published: usize,
}

impl DryRunPublisher {
    /// Creates a new dry-run publisher.
    #[must_use]
    pub const fn new() -> Self {
        Self { published: 0 }
    }

    /// Number of requests accepted so far.
    #[must_use]
    pub const fn published(&self) -> usize {
        self.published
    }
}

impl Publisher for DryRunPublisher {
    fn publish(&mut self, request: &PublishRequest) -> Result<(), PublishError> {
        self.published += 1;
        info!(
            topic = %request.topic,
            host = %request.host,
            port = request.port,
            qos = request.qos,
            client_id = %request.client_id,
            payload = %request.payload,
            "dry run: skipping broker delivery"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_counts() {
        let mut publisher = DryRunPublisher::new();
        let request = PublishRequest {
            topic: "t".to_string(),
            host: "h".to_string(),
            port: 1883,
            payload: "p".to_string(),
            qos: 0,
            client_id: "c".to_string(),
            retain: false,
        };
        assert!(publisher.publish(&request).is_ok());
        assert!(publisher.publish(&request).is_ok());
        assert_eq!(publisher.published(), 2);
        assert_eq!(publisher.name(), "dry-run");
    }
}
