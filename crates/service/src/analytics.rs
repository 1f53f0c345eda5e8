//! Contract for the product analytics collaborator.
//!
//! The recording subsystem lives outside the catalogue; handlers only need
//! to report that a product detail page was served.

use async_trait::async_trait;
use tracing::info;

use crate::errors::ServiceError;

#[async_trait]
pub trait ProductAnalytics: Send + Sync {
    async fn record_visit(&self, product_id: i32) -> Result<(), ServiceError>;
}

/// Emits every visit as a structured tracing event for downstream collection.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProductAnalytics;

#[async_trait]
impl ProductAnalytics for TracingProductAnalytics {
    async fn record_visit(&self, product_id: i32) -> Result<(), ServiceError> {
        info!(event = "product_visit", product_id, "product visit recorded");
        Ok(())
    }
}

/// In-memory recorder for tests and local runs
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingProductAnalytics {
        visits: Mutex<Vec<i32>>,
        fail: bool,
    }

    impl RecordingProductAnalytics {
        /// Records the visit, then reports failure.
        pub fn failing() -> Self {
            Self { visits: Mutex::default(), fail: true }
        }

        pub fn visits(&self) -> Vec<i32> {
            self.visits.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl ProductAnalytics for RecordingProductAnalytics {
        async fn record_visit(&self, product_id: i32) -> Result<(), ServiceError> {
            self.visits.lock().unwrap_or_else(|e| e.into_inner()).push(product_id);
            if self.fail {
                return Err(ServiceError::Db("analytics store unavailable".into()));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingProductAnalytics;
    use super::*;

    #[tokio::test]
    async fn recorder_keeps_visit_order() {
        let rec = RecordingProductAnalytics::default();
        rec.record_visit(3).await.unwrap();
        rec.record_visit(1).await.unwrap();
        assert_eq!(rec.visits(), vec![3, 1]);
    }

    #[tokio::test]
    async fn failing_recorder_still_counts() {
        let rec = RecordingProductAnalytics::failing();
        assert!(rec.record_visit(5).await.is_err());
        assert_eq!(rec.visits(), vec![5]);
    }

    #[tokio::test]
    async fn tracing_recorder_is_infallible() {
        assert!(TracingProductAnalytics.record_visit(1).await.is_ok());
    }
}
