//! Payment processing capability and its simulated implementation.
//!
//! The real gateway integration is out of scope; [`SimulatedProcessor`]
//! stands in for it behind the [`PaymentProcessor`] trait so the
//! pricing pipeline never needs to change when a real one arrives.

use crate::money::Money;
use crate::payment::PaymentMethod;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Outcome of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment accepted.
    Confirmed,
    /// Payment declined.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Confirmed => "CONFIRMED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

/// Capability of charging an amount against a payment method.
///
/// Processing never errors; a decline is a [`PaymentStatus::Failed`]
/// value, not a failure of the checkout.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Attempt to charge the amount.
    async fn process(&self, amount: Money, method: PaymentMethod) -> PaymentStatus;
}

/// Configuration for the simulated processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Artificial processing latency in milliseconds.
    pub latency_ms: u64,
    /// Probability (0.0 - 1.0) that a payment is confirmed.
    pub success_rate: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            latency_ms: 100,
            success_rate: 0.95,
        }
    }
}

/// Simulated payment gateway.
///
/// Waits a configured latency on a tokio timer (other in-flight
/// checkouts keep running), then confirms with the configured
/// probability. Tests pin `success_rate` to 1.0 or 0.0 and
/// `latency_ms` to 0 for determinism.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProcessor {
    config: ProcessorConfig,
}

impl SimulatedProcessor {
    /// Create a processor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    /// Create a processor with an explicit configuration.
    pub fn with_config(config: ProcessorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn process(&self, amount: Money, method: PaymentMethod) -> PaymentStatus {
        use rand::Rng;

        tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;

        let success = rand::thread_rng().gen_bool(self.config.success_rate.clamp(0.0, 1.0));
        let status = if success {
            PaymentStatus::Confirmed
        } else {
            PaymentStatus::Failed
        };

        debug!(
            amount = %amount,
            method = method.as_str(),
            processor = method.processor_name(),
            status = status.as_str(),
            "payment simulated"
        );

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn instant_processor(success_rate: f64) -> SimulatedProcessor {
        SimulatedProcessor::with_config(ProcessorConfig {
            latency_ms: 0,
            success_rate,
        })
    }

    #[tokio::test]
    async fn test_always_confirms_at_full_rate() {
        let processor = instant_processor(1.0);
        let amount = Money::new(10000, Currency::USD);

        for _ in 0..10 {
            let status = processor.process(amount, PaymentMethod::CreditCard).await;
            assert_eq!(status, PaymentStatus::Confirmed);
        }
    }

    #[tokio::test]
    async fn test_always_fails_at_zero_rate() {
        let processor = instant_processor(0.0);
        let amount = Money::new(10000, Currency::USD);

        for _ in 0..10 {
            let status = processor.process(amount, PaymentMethod::Cash).await;
            assert_eq!(status, PaymentStatus::Failed);
        }
    }

    #[test]
    fn test_status_tags() {
        assert_eq!(PaymentStatus::Confirmed.as_str(), "CONFIRMED");
        assert_eq!(PaymentStatus::Failed.as_str(), "FAILED");
    }

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.latency_ms, 100);
        assert_eq!(config.success_rate, 0.95);
    }
}
