//! Simulated Payment Processor
//!
//! Stands in for a real payment network: resolves after a fixed delay and
//! always approves. Decline handling in the machine is exercised through
//! the mock processor in tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ChargeOutcome, PaymentProcessor};
use crate::config::PaymentConfig;

pub struct SimulatedProcessor {
    settle_delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(Duration::from_millis(config.settle_delay_ms))
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn charge(&self, amount_usd: u32) -> ChargeOutcome {
        debug!(
            amount_usd,
            delay_ms = self.settle_delay.as_millis() as u64,
            "Simulating charge"
        );
        tokio::time::sleep(self.settle_delay).await;
        ChargeOutcome::Approved
    }
}
