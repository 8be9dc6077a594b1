//! Collaborator Adapters
//!
//! Seams to the external services the wizard depends on: the payment
//! processor and the text-generation service. Each is a single-operation
//! async trait so the machine can be driven by mocks in tests.

pub mod composer;
pub mod payment;

// Re-export adapters for convenient access
pub use composer::{ComposerError, FALLBACK_MESSAGE, HttpComposer};
pub use payment::SimulatedProcessor;

use async_trait::async_trait;

/// Outcome of a charge attempt.
///
/// A single attempt is made per invocation - no retry logic, and no
/// unknown/pending state: the processor must resolve one way or the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// Charge settled; the recorder may run
    Approved,
    /// Charge explicitly declined with a user-presentable reason
    Declined(String),
}

impl ChargeOutcome {
    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self, ChargeOutcome::Approved)
    }

    #[inline]
    pub fn is_declined(&self) -> bool {
        matches!(self, ChargeOutcome::Declined(_))
    }
}

/// Payment processor collaborator.
///
/// The core's contract is limited to this one call and its eventual
/// resolution.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Get adapter name for logging
    fn name(&self) -> &'static str;

    /// Charge the given source-currency amount (whole units).
    async fn charge(&self, amount_usd: u32) -> ChargeOutcome;
}

/// Text-generation collaborator.
#[async_trait]
pub trait MessageComposer: Send + Sync {
    /// Get adapter name for logging
    fn name(&self) -> &'static str;

    /// Generate free-form text for the given prompt.
    ///
    /// May fail; the wizard recovers with a fixed fallback message and
    /// never blocks checkout on a composer error.
    async fn generate(&self, prompt: &str) -> Result<String, ComposerError>;
}

/// Mock adapters for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub struct MockProcessor {
        charge_count: AtomicUsize,
        /// When set, charges resolve Declined with this reason
        decline_reason: Mutex<Option<String>>,
        /// Artificial settle delay for in-flight tests
        delay: Mutex<Duration>,
    }

    impl MockProcessor {
        pub fn new() -> Self {
            Self {
                charge_count: AtomicUsize::new(0),
                decline_reason: Mutex::new(None),
                delay: Mutex::new(Duration::ZERO),
            }
        }

        pub fn set_decline(&self, reason: Option<&str>) {
            *self.decline_reason.lock().unwrap() = reason.map(str::to_string);
        }

        pub fn set_delay(&self, delay: Duration) {
            *self.delay.lock().unwrap() = delay;
        }

        pub fn charge_count(&self) -> usize {
            self.charge_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentProcessor for MockProcessor {
        fn name(&self) -> &'static str {
            "mock-processor"
        }

        async fn charge(&self, _amount_usd: u32) -> ChargeOutcome {
            self.charge_count.fetch_add(1, Ordering::SeqCst);

            let delay = *self.delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.decline_reason.lock().unwrap().clone() {
                Some(reason) => ChargeOutcome::Declined(reason),
                None => ChargeOutcome::Approved,
            }
        }
    }

    pub struct MockComposer {
        generate_count: AtomicUsize,
        fail: Mutex<bool>,
        reply: Mutex<String>,
        last_prompt: Mutex<Option<String>>,
        /// Artificial generation delay for in-flight tests
        delay: Mutex<Duration>,
    }

    impl MockComposer {
        pub fn new() -> Self {
            Self {
                generate_count: AtomicUsize::new(0),
                fail: Mutex::new(false),
                reply: Mutex::new("Sending you credit with love!".to_string()),
                last_prompt: Mutex::new(None),
                delay: Mutex::new(Duration::ZERO),
            }
        }

        pub fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        pub fn set_delay(&self, delay: Duration) {
            *self.delay.lock().unwrap() = delay;
        }

        pub fn set_reply(&self, reply: &str) {
            *self.reply.lock().unwrap() = reply.to_string();
        }

        pub fn generate_count(&self) -> usize {
            self.generate_count.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.last_prompt.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageComposer for MockComposer {
        fn name(&self) -> &'static str {
            "mock-composer"
        }

        async fn generate(&self, prompt: &str) -> Result<String, ComposerError> {
            self.generate_count.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

            let delay = *self.delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            if *self.fail.lock().unwrap() {
                Err(ComposerError::Http("mock generation failure".to_string()))
            } else {
                Ok(self.reply.lock().unwrap().clone())
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_processor_approves_by_default() {
            let processor = MockProcessor::new();
            assert!(processor.charge(20).await.is_approved());
            assert_eq!(processor.charge_count(), 1);
        }

        #[tokio::test]
        async fn test_mock_processor_decline() {
            let processor = MockProcessor::new();
            processor.set_decline(Some("insufficient funds"));
            let outcome = processor.charge(20).await;
            assert_eq!(
                outcome,
                ChargeOutcome::Declined("insufficient funds".to_string())
            );
        }

        #[tokio::test]
        async fn test_mock_composer_failure_toggle() {
            let composer = MockComposer::new();
            assert!(composer.generate("hi").await.is_ok());

            composer.set_fail(true);
            assert!(composer.generate("hi").await.is_err());
            assert_eq!(composer.generate_count(), 2);
        }
    }
}

#[cfg(test)]
pub use mock::{MockComposer, MockProcessor};
