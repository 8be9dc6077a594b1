//! Wizard Error Types
//!
//! Transition-guard failures are soft blocks: a UI disables the control
//! when [`can_advance`](super::machine::WizardMachine::can_advance) is
//! false, and a forced call returns one of these instead of panicking.

use thiserror::Error;

use super::state::WizardStep;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    // === Transition guards (soft blocks) ===
    #[error("Recipient number too short ({got} digits, need {need})")]
    RecipientTooShort { got: usize, need: usize },

    #[error("No amount selected")]
    NoAmountSelected,

    // === Flow errors ===
    #[error("Expected step {expected}, current step is {actual}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("No back transition available from {0}")]
    BackNotAvailable(WizardStep),

    #[error("Forward transition from {0} is driven by a dedicated operation")]
    ForwardNotAvailable(WizardStep),

    #[error("Not authenticated")]
    NotAuthenticated,

    // === Catalog ===
    #[error("Unknown denomination: ${0}")]
    UnknownDenomination(u32),

    // === Asynchronous operations ===
    #[error("{0} operation already in flight")]
    OperationInFlight(&'static str),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}

impl WizardError {
    /// Get the error code for client-facing responses
    pub fn code(&self) -> &'static str {
        match self {
            WizardError::RecipientTooShort { .. } => "RECIPIENT_TOO_SHORT",
            WizardError::NoAmountSelected => "NO_AMOUNT_SELECTED",
            WizardError::WrongStep { .. } => "WRONG_STEP",
            WizardError::BackNotAvailable(_) => "BACK_NOT_AVAILABLE",
            WizardError::ForwardNotAvailable(_) => "FORWARD_NOT_AVAILABLE",
            WizardError::NotAuthenticated => "NOT_AUTHENTICATED",
            WizardError::UnknownDenomination(_) => "UNKNOWN_DENOMINATION",
            WizardError::OperationInFlight(_) => "OPERATION_IN_FLIGHT",
            WizardError::PaymentDeclined(_) => "PAYMENT_DECLINED",
        }
    }

    /// Check if this is a validation-gate failure (disable the control,
    /// show no error message)
    pub fn is_soft_block(&self) -> bool {
        matches!(
            self,
            WizardError::RecipientTooShort { .. } | WizardError::NoAmountSelected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WizardError::RecipientTooShort { got: 8, need: 9 }.code(),
            "RECIPIENT_TOO_SHORT"
        );
        assert_eq!(WizardError::NoAmountSelected.code(), "NO_AMOUNT_SELECTED");
        assert_eq!(
            WizardError::PaymentDeclined("card expired".into()).code(),
            "PAYMENT_DECLINED"
        );
    }

    #[test]
    fn test_soft_blocks() {
        assert!(WizardError::RecipientTooShort { got: 3, need: 9 }.is_soft_block());
        assert!(WizardError::NoAmountSelected.is_soft_block());
        assert!(!WizardError::NotAuthenticated.is_soft_block());
        assert!(!WizardError::PaymentDeclined("x".into()).is_soft_block());
    }

    #[test]
    fn test_display() {
        let err = WizardError::WrongStep {
            expected: WizardStep::Payment,
            actual: WizardStep::Landing,
        };
        assert_eq!(err.to_string(), "Expected step PAYMENT, current step is LANDING");
    }
}
