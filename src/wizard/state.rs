//! Wizard Step Definitions
//!
//! The steps form a total order on the happy path; forward transitions go
//! to `id + 1` and back-transitions to `id - 1` only.

use std::fmt;

/// Wizard steps in happy-path order.
///
/// Authentication is a precondition gate outside the purchase flow proper;
/// Landing is the idle/entry state reachable only after authentication.
/// Success is terminal for the draft - only "send another" leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WizardStep {
    Authentication = 0,
    Landing = 1,
    RecipientEntry = 2,
    AmountSelection = 3,
    Personalization = 4,
    Payment = 5,
    Success = 6,
}

impl WizardStep {
    /// Get the ordinal step ID
    #[inline]
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Convert from an ordinal step ID
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(WizardStep::Authentication),
            1 => Some(WizardStep::Landing),
            2 => Some(WizardStep::RecipientEntry),
            3 => Some(WizardStep::AmountSelection),
            4 => Some(WizardStep::Personalization),
            5 => Some(WizardStep::Payment),
            6 => Some(WizardStep::Success),
            _ => None,
        }
    }

    /// The immediately following step on the happy path
    pub fn next(&self) -> Option<Self> {
        Self::from_id(self.id() + 1)
    }

    /// The immediately preceding step
    pub fn prev(&self) -> Option<Self> {
        self.id().checked_sub(1).and_then(Self::from_id)
    }

    /// Check if this is the terminal step for a draft
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Success)
    }

    /// Steps inside the purchase flow proper (a draft transaction exists)
    #[inline]
    pub fn in_purchase_flow(&self) -> bool {
        *self >= WizardStep::RecipientEntry
    }

    /// Get human-readable step name
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Authentication => "AUTHENTICATION",
            WizardStep::Landing => "LANDING",
            WizardStep::RecipientEntry => "RECIPIENT_ENTRY",
            WizardStep::AmountSelection => "AMOUNT_SELECTION",
            WizardStep::Personalization => "PERSONALIZATION",
            WizardStep::Payment => "PAYMENT",
            WizardStep::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WizardStep::from_id(value).ok_or(())
    }
}
