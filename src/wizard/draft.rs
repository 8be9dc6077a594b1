//! Draft Transaction
//!
//! The mutable in-progress purchase assembled across wizard steps. Owned
//! exclusively by the wizard machine; no other component mutates it.
//! Fields persist across forward/back navigation within the same draft;
//! only the explicit "send another" reset clears them.

use crate::catalog::AmountOption;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftTransaction {
    /// Canonical recipient digit string (see [`crate::phone::canonicalize`])
    pub recipient: String,
    /// Directory id of the detected carrier, if any
    pub carrier_id: Option<&'static str>,
    /// Selected denomination, if any
    pub amount: Option<AmountOption>,
    /// Personalization message: generated or manually edited
    pub message: Option<String>,
}

impl DraftTransaction {
    /// Reset for "send another": clears recipient, carrier, and amount.
    ///
    /// The message intentionally survives: a follow-up gift to someone
    /// else keeps the composed note until regenerated or edited.
    pub fn reset_for_new_purchase(&mut self) {
        self.recipient.clear();
        self.carrier_id = None;
        self.amount = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_purchase_fields() {
        let mut draft = DraftTransaction {
            recipient: "791234567".to_string(),
            carrier_id: Some("roshan"),
            amount: Some(AmountOption { usd: 20, afn: 1400 }),
            message: Some("tashakor!".to_string()),
        };

        draft.reset_for_new_purchase();

        assert!(draft.recipient.is_empty());
        assert!(draft.carrier_id.is_none());
        assert!(draft.amount.is_none());
        // Message survives the reset
        assert_eq!(draft.message.as_deref(), Some("tashakor!"));
    }
}
