//! Transaction History
//!
//! Immutable receipts for completed purchases. Records are created only by
//! the recorder at the moment of successful payment, prepended to the
//! session history (most-recent-first), and never deleted within a session.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::catalog::AmountOption;

/// Carrier name written into a record when detection never resolved one.
pub const UNKNOWN_CARRIER: &str = "Unknown";

/// Unique transaction identifier
///
/// Using ULID provides:
/// - Monotonic, sortable IDs
/// - No coordination needed
/// - 128-bit with good entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(ulid::Ulid);

impl TransactionId {
    /// Generate a new unique TransactionId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the inner ULID value
    pub fn inner(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Settlement status of a recorded purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Completed,
    Pending,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Completed => "completed",
            TxStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The immutable result of a completed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    /// Canonical recipient digit string
    pub recipient: String,
    /// Resolved carrier name, or [`UNKNOWN_CARRIER`]
    pub carrier: String,
    pub amount_usd: u32,
    pub amount_afn: u32,
    pub completed_at: DateTime<Utc>,
    pub status: TxStatus,
}

/// Session history log, most-recent-first.
///
/// No cap on size within a session; records are never deleted.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<TransactionRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a completed record and prepend it to the history.
    ///
    /// Invoked exactly once per successful payment. Cannot fail.
    pub fn record_completed(
        &mut self,
        recipient: &str,
        carrier: Option<&str>,
        amount: AmountOption,
    ) -> TransactionRecord {
        let record = TransactionRecord {
            id: TransactionId::new(),
            recipient: recipient.to_string(),
            carrier: carrier.unwrap_or(UNKNOWN_CARRIER).to_string(),
            amount_usd: amount.usd,
            amount_afn: amount.afn,
            completed_at: Utc::now(),
            status: TxStatus::Completed,
        };
        self.records.insert(0, record.clone());
        record
    }

    /// All records, newest first.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty() -> AmountOption {
        AmountOption {
            usd: 20,
            afn: 1400,
        }
    }

    #[test]
    fn test_record_completed() {
        let mut log = HistoryLog::new();
        let record = log.record_completed("791234567", Some("Roshan"), twenty());

        assert_eq!(record.recipient, "791234567");
        assert_eq!(record.carrier, "Roshan");
        assert_eq!(record.amount_usd, 20);
        assert_eq!(record.amount_afn, 1400);
        assert_eq!(record.status, TxStatus::Completed);
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().id, record.id);
    }

    #[test]
    fn test_unknown_carrier_sentinel() {
        let mut log = HistoryLog::new();
        let record = log.record_completed("991234567", None, twenty());
        assert_eq!(record.carrier, UNKNOWN_CARRIER);
    }

    #[test]
    fn test_most_recent_first() {
        let mut log = HistoryLog::new();
        let first = log.record_completed("791234567", Some("Roshan"), twenty());
        let second = log.record_completed("781234567", Some("Etisalat"), twenty());

        assert_eq!(log.records()[0].id, second.id);
        assert_eq!(log.records()[1].id, first.id);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut log = HistoryLog::new();
        let a = log.record_completed("791234567", Some("Roshan"), twenty());
        let b = log.record_completed("791234567", Some("Roshan"), twenty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_transaction_id_roundtrip() {
        let id = TransactionId::new();
        let parsed: TransactionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TxStatus::Completed.to_string(), "completed");
        assert_eq!(TxStatus::Pending.to_string(), "pending");
    }
}
