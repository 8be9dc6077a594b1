//! Top-up Engine - Airtime Checkout Core
//!
//! The transaction core of a guided, multi-step checkout wizard for
//! international mobile airtime top-ups. Presentation (styling, translation
//! tables, auth UI, modals) lives outside this crate; payment, message
//! generation, and authentication are collaborator seams.
//!
//! # Modules
//!
//! - [`phone`] - input normalization and the recipient-entry gate
//! - [`carrier`] - dialing-prefix to carrier-network directory
//! - [`catalog`] - fixed purchasable denominations (USD/AFN pairs)
//! - [`wizard`] - the checkout state machine and collaborator adapters
//! - [`history`] - immutable transaction records, newest first
//! - [`auth`] - authentication collaborator seam
//! - [`config`] - yaml application configuration
//! - [`logging`] - tracing setup with rolling file output

pub mod auth;
pub mod carrier;
pub mod catalog;
pub mod config;
pub mod history;
pub mod logging;
pub mod phone;
pub mod wizard;

// Convenient re-exports at crate root
pub use auth::{AuthProvider, StaticAuthProvider, UserIdentity};
pub use carrier::{CarrierDirectory, CarrierNetwork};
pub use catalog::{AmountCatalog, AmountOption};
pub use config::AppConfig;
pub use history::{HistoryLog, TransactionId, TransactionRecord, TxStatus, UNKNOWN_CARRIER};
pub use wizard::adapters::{
    ChargeOutcome, ComposerError, FALLBACK_MESSAGE, HttpComposer, MessageComposer,
    PaymentProcessor, SimulatedProcessor,
};
pub use wizard::{DraftTransaction, WizardError, WizardMachine, WizardStep};
