//! Checkout Wizard State Machine
//!
//! Drives one guided top-up purchase from sign-in to receipt.
//!
//! # Steps
//!
//! ```text
//! AUTHENTICATION → LANDING → RECIPIENT_ENTRY → AMOUNT_SELECTION
//!                                 ↑                   |
//!                                 |                   v
//!                          (send another)      PERSONALIZATION
//!                                 |                   |
//!                                 |                   v
//!                              SUCCESS  ←――――――――  PAYMENT
//! ```
//!
//! Back-transitions go to the immediately preceding step only and never
//! clear entered data. Transition guards:
//!
//! 1. **Recipient gate**: ≥ 9 digits to leave recipient entry
//! 2. **Amount gate**: a denomination must be selected
//! 3. **Payment**: only the asynchronous charge resolution enters SUCCESS
//!
//! The machine is the single owner of the draft transaction and the
//! session history; collaborators (payment processor, message composer)
//! sit behind async trait seams in [`adapters`].

pub mod adapters;
pub mod draft;
pub mod error;
pub mod machine;
pub mod state;


// Re-exports for convenience
pub use adapters::{ChargeOutcome, MessageComposer, PaymentProcessor};
pub use draft::DraftTransaction;
pub use error::WizardError;
pub use machine::WizardMachine;
pub use state::WizardStep;
