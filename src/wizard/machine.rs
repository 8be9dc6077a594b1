//! Wizard Machine
//!
//! Orchestrates step transitions for one checkout session. This is the
//! single owner of the draft transaction and history log: every mutation
//! goes through one entry point per event, serialized behind an internal
//! mutex, and collaborator calls are awaited with the lock released.
//!
//! Each asynchronous operation (composer call, payment call) carries an
//! explicit in-flight flag; a second invocation while one is pending is
//! rejected with `OperationInFlight`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::auth::UserIdentity;
use crate::carrier::{CarrierDirectory, CarrierNetwork};
use crate::catalog::{AmountCatalog, AmountOption};
use crate::config::AppConfig;
use crate::history::{HistoryLog, TransactionRecord, UNKNOWN_CARRIER};
use crate::phone;

use super::adapters::{
    ChargeOutcome, FALLBACK_MESSAGE, HttpComposer, MessageComposer, PaymentProcessor,
    SimulatedProcessor,
};
use super::draft::DraftTransaction;
use super::error::WizardError;
use super::state::WizardStep;

/// Session state guarded by the machine's mutex.
#[derive(Debug)]
struct Session {
    step: WizardStep,
    user: Option<UserIdentity>,
    draft: DraftTransaction,
    history: HistoryLog,
    /// Reason for the most recent decline, shown on the payment step
    last_decline: Option<String>,
}

impl Session {
    fn new() -> Self {
        Self {
            step: WizardStep::Authentication,
            user: None,
            draft: DraftTransaction::default(),
            history: HistoryLog::new(),
            last_decline: None,
        }
    }
}

/// Releases an in-flight flag when the operation completes or errors out.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct WizardMachine {
    directory: CarrierDirectory,
    catalog: AmountCatalog,
    payment: Arc<dyn PaymentProcessor>,
    composer: Arc<dyn MessageComposer>,
    session: Mutex<Session>,
    payment_busy: AtomicBool,
    composer_busy: AtomicBool,
}

impl WizardMachine {
    pub fn new(
        directory: CarrierDirectory,
        catalog: AmountCatalog,
        payment: Arc<dyn PaymentProcessor>,
        composer: Arc<dyn MessageComposer>,
    ) -> Self {
        Self {
            directory,
            catalog,
            payment,
            composer,
            session: Mutex::new(Session::new()),
            payment_busy: AtomicBool::new(false),
            composer_busy: AtomicBool::new(false),
        }
    }

    /// Build a machine wired to the simulated processor and HTTP composer.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let payment = Arc::new(SimulatedProcessor::from_config(&config.payment));
        let composer = Arc::new(HttpComposer::new(config.composer.clone())?);
        Ok(Self::new(
            CarrierDirectory::afghan(),
            AmountCatalog::standard(),
            payment,
            composer,
        ))
    }

    // ========================================================================
    // Authentication gate
    // ========================================================================

    /// Record a successful sign-in and enter the landing step.
    pub fn sign_in(&self, identity: UserIdentity) -> Result<WizardStep, WizardError> {
        let mut session = self.session.lock().unwrap();
        if session.step != WizardStep::Authentication {
            return Err(WizardError::WrongStep {
                expected: WizardStep::Authentication,
                actual: session.step,
            });
        }
        info!(user = %identity.email, "Signed in");
        session.user = Some(identity);
        session.step = WizardStep::Landing;
        Ok(session.step)
    }

    /// Drop the user identity and return to the authentication gate.
    ///
    /// The draft is left intact.
    pub fn sign_out(&self) {
        let mut session = self.session.lock().unwrap();
        if let Some(user) = session.user.take() {
            info!(user = %user.email, "Signed out");
        }
        session.step = WizardStep::Authentication;
    }

    // ========================================================================
    // Input events
    // ========================================================================

    /// Store the recipient number from a raw input event.
    ///
    /// Runs on every keystroke: normalizes the input, then invokes the
    /// detection hook. Detection only upgrades - a miss never clears a
    /// previously detected carrier. Returns the carrier id now on the
    /// draft, if any.
    pub fn input_recipient(&self, raw: &str) -> Result<Option<&'static str>, WizardError> {
        let mut session = self.session.lock().unwrap();
        if session.step != WizardStep::RecipientEntry {
            return Err(WizardError::WrongStep {
                expected: WizardStep::RecipientEntry,
                actual: session.step,
            });
        }

        session.draft.recipient = phone::canonicalize(raw);

        if let Some(carrier) = self.directory.detect(&session.draft.recipient) {
            session.draft.carrier_id = Some(carrier.id);
        }

        debug!(
            digits = session.draft.recipient.len(),
            carrier = ?session.draft.carrier_id,
            "Recipient input"
        );
        Ok(session.draft.carrier_id)
    }

    /// Select a denomination from the catalog.
    pub fn select_amount(&self, usd: u32) -> Result<AmountOption, WizardError> {
        let mut session = self.session.lock().unwrap();
        if session.step != WizardStep::AmountSelection {
            return Err(WizardError::WrongStep {
                expected: WizardStep::AmountSelection,
                actual: session.step,
            });
        }

        let amount = self
            .catalog
            .get(usd)
            .ok_or(WizardError::UnknownDenomination(usd))?;
        session.draft.amount = Some(amount);
        debug!(usd = amount.usd, afn = amount.afn, "Amount selected");
        Ok(amount)
    }

    /// Manually edit the personalization message.
    ///
    /// Allowed at any time; manual edits are never overwritten
    /// automatically (only an explicit [`compose_message`] call replaces
    /// the text).
    ///
    /// [`compose_message`]: WizardMachine::compose_message
    pub fn set_message(&self, text: impl Into<String>) {
        let mut session = self.session.lock().unwrap();
        session.draft.message = Some(text.into());
    }

    // ========================================================================
    // Step transitions
    // ========================================================================

    /// Check whether the forward transition from the current step is open.
    ///
    /// Validation-gate failures are soft blocks: a UI disables the
    /// continue control on `false` rather than surfacing an error.
    pub fn can_advance(&self) -> bool {
        let session = self.session.lock().unwrap();
        match session.step {
            WizardStep::Landing => true,
            WizardStep::RecipientEntry => phone::meets_min_length(&session.draft.recipient),
            WizardStep::AmountSelection => session.draft.amount.is_some(),
            WizardStep::Personalization => true,
            // Authentication needs sign_in, Payment needs pay,
            // Success needs send_another
            _ => false,
        }
    }

    /// Advance to the next step, enforcing the entry precondition.
    pub fn advance(&self) -> Result<WizardStep, WizardError> {
        let mut session = self.session.lock().unwrap();
        match session.step {
            WizardStep::Authentication => return Err(WizardError::NotAuthenticated),
            WizardStep::Landing => {}
            WizardStep::RecipientEntry => {
                let got = session.draft.recipient.len();
                if !phone::meets_min_length(&session.draft.recipient) {
                    return Err(WizardError::RecipientTooShort {
                        got,
                        need: phone::MIN_RECIPIENT_DIGITS,
                    });
                }
            }
            WizardStep::AmountSelection => {
                if session.draft.amount.is_none() {
                    return Err(WizardError::NoAmountSelected);
                }
            }
            WizardStep::Personalization => {
                // Entering payment clears any stale decline indicator
                session.last_decline = None;
            }
            step => return Err(WizardError::ForwardNotAvailable(step)),
        }

        // Guard passed; next() exists for every non-terminal step
        let next = session.step.next().expect("non-terminal step has a successor");
        debug!(from = %session.step, to = %next, "Advance");
        session.step = next;
        Ok(next)
    }

    /// Return to the immediately preceding step without clearing any
    /// already-entered data.
    pub fn back(&self) -> Result<WizardStep, WizardError> {
        let mut session = self.session.lock().unwrap();
        if !(session.step >= WizardStep::RecipientEntry && session.step <= WizardStep::Payment) {
            return Err(WizardError::BackNotAvailable(session.step));
        }
        let prev = session.step.prev().expect("purchase-flow step has a predecessor");
        debug!(from = %session.step, to = %prev, "Back");
        session.step = prev;
        Ok(prev)
    }

    /// Reset the draft after a completed purchase and start a new one.
    ///
    /// History entries already recorded remain unchanged and in place.
    pub fn send_another(&self) -> Result<WizardStep, WizardError> {
        let mut session = self.session.lock().unwrap();
        if session.step != WizardStep::Success {
            return Err(WizardError::WrongStep {
                expected: WizardStep::Success,
                actual: session.step,
            });
        }
        session.draft.reset_for_new_purchase();
        session.last_decline = None;
        session.step = WizardStep::RecipientEntry;
        info!("Starting another top-up");
        Ok(session.step)
    }

    // ========================================================================
    // Asynchronous operations
    // ========================================================================

    /// Fetch a generated personalization message from the composer.
    ///
    /// On success the draft message is overwritten with the generated
    /// text; on failure it is set to the fixed fallback notice and the
    /// error is logged - composer failure never blocks checkout. If the
    /// user navigated away while the call was pending, the result is
    /// discarded.
    pub async fn compose_message(&self) -> Result<(), WizardError> {
        let prompt = {
            let session = self.session.lock().unwrap();
            if session.step != WizardStep::Personalization {
                return Err(WizardError::WrongStep {
                    expected: WizardStep::Personalization,
                    actual: session.step,
                });
            }
            let amount = session.draft.amount.ok_or(WizardError::NoAmountSelected)?;
            let carrier = session
                .draft
                .carrier_id
                .and_then(|id| self.directory.get(id))
                .map(|c| c.name)
                .unwrap_or(UNKNOWN_CARRIER);
            build_prompt(amount, carrier)
        };

        self.composer_busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| WizardError::OperationInFlight("composer"))?;
        let _flight = FlightGuard(&self.composer_busy);

        let result = self.composer.generate(&prompt).await;

        let mut session = self.session.lock().unwrap();
        if session.step != WizardStep::Personalization {
            warn!(step = %session.step, "Discarding composer result after navigation");
            return Ok(());
        }

        match result {
            Ok(text) => {
                debug!(chars = text.len(), "Generated personalization message");
                session.draft.message = Some(text);
            }
            Err(e) => {
                warn!(error = %e, composer = self.composer.name(), "Composer failed, using fallback message");
                session.draft.message = Some(FALLBACK_MESSAGE.to_string());
            }
        }
        Ok(())
    }

    /// Submit the charge and, on approval, record the transaction and
    /// enter the success step.
    ///
    /// A declined charge leaves the machine on the payment step with the
    /// decline reason retrievable via [`last_decline`]; the user may
    /// retry. An approved charge is always recorded, even if the user
    /// navigated away while it was settling - the funds moved.
    ///
    /// [`last_decline`]: WizardMachine::last_decline
    pub async fn pay(&self) -> Result<TransactionRecord, WizardError> {
        let amount = {
            let session = self.session.lock().unwrap();
            if session.step != WizardStep::Payment {
                return Err(WizardError::WrongStep {
                    expected: WizardStep::Payment,
                    actual: session.step,
                });
            }
            session.draft.amount.ok_or(WizardError::NoAmountSelected)?
        };

        self.payment_busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| WizardError::OperationInFlight("payment"))?;
        let _flight = FlightGuard(&self.payment_busy);

        info!(
            amount_usd = amount.usd,
            processor = self.payment.name(),
            "Submitting charge"
        );
        let outcome = self.payment.charge(amount.usd).await;

        let mut session = self.session.lock().unwrap();
        match outcome {
            ChargeOutcome::Approved => {
                session.last_decline = None;
                let carrier_name = session
                    .draft
                    .carrier_id
                    .and_then(|id| self.directory.get(id))
                    .map(|c| c.name);
                let recipient = session.draft.recipient.clone();
                let record = session
                    .history
                    .record_completed(&recipient, carrier_name, amount);

                if session.step == WizardStep::Payment {
                    session.step = WizardStep::Success;
                } else {
                    warn!(step = %session.step, id = %record.id, "Charge settled after navigation");
                }

                info!(
                    id = %record.id,
                    carrier = %record.carrier,
                    amount_usd = record.amount_usd,
                    "Top-up recorded"
                );
                Ok(record)
            }
            ChargeOutcome::Declined(reason) => {
                warn!(reason = %reason, "Charge declined");
                session.last_decline = Some(reason.clone());
                Err(WizardError::PaymentDeclined(reason))
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn step(&self) -> WizardStep {
        self.session.lock().unwrap().step
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.session.lock().unwrap().user.clone()
    }

    /// Snapshot of the in-progress draft.
    pub fn draft(&self) -> DraftTransaction {
        self.session.lock().unwrap().draft.clone()
    }

    /// The carrier currently detected for the draft recipient, if any.
    pub fn detected_carrier(&self) -> Option<&CarrierNetwork> {
        let id = self.session.lock().unwrap().draft.carrier_id?;
        self.directory.get(id)
    }

    /// Snapshot of the session history, newest first.
    pub fn history(&self) -> Vec<TransactionRecord> {
        self.session.lock().unwrap().history.records().to_vec()
    }

    /// The most recent transaction record, if any.
    pub fn latest_record(&self) -> Option<TransactionRecord> {
        self.session.lock().unwrap().history.latest().cloned()
    }

    /// Reason for the most recent declined charge, if any.
    pub fn last_decline(&self) -> Option<String> {
        self.session.lock().unwrap().last_decline.clone()
    }

    pub fn directory(&self) -> &CarrierDirectory {
        &self.directory
    }

    pub fn catalog(&self) -> &AmountCatalog {
        &self.catalog
    }
}

fn build_prompt(amount: AmountOption, carrier: &str) -> String {
    format!(
        "Generate a short, warm, and professional SMS message for a mobile \
         top-up gift of {} AFN on the {} network to a loved one in \
         Afghanistan. Keep it under 160 characters.",
        amount.afn, carrier
    )
}
