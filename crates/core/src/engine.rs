//! The dispatch engine: one pass, one session, one terminal status per
//! contact.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::attachment::{AttachmentOutcome, FileSender};
use crate::contact::{Contact, Status};
use crate::driver::{AutomationDriver, InputInjector};
use crate::error::Result;
use crate::message::{MessageOutcome, MessageSender};
use crate::phone::{self, PhoneCheck};
use crate::session::Session;
use crate::timeouts::Timeouts;

/// Structured event sink for per-contact outcomes.
///
/// The engine reports through this instead of owning any log or progress
/// output, so callers decide presentation and tests observe decisions
/// deterministically. All hooks default to no-ops.
pub trait DispatchObserver: Send + Sync {
    /// A contact reached its terminal status.
    fn contact_decided(&self, _index: usize, _contact: &Contact) {}

    /// The platform rejected a recipient that passed local validation.
    /// Reported separately because the final report collapses this into
    /// `INVALID_PHONE`.
    fn recipient_unreachable(&self, _index: usize, _contact: &Contact) {}
}

/// Sink that drops every event.
pub struct NullObserver;

impl DispatchObserver for NullObserver {}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Country-code prefix applied to every normalized phone.
    pub country_code: String,
    /// The one file attached for every contact in the run.
    pub attachment: PathBuf,
    pub timeouts: Timeouts,
}

/// Per-status counters for one dispatch pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub sent: usize,
    pub invalid_phone: usize,
    pub failed_message: usize,
    pub failed_attachment: usize,
}

impl DispatchSummary {
    fn record(&mut self, status: Status) {
        match status {
            Status::Sent => self.sent += 1,
            Status::InvalidPhone => self.invalid_phone += 1,
            Status::FailedMessage => self.failed_message += 1,
            Status::FailedAttachment => self.failed_attachment += 1,
            Status::Pending => {}
        }
    }
}

pub struct DispatchEngine {
    driver: Arc<dyn AutomationDriver>,
    injector: Arc<dyn InputInjector>,
    config: EngineConfig,
    observer: Arc<dyn DispatchObserver>,
}

impl DispatchEngine {
    pub fn new(
        driver: Arc<dyn AutomationDriver>,
        injector: Arc<dyn InputInjector>,
        config: EngineConfig,
    ) -> Self {
        Self {
            driver,
            injector,
            config,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// One dispatch pass over `contacts`.
    ///
    /// Opens the session, drives every contact to a terminal status, closes
    /// the session. Per-contact failures never escape the loop, so the
    /// session is released exactly once on every path: here on completion,
    /// or inside [`Session::open`] when bootstrap times out.
    pub async fn run(&self, contacts: &mut [Contact]) -> Result<DispatchSummary> {
        let session = Session::open(Arc::clone(&self.driver), &self.config.timeouts).await?;

        let summary = self.dispatch_all(&session, contacts).await;

        if let Err(err) = session.close().await {
            // Teardown failure must not discard the pass results.
            warn!(target = "herald.engine", error = %err, "session teardown failed");
        }
        Ok(summary)
    }

    async fn dispatch_all(&self, session: &Session, contacts: &mut [Contact]) -> DispatchSummary {
        let mut summary = DispatchSummary {
            total: contacts.len(),
            ..Default::default()
        };

        for (index, contact) in contacts.iter_mut().enumerate() {
            let status = self.dispatch_contact(session, index, contact).await;
            contact.status = status;
            summary.record(status);
            self.observer.contact_decided(index, contact);
        }
        summary
    }

    /// Per-contact state machine. Always returns a terminal status; every
    /// error below the session level is converted here and the pass moves
    /// on. Each contact starts from a fresh deep link, so a failure leaves
    /// nothing behind for the next one.
    async fn dispatch_contact(&self, session: &Session, index: usize, contact: &Contact) -> Status {
        let phone = match phone::validate(&contact.phone) {
            PhoneCheck::Valid(phone) => phone,
            PhoneCheck::Invalid(reason) => {
                warn!(
                    target = "herald.engine",
                    index,
                    name = %contact.name,
                    phone = %contact.phone,
                    %reason,
                    "invalid phone format"
                );
                return Status::InvalidPhone;
            }
        };
        let dial = phone.dial_string(&self.config.country_code);

        let messages = MessageSender::new(session.driver(), &self.config.timeouts);
        match messages.send(&dial, &contact.message).await {
            Ok(MessageOutcome::Delivered) => {}
            Ok(MessageOutcome::InvalidRecipient) => {
                warn!(
                    target = "herald.engine",
                    index,
                    name = %contact.name,
                    %dial,
                    "recipient not reachable on the platform"
                );
                self.observer.recipient_unreachable(index, contact);
                return Status::InvalidPhone;
            }
            Ok(MessageOutcome::Failed(reason)) => {
                warn!(target = "herald.engine", index, name = %contact.name, %reason, "message send failed");
                return Status::FailedMessage;
            }
            Err(err) => {
                warn!(target = "herald.engine", index, name = %contact.name, error = %err, "message send failed");
                return Status::FailedMessage;
            }
        }

        let files = FileSender::new(session.driver(), self.injector.as_ref(), &self.config.timeouts);
        match files.send(&self.config.attachment).await {
            Ok(AttachmentOutcome::Delivered) => {
                info!(target = "herald.engine", index, name = %contact.name, "message and attachment sent");
                Status::Sent
            }
            Ok(AttachmentOutcome::Failed(reason)) => {
                warn!(target = "herald.engine", index, name = %contact.name, %reason, "attachment send failed");
                Status::FailedAttachment
            }
            Err(err) => {
                warn!(target = "herald.engine", index, name = %contact.name, error = %err, "attachment send failed");
                Status::FailedAttachment
            }
        }
    }
}
