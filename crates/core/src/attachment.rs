//! Attachment delivery for one contact.
//!
//! Precondition for the whole module: the recipient's compose context is
//! open, i.e. the message phase just returned `Delivered` on this session.

use std::path::Path;

use tokio::time::sleep;
use tracing::debug;

use crate::driver::{AutomationDriver, InputInjector, Key, Locator, Probe};
use crate::error::Result;
use crate::markers;
use crate::timeouts::Timeouts;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentOutcome {
    Delivered,
    Failed(String),
}

pub struct FileSender<'a> {
    driver: &'a dyn AutomationDriver,
    injector: &'a dyn InputInjector,
    timeouts: &'a Timeouts,
}

impl<'a> FileSender<'a> {
    pub fn new(
        driver: &'a dyn AutomationDriver,
        injector: &'a dyn InputInjector,
        timeouts: &'a Timeouts,
    ) -> Self {
        Self {
            driver,
            injector,
            timeouts,
        }
    }

    pub async fn send(&self, path: &Path) -> Result<AttachmentOutcome> {
        if let Some(failed) = self.click_when_clickable(&markers::attach_menu(), "attach menu").await? {
            return Ok(failed);
        }
        if let Some(failed) = self
            .click_when_clickable(&markers::attach_document(), "document entry")
            .await?
        {
            return Ok(failed);
        }

        self.native_dialog_handoff(path).await?;

        // Preview render and upload have no completion signal; the send
        // affordance is meaningless until both finish.
        sleep(self.timeouts.attachment_settle).await;

        if let Some(failed) = self.click_when_clickable(&markers::send_button(), "send button").await? {
            return Ok(failed);
        }

        match self.refocus_compose().await? {
            AttachmentOutcome::Delivered => {
                debug!(target = "herald.attachment", path = %path.display(), "attachment sent");
                Ok(AttachmentOutcome::Delivered)
            }
            failed => Ok(failed),
        }
    }

    async fn click_when_clickable(
        &self,
        locator: &Locator,
        what: &str,
    ) -> Result<Option<AttachmentOutcome>> {
        match self
            .driver
            .wait_for_clickable(locator, self.timeouts.clickable_wait)
            .await?
        {
            Probe::Present => {
                self.driver.click(locator).await?;
                Ok(None)
            }
            Probe::Absent => Ok(Some(AttachmentOutcome::Failed(format!(
                "{what} not clickable within {}ms",
                self.timeouts.clickable_wait.as_millis()
            )))),
        }
    }

    /// Cross-boundary handoff: the file dialog is a native window the DOM
    /// driver cannot see or address, so control passes to the OS injector.
    /// Settle for focus, type the literal path, confirm twice (the dialog
    /// may require path entry and open as separate confirmations). No
    /// completion signal exists; this is the least reliable link in the
    /// chain, kept in one method so its failure is attributable.
    async fn native_dialog_handoff(&self, path: &Path) -> Result<()> {
        sleep(self.timeouts.dialog_settle).await;
        self.injector.type_text(&path.to_string_lossy()).await?;

        sleep(self.timeouts.dialog_confirm_gap).await;
        self.injector.press_key(Key::Enter).await?;

        sleep(self.timeouts.dialog_confirm_gap).await;
        self.injector.press_key(Key::Enter).await?;
        Ok(())
    }

    /// Leaves the session in a known state before the next contact. The
    /// compose box not reappearing after a send means the session is in an
    /// unknown state, so this step fails the attachment like any other.
    async fn refocus_compose(&self) -> Result<AttachmentOutcome> {
        let compose = markers::compose_box();
        match self
            .driver
            .wait_for(&compose, self.timeouts.compose_wait)
            .await?
        {
            Probe::Present => {
                self.driver.click(&compose).await?;
                sleep(self.timeouts.refocus_settle).await;
                Ok(AttachmentOutcome::Delivered)
            }
            Probe::Absent => Ok(AttachmentOutcome::Failed(format!(
                "compose box did not return within {}ms after send",
                self.timeouts.compose_wait.as_millis()
            ))),
        }
    }
}
