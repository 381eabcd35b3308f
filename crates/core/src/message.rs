//! Text-message delivery for one contact.

use tokio::time::sleep;
use tracing::debug;

use crate::driver::{AutomationDriver, Key, Probe};
use crate::error::Result;
use crate::markers;
use crate::timeouts::Timeouts;

/// Outcome of the text phase. `InvalidRecipient` and `Failed` are distinct
/// failure classes and map to different report statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageOutcome {
    Delivered,
    /// The platform flagged the target identifier as unusable. An
    /// a-priori-valid-looking number can still be unreachable.
    InvalidRecipient,
    /// Anything after the recipient check passed: compose box never
    /// appeared, key commit failed.
    Failed(String),
}

/// Composes the per-recipient deep link with a URL-escaped message body.
pub fn compose_deep_link(dial: &str, text: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("phone", dial)
        .append_pair("text", text)
        .finish();
    format!("{}?{query}", markers::DEEP_LINK_BASE)
}

pub struct MessageSender<'a> {
    driver: &'a dyn AutomationDriver,
    timeouts: &'a Timeouts,
}

impl<'a> MessageSender<'a> {
    pub fn new(driver: &'a dyn AutomationDriver, timeouts: &'a Timeouts) -> Self {
        Self { driver, timeouts }
    }

    /// Delivers the text portion. Success is inferred from the compose box
    /// accepting the Enter commit before timeout; the platform exposes no
    /// delivery receipt to the automation layer.
    pub async fn send(&self, dial: &str, text: &str) -> Result<MessageOutcome> {
        let url = compose_deep_link(dial, text);
        self.driver.navigate(&url).await?;

        // Load is asynchronous with no completion event exposed.
        sleep(self.timeouts.url_settle).await;

        if self.recipient_flagged_invalid().await? {
            return Ok(MessageOutcome::InvalidRecipient);
        }

        let compose = markers::compose_box();
        match self.driver.wait_for(&compose, self.timeouts.compose_wait).await? {
            Probe::Present => {}
            Probe::Absent => {
                return Ok(MessageOutcome::Failed(format!(
                    "compose box not reachable within {}ms",
                    self.timeouts.compose_wait.as_millis()
                )));
            }
        }

        self.driver.send_key(&compose, Key::Enter).await?;
        debug!(target = "herald.message", %dial, "message committed");

        // Let the UI return to a stable state before the attachment flow.
        sleep(self.timeouts.post_send_settle).await;
        Ok(MessageOutcome::Delivered)
    }

    /// Bounded race between "an invalid-recipient notice renders" and
    /// "nothing renders in time". Each marker variant gets an even slice of
    /// the probe budget; confirming absence therefore costs the full budget
    /// exactly when the recipient is valid. Heuristic: a slow render can
    /// misclassify a valid recipient, which is why the budget is
    /// configurable rather than fixed.
    async fn recipient_flagged_invalid(&self) -> Result<bool> {
        let variants = markers::invalid_recipient();
        let slice = self.timeouts.recipient_probe / variants.len().max(1) as u32;

        for marker in &variants {
            if self.driver.wait_for(marker, slice).await?.is_present() {
                debug!(target = "herald.message", %marker, "invalid-recipient marker present");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_carries_phone_and_escaped_text() {
        let url = compose_deep_link("5511999990000", "Olá, tudo bem?");
        assert!(url.starts_with("https://web.whatsapp.com/send?"));
        assert!(url.contains("phone=5511999990000"));
        assert!(url.contains("text=Ol%C3%A1%2C+tudo+bem%3F"));
    }

    #[test]
    fn deep_link_with_plain_text() {
        assert_eq!(
            compose_deep_link("5511999990000", "Hi"),
            "https://web.whatsapp.com/send?phone=5511999990000&text=Hi"
        );
    }
}
