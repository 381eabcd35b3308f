//! Session bootstrap: open the web client and block until authenticated.

use std::sync::Arc;

use tracing::info;

use crate::driver::AutomationDriver;
use crate::error::{HeraldError, Result};
use crate::markers;
use crate::timeouts::Timeouts;

/// Live authenticated automation context, bound to one browser process for
/// the duration of a run.
///
/// `open` is the only constructor and `close` consumes the handle, so a run
/// cannot release the session twice. When bootstrap fails, timeout or
/// driver fault alike, the driver is shut down here before the error is
/// returned; the caller never holds a half-open browser.
pub struct Session {
    driver: Arc<dyn AutomationDriver>,
}

impl Session {
    /// Navigates to the client entry point and waits for the
    /// authenticated-session marker (rendered only after the pairing-code
    /// handshake completes).
    pub async fn open(driver: Arc<dyn AutomationDriver>, timeouts: &Timeouts) -> Result<Self> {
        if let Err(err) = Self::bootstrap(driver.as_ref(), timeouts).await {
            let _ = driver.shutdown().await;
            return Err(err);
        }
        Ok(Self { driver })
    }

    async fn bootstrap(driver: &dyn AutomationDriver, timeouts: &Timeouts) -> Result<()> {
        driver.navigate(markers::ENTRY_URL).await?;
        info!(target = "herald.session", "waiting for pairing; scan the code in the browser window");

        let ready = driver
            .wait_for(&markers::session_ready(), timeouts.session_ready)
            .await?;

        if !ready.is_present() {
            // Non-retriable: pairing needs a human.
            return Err(HeraldError::SessionTimeout {
                ms: timeouts.session_ready.as_millis() as u64,
            });
        }

        info!(target = "herald.session", "session authenticated");
        Ok(())
    }

    pub fn driver(&self) -> &dyn AutomationDriver {
        self.driver.as_ref()
    }

    /// Releases the browser process.
    pub async fn close(self) -> Result<()> {
        self.driver.shutdown().await
    }
}
