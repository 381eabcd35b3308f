//! Production [`AutomationDriver`] backed by the Chrome DevTools Protocol.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use herald::{AutomationDriver, HeraldError, Key, Locator, Probe};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, Default)]
pub struct CdpDriverConfig {
    /// Headless only makes sense with an already-paired profile; the
    /// pairing code must otherwise be visible to scan.
    pub headless: bool,
    pub browser_path: Option<PathBuf>,
    /// Persisting this directory keeps the authenticated session across
    /// runs.
    pub user_data_dir: Option<PathBuf>,
}

/// One browser process, one page, serialized access. `shutdown` closes the
/// browser and is idempotent; the engine calls it exactly once.
pub struct CdpDriver {
    browser: Mutex<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
    page: Page,
}

fn driver_err(err: impl std::fmt::Display) -> HeraldError {
    HeraldError::Driver(err.to_string())
}

impl CdpDriver {
    pub async fn launch(config: CdpDriverConfig) -> herald::Result<Self> {
        let mut builder = BrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = config.browser_path {
            builder = builder.chrome_executable(path);
        }
        if let Some(dir) = config.user_data_dir {
            builder = builder.user_data_dir(dir);
        }
        let browser_config = builder.build().map_err(HeraldError::Driver)?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(driver_err)?;
        debug!(target = "herald.driver", "browser launched");

        // The CDP connection makes no progress unless the handler stream is
        // polled; it runs until shutdown aborts it or the connection drops.
        let handle = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(driver_err)?;

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler: Mutex::new(Some(handle)),
            page,
        })
    }

    async fn find(&self, locator: &Locator) -> Result<Element, chromiumoxide::error::CdpError> {
        match locator {
            Locator::Css(selector) => self.page.find_element(selector.as_str()).await,
            Locator::Text(fragment) => {
                let xpath = format!("//*[contains(text(), {})]", xpath_string(fragment));
                self.page.find_xpath(xpath).await
            }
        }
    }

    async fn poll_present(&self, locator: &Locator, timeout: Duration) -> herald::Result<Probe> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.find(locator).await {
                Ok(_) => return Ok(Probe::Present),
                // The CDP query reports no-match as an error; within the
                // budget that only means not-yet-present. Hard faults
                // surface on navigate/click/send_key, which do fail the
                // operation.
                Err(err) => {
                    trace!(target = "herald.driver", %locator, error = %err, "not present yet");
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(Probe::Absent);
            }
            sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

#[async_trait]
impl AutomationDriver for CdpDriver {
    async fn navigate(&self, url: &str) -> herald::Result<()> {
        self.page.goto(url).await.map_err(driver_err)?;
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> herald::Result<Probe> {
        self.poll_present(locator, timeout).await
    }

    /// CDP exposes no clickability primitive; presence is the usable proxy
    /// since the client renders its affordances enabled.
    async fn wait_for_clickable(&self, locator: &Locator, timeout: Duration) -> herald::Result<Probe> {
        self.poll_present(locator, timeout).await
    }

    async fn click(&self, locator: &Locator) -> herald::Result<()> {
        let element = self.find(locator).await.map_err(driver_err)?;
        element.click().await.map_err(driver_err)?;
        Ok(())
    }

    async fn send_key(&self, locator: &Locator, key: Key) -> herald::Result<()> {
        let element = self.find(locator).await.map_err(driver_err)?;
        element.click().await.map_err(driver_err)?;
        element.press_key(key.name()).await.map_err(driver_err)?;
        Ok(())
    }

    async fn shutdown(&self) -> herald::Result<()> {
        let mut guard = self.browser.lock().await;
        let Some(mut browser) = guard.take() else {
            return Ok(());
        };

        // The handler must keep polling while the close command is in
        // flight; abort it only afterwards.
        let closed = browser.close().await;
        let _ = browser.wait().await;
        if let Some(handle) = self.handler.lock().await.take() {
            handle.abort();
        }

        debug!(target = "herald.driver", "browser released");
        closed.map_err(driver_err)?;
        Ok(())
    }
}

/// Quotes a fragment for embedding in an XPath expression. XPath 1.0 has no
/// escaping inside string literals, so mixed quotes need `concat`.
fn xpath_string(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{text}'")
    } else if !text.contains('"') {
        format!("\"{text}\"")
    } else {
        let parts: Vec<String> = text.split('\'').map(|part| format!("'{part}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpath_string_prefers_single_quotes() {
        assert_eq!(xpath_string("not on the platform"), "'not on the platform'");
    }

    #[test]
    fn xpath_string_switches_for_apostrophes() {
        assert_eq!(xpath_string("isn't on WhatsApp"), "\"isn't on WhatsApp\"");
    }

    #[test]
    fn xpath_string_concats_mixed_quotes() {
        assert_eq!(
            xpath_string("isn't \"here\""),
            "concat('isn', \"'\", 't \"here\"')"
        );
    }
}
