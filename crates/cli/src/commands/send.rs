use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use herald::{Contact, DispatchEngine, DispatchObserver, EngineConfig, Timeouts};
use tracing::info;

use crate::driver::{CdpDriver, CdpDriverConfig};
use crate::injector::EnigoInjector;
use crate::table;

pub struct SendOptions {
    pub input: PathBuf,
    pub attach: PathBuf,
    pub country_code: String,
    pub output: Option<PathBuf>,
    pub browser_path: Option<PathBuf>,
    pub user_data_dir: Option<PathBuf>,
    pub headless: bool,
    pub timeouts: Timeouts,
}

/// Per-contact progress on stdout as outcomes are decided.
struct ProgressObserver;

impl DispatchObserver for ProgressObserver {
    fn contact_decided(&self, index: usize, contact: &Contact) {
        println!("[{}] {} -> {}", index + 1, contact.name, contact.status);
    }
}

pub async fn execute(options: SendOptions) -> Result<()> {
    let table = table::ContactTable::load(&options.input)
        .with_context(|| format!("loading contact table {}", options.input.display()))?;
    ensure!(
        options.attach.is_file(),
        "attachment not found: {}",
        options.attach.display()
    );
    if table.is_empty() {
        println!("No contacts in {}", options.input.display());
        return Ok(());
    }
    let mut contacts = table.contacts();

    info!(target = "herald", contacts = contacts.len(), "starting dispatch pass");

    let driver = CdpDriver::launch(CdpDriverConfig {
        headless: options.headless,
        browser_path: options.browser_path,
        user_data_dir: options.user_data_dir,
    })
    .await?;

    let engine = DispatchEngine::new(
        Arc::new(driver),
        Arc::new(EnigoInjector::new()),
        EngineConfig {
            country_code: options.country_code,
            attachment: options.attach,
            timeouts: options.timeouts,
        },
    )
    .with_observer(Arc::new(ProgressObserver));

    // Fatal engine errors (session bootstrap) arrive here with the browser
    // already released; per-contact failures are statuses, not errors.
    let summary = engine.run(&mut contacts).await?;

    let report = options
        .output
        .unwrap_or_else(|| table::report_path(&options.input));
    table
        .write_report(&report, &contacts)
        .with_context(|| format!("writing report {}", report.display()))?;

    println!(
        "Dispatch finished: {} sent, {} invalid phone, {} failed (message), {} failed (attachment)",
        summary.sent, summary.invalid_phone, summary.failed_message, summary.failed_attachment
    );
    println!("Report written to {}", report.display());
    Ok(())
}
