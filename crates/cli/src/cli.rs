use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use herald::Timeouts;

#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Bulk message + attachment dispatch through a web messaging client")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one dispatch pass over a contact table
    Send {
        /// Contact table (CSV with NAME, PHONE, MESSAGE columns)
        input: PathBuf,

        /// File attached for every contact
        #[arg(short, long, value_name = "FILE")]
        attach: PathBuf,

        /// Country-code prefix applied to every normalized phone
        #[arg(long, default_value = "55")]
        country_code: String,

        /// Report destination (defaults to <input stem>_result.csv next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Browser executable (defaults to system discovery)
        #[arg(long, value_name = "PATH")]
        browser_path: Option<PathBuf>,

        /// Browser profile directory; reuse one to keep the session paired
        /// between runs
        #[arg(long, value_name = "DIR")]
        user_data_dir: Option<PathBuf>,

        /// Run the browser headless (the pairing code will not be scannable;
        /// only useful with an already-paired profile)
        #[arg(long)]
        headless: bool,

        #[command(flatten)]
        waits: WaitArgs,
    },

    /// Check the contact table without opening a browser
    Validate {
        /// Contact table (CSV with NAME, PHONE, MESSAGE columns)
        input: PathBuf,
    },
}

/// Tunable wait and settle budgets, one flag per wait point. Defaults match
/// [`Timeouts::default`].
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Pairing-code scan budget (seconds)
    #[arg(long, default_value = "120", value_name = "SECS")]
    pub session_timeout: u64,

    /// Deep-link load settle (milliseconds)
    #[arg(long, default_value = "5000", value_name = "MS")]
    pub url_settle_ms: u64,

    /// Invalid-recipient probe budget (milliseconds)
    #[arg(long, default_value = "5000", value_name = "MS")]
    pub recipient_probe_ms: u64,

    /// Compose-box wait (milliseconds)
    #[arg(long, default_value = "15000", value_name = "MS")]
    pub compose_wait_ms: u64,

    /// Attach-flow clickability wait (milliseconds)
    #[arg(long, default_value = "20000", value_name = "MS")]
    pub clickable_wait_ms: u64,

    /// Native file-dialog focus settle (milliseconds)
    #[arg(long, default_value = "2000", value_name = "MS")]
    pub dialog_settle_ms: u64,

    /// Gap between file-dialog confirmations (milliseconds)
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub dialog_confirm_gap_ms: u64,

    /// Attachment preview/upload settle (milliseconds)
    #[arg(long, default_value = "15000", value_name = "MS")]
    pub attachment_settle_ms: u64,

    /// Post-send settle (milliseconds)
    #[arg(long, default_value = "10000", value_name = "MS")]
    pub post_send_settle_ms: u64,

    /// Compose refocus settle (milliseconds)
    #[arg(long, default_value = "2000", value_name = "MS")]
    pub refocus_settle_ms: u64,
}

impl WaitArgs {
    pub fn to_timeouts(&self) -> Timeouts {
        Timeouts {
            session_ready: Duration::from_secs(self.session_timeout),
            url_settle: Duration::from_millis(self.url_settle_ms),
            recipient_probe: Duration::from_millis(self.recipient_probe_ms),
            compose_wait: Duration::from_millis(self.compose_wait_ms),
            clickable_wait: Duration::from_millis(self.clickable_wait_ms),
            dialog_settle: Duration::from_millis(self.dialog_settle_ms),
            dialog_confirm_gap: Duration::from_millis(self.dialog_confirm_gap_ms),
            attachment_settle: Duration::from_millis(self.attachment_settle_ms),
            post_send_settle: Duration::from_millis(self.post_send_settle_ms),
            refocus_settle: Duration::from_millis(self.refocus_settle_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_send_command() {
        let args = vec!["herald", "send", "contacts.csv", "--attach", "/tmp/brief.pdf"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Send { input, attach, country_code, output, headless, .. } => {
                assert_eq!(input, PathBuf::from("contacts.csv"));
                assert_eq!(attach, PathBuf::from("/tmp/brief.pdf"));
                assert_eq!(country_code, "55");
                assert!(output.is_none());
                assert!(!headless);
            }
            _ => panic!("Expected Send command"),
        }
    }

    #[test]
    fn send_requires_attachment() {
        let args = vec!["herald", "send", "contacts.csv"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn wait_flags_override_timeouts() {
        let args = vec![
            "herald",
            "send",
            "contacts.csv",
            "-a",
            "/tmp/brief.pdf",
            "--session-timeout",
            "30",
            "--recipient-probe-ms",
            "800",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        let Commands::Send { waits, .. } = cli.command else {
            panic!("Expected Send command");
        };
        let timeouts = waits.to_timeouts();
        assert_eq!(timeouts.session_ready, Duration::from_secs(30));
        assert_eq!(timeouts.recipient_probe, Duration::from_millis(800));
        // Flags not passed keep the engine defaults.
        assert_eq!(timeouts.clickable_wait, Timeouts::default().clickable_wait);
    }

    #[test]
    fn parse_validate_command() {
        let args = vec!["herald", "-v", "validate", "contacts.csv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);

        match cli.command {
            Commands::Validate { input } => assert_eq!(input, PathBuf::from("contacts.csv")),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn invalid_command_fails() {
        let args = vec!["herald", "broadcast", "contacts.csv"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
