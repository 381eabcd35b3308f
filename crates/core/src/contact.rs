use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal delivery status for one contact in one dispatch pass.
///
/// Exactly one value is recorded per contact per run. `Pending` only exists
/// before the pass reaches the row; after a completed pass every contact is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    InvalidPhone,
    Sent,
    FailedMessage,
    FailedAttachment,
}

impl Status {
    /// String written to the STATUS column of the report.
    pub fn as_report_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::Sent => "SENT",
            Self::FailedMessage => "FAILED_MESSAGE",
            Self::FailedAttachment => "FAILED_ATTACHMENT",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_report_str())
    }
}

/// One row of the contact table. Identity is row position; rows are never
/// deduplicated or deleted, only re-serialized with a status attached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Phone exactly as loaded; normalization happens at dispatch time.
    pub phone: String,
    pub message: String,
    pub status: Status,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
            status: Status::Pending,
        }
    }
}
