//! Contact-table load and report write.
//!
//! Input is CSV with required columns NAME, PHONE, MESSAGE, matched
//! case/whitespace-insensitively. Extra columns are carried through to the
//! report untouched, in the input's own header order. The report is the
//! input frame plus a STATUS column, replaced in place when the input
//! already has one, appended otherwise. A STATUS column in the input is
//! ignored on load: re-feeding a report re-attempts every row, which is
//! documented engine behavior, not a bug.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use herald::Contact;
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 3] = ["NAME", "PHONE", "MESSAGE"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("contact table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug)]
struct ColumnIndex {
    name: usize,
    phone: usize,
    message: usize,
    /// Pre-existing STATUS column, overwritten in the report.
    status: Option<usize>,
}

fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndex, TableError> {
    let canonical: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();
    let position = |wanted: &str| canonical.iter().position(|h| h == wanted);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| position(column).is_none())
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::MissingColumns(missing));
    }

    Ok(ColumnIndex {
        name: position("NAME").unwrap(),
        phone: position("PHONE").unwrap(),
        message: position("MESSAGE").unwrap(),
        status: position("STATUS"),
    })
}

/// The loaded contact table: the engine-facing contacts plus the full
/// original frame, kept so the report can reproduce every input column.
#[derive(Debug)]
pub struct ContactTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    columns: ColumnIndex,
}

impl ContactTable {
    /// Loads the table. Column presence is validated before any contact is
    /// constructed; a malformed table is a load-time fatal error.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let read_err = |source| TableError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(read_err)?;

        let headers = reader.headers().map_err(read_err)?.clone();
        let columns = resolve_columns(&headers)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.map_err(read_err)?);
        }
        Ok(Self {
            headers,
            rows,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One fresh `Contact` per row, in row order, all Pending.
    pub fn contacts(&self) -> Vec<Contact> {
        let field = |row: &StringRecord, index: usize| row.get(index).unwrap_or("").to_string();
        self.rows
            .iter()
            .map(|row| {
                Contact::new(
                    field(row, self.columns.name),
                    field(row, self.columns.phone),
                    field(row, self.columns.message),
                )
            })
            .collect()
    }

    /// Writes the report: the input frame row for row, with STATUS filled
    /// in. `contacts` must be the (now decided) result of [`contacts`]; rows
    /// are matched by position.
    ///
    /// [`contacts`]: ContactTable::contacts
    pub fn write_report(&self, path: &Path, contacts: &[Contact]) -> Result<(), TableError> {
        let write_err = |source| TableError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut header: Vec<String> = self.headers.iter().map(str::to_string).collect();
        match self.columns.status {
            Some(index) => header[index] = "STATUS".to_string(),
            None => header.push("STATUS".to_string()),
        }

        let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
        writer.write_record(&header).map_err(write_err)?;

        for (row, contact) in self.rows.iter().zip(contacts) {
            // Short rows are padded to the header width so the STATUS slot
            // always exists.
            let mut fields: Vec<String> = (0..self.headers.len())
                .map(|index| row.get(index).unwrap_or("").to_string())
                .collect();
            match self.columns.status {
                Some(index) => fields[index] = contact.status.as_report_str().to_string(),
                None => fields.push(contact.status.as_report_str().to_string()),
            }
            writer.write_record(&fields).map_err(write_err)?;
        }
        writer.flush().map_err(|e| write_err(csv::Error::from(e)))?;
        Ok(())
    }
}

/// Sibling location derived from the input path, suffixed to mark it as a
/// result: `contacts.csv` -> `contacts_result.csv`.
pub fn report_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_result.{}", ext.to_string_lossy()),
        None => format!("{stem}_result.csv"),
    };
    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald::Status;
    use std::io::Write as _;

    fn table_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_contacts_with_exact_headers() {
        let file = table_file("NAME,PHONE,MESSAGE\nAna,11999990000,Hi\nBob,123,Hello\n");
        let table = ContactTable::load(file.path()).unwrap();
        let contacts = table.contacts();

        assert_eq!(table.len(), 2);
        assert_eq!(contacts[0].name, "Ana");
        assert_eq!(contacts[0].phone, "11999990000");
        assert_eq!(contacts[0].message, "Hi");
        assert_eq!(contacts[0].status, Status::Pending);
    }

    #[test]
    fn header_match_is_case_and_whitespace_insensitive() {
        let file = table_file(" name , Phone ,MESSAGE\nAna,11999990000,Hi\n");
        let contacts = ContactTable::load(file.path()).unwrap().contacts();
        assert_eq!(contacts[0].name, "Ana");
    }

    #[test]
    fn missing_columns_are_all_named() {
        let file = table_file("NAME,NUMBER\nAna,11999990000\n");
        let err = ContactTable::load(file.path()).unwrap_err();

        match err {
            TableError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["PHONE".to_string(), "MESSAGE".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other}"),
        }
    }

    #[test]
    fn status_column_in_input_is_ignored() {
        let file = table_file("NAME,PHONE,MESSAGE,STATUS\nAna,11999990000,Hi,SENT\n");
        let contacts = ContactTable::load(file.path()).unwrap().contacts();
        // Rows from an earlier report come back as Pending and are
        // re-attempted.
        assert_eq!(contacts[0].status, Status::Pending);
    }

    #[test]
    fn report_path_suffixes_the_stem() {
        assert_eq!(
            report_path(Path::new("/data/contacts.csv")),
            PathBuf::from("/data/contacts_result.csv")
        );
        assert_eq!(report_path(Path::new("contacts")), PathBuf::from("contacts_result.csv"));
    }

    #[test]
    fn report_carries_statuses_and_original_fields() {
        let file = table_file("NAME,PHONE,MESSAGE\nAna,11999990000,Hi\nBob,123,Hi\n");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = ContactTable::load(file.path()).unwrap();
        let mut contacts = table.contacts();
        contacts[0].status = Status::Sent;
        contacts[1].status = Status::InvalidPhone;

        table.write_report(&path, &contacts).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("NAME,PHONE,MESSAGE,STATUS"));
        assert_eq!(lines.next(), Some("Ana,11999990000,Hi,SENT"));
        assert_eq!(lines.next(), Some("Bob,123,Hi,INVALID_PHONE"));
    }

    #[test]
    fn extra_columns_survive_the_round_trip() {
        let file = table_file(
            "dept,NAME,PHONE,MESSAGE\nsales,Ana,11999990000,Hi\nops,Bob,11988887777,Hi\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = ContactTable::load(file.path()).unwrap();
        let mut contacts = table.contacts();
        contacts[0].status = Status::Sent;
        contacts[1].status = Status::FailedMessage;

        table.write_report(&path, &contacts).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        // The input's own header order and casing, STATUS appended.
        assert_eq!(lines.next(), Some("dept,NAME,PHONE,MESSAGE,STATUS"));
        assert_eq!(lines.next(), Some("sales,Ana,11999990000,Hi,SENT"));
        assert_eq!(lines.next(), Some("ops,Bob,11988887777,Hi,FAILED_MESSAGE"));
    }

    #[test]
    fn existing_status_column_is_overwritten_in_place() {
        let file = table_file("NAME,PHONE,STATUS,MESSAGE\nAna,11999990000,SENT,Hi\n");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = ContactTable::load(file.path()).unwrap();
        let mut contacts = table.contacts();
        contacts[0].status = Status::FailedAttachment;

        table.write_report(&path, &contacts).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("NAME,PHONE,STATUS,MESSAGE"));
        assert_eq!(lines.next(), Some("Ana,11999990000,FAILED_ATTACHMENT,Hi"));
    }
}
