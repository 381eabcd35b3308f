use std::path::Path;

use anyhow::{Context, Result};
use herald::phone::{self, PhoneCheck};

use crate::table;

/// Dry run of the load-time checks: column presence and per-row phone
/// validity. No browser is opened.
pub fn execute(input: &Path) -> Result<()> {
    let contacts = table::ContactTable::load(input)
        .with_context(|| format!("loading contact table {}", input.display()))?
        .contacts();

    let mut invalid = 0usize;
    for (index, contact) in contacts.iter().enumerate() {
        if let PhoneCheck::Invalid(reason) = phone::validate(&contact.phone) {
            invalid += 1;
            // +2: one for the header row, one for 1-based counting.
            println!("row {}: {} ({}): {}", index + 2, contact.name, contact.phone, reason);
        }
    }

    println!("{} contact(s), {} invalid phone(s)", contacts.len(), invalid);
    Ok(())
}
