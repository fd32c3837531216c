//! Contact line extraction.
//!
//! A strict syntactic match on `"<name>, <phone>"`. No attempt is made to
//! check that the name or number are real.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Greedy name group so the split happens at the last comma. ASCII digits
// only: `\d` would also accept other Unicode digit scripts.
static CONTACT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>.+),\s*(?P<phone>\+?[0-9]{9,15})\s*$")
        .expect("contact pattern is valid")
});

/// Name and phone number of the person submitting the idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
}

impl ContactDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Parses a `"<name>, <phone>"` line.
///
/// The phone is an optional `+` followed by 9 to 15 ASCII digits. Returns `None`
/// when the line does not have that shape or the name is blank.
pub fn extract_contact(text: &str) -> Option<ContactDetails> {
    let captures = CONTACT_LINE.captures(text)?;
    let name = captures.name("name")?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let phone = captures.name("phone")?.as_str();
    Some(ContactDetails::new(name, phone))
}
