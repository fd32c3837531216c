//! Hand-off package assembly.
//!
//! Packs the contact record and full transcript into the message the
//! delivery team receives.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, ValidationError};

use super::session::IntakeSession;

/// Where finished packages are delivered and how they are titled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffSettings {
    pub recipient: String,
    pub subject_prefix: String,
}

impl HandoffSettings {
    pub fn new(recipient: impl Into<String>, subject_prefix: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject_prefix: subject_prefix.into(),
        }
    }
}

/// A finished submission ready for the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffPackage {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

/// Builds the package for a session whose contact details are known.
///
/// # Errors
///
/// Returns `ValidationError` if the session has no contact record yet.
pub fn assemble(
    session: &IntakeSession,
    settings: &HandoffSettings,
) -> Result<HandoffPackage, ValidationError> {
    let contact = session
        .contact()
        .ok_or_else(|| ValidationError::empty_field("contact"))?;

    let subject = format!("{}: {}", settings.subject_prefix, contact.name);

    let body = format!(
        "A new idea has been submitted through the intake assistant.\n\
         \n\
         Contact\n\
         Name: {name}\n\
         Phone: {phone}\n\
         \n\
         Session: {session_id}\n\
         Started: {started}\n\
         Submitted: {submitted}\n\
         Solution idea phase skipped: {skipped}\n\
         \n\
         Conversation transcript (business problem, solution, features, user stories)\n\
         ----------------------------------------\n\
         {transcript}\n",
        name = contact.name,
        phone = contact.phone,
        session_id = session.id(),
        started = session.created_at().to_rfc3339(),
        submitted = Timestamp::now().to_rfc3339(),
        skipped = if session.solution_skipped() { "yes" } else { "no" },
        transcript = session.transcript().render(),
    );

    Ok(HandoffPackage {
        subject,
        body,
        recipient: settings.recipient.clone(),
    })
}
