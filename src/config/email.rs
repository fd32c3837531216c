//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    #[serde(default)]
    pub resend_api_key: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Address that receives finished intake packages
    #[serde(default)]
    pub team_recipient: String,

    /// Subject line prefix, followed by the submitter's name
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self.team_recipient.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__TEAM_RECIPIENT"));
        }
        if !self.team_recipient.contains('@') {
            return Err(ValidationError::InvalidTeamRecipient);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            team_recipient: String::new(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

fn default_from_email() -> String {
    "intake@example.com".to_string()
}

fn default_from_name() -> String {
    "Idea Intake".to_string()
}

fn default_subject_prefix() -> String {
    "New idea submission".to_string()
}
