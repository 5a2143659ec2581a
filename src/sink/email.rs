//! Email sink — delivers the registration confirmation through Resend.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use super::confirmation::{Confirmation, Sender};
use super::types::{Registration, RegistrationSink, SinkError};

pub struct EmailSink {
    resend: Resend,
    from: String,
    sender: Sender,
}

impl EmailSink {
    #[must_use]
    pub fn new(api_key: &str, from: impl Into<String>, sender: Sender) -> Self {
        Self { resend: Resend::new(api_key), from: from.into(), sender }
    }

    /// `From` header: bare addresses get the sender's display name.
    #[must_use]
    pub fn from_header(&self) -> String {
        from_header(&self.from, &self.sender.from_name)
    }

    #[must_use]
    pub fn confirmation_for(&self, registration: &Registration) -> Confirmation {
        Confirmation::new(registration, &self.sender)
    }

    /// Resend request for `confirmation`, with `Reply-To` set when configured.
    #[must_use]
    pub fn build_email(&self, confirmation: &Confirmation) -> CreateEmailBaseOptions {
        let from = self.from_header();
        let to = [confirmation.to_email.as_str()];
        let html = confirmation.to_html();

        let email = CreateEmailBaseOptions::new(&from, to, &confirmation.subject).with_html(&html);
        match &confirmation.reply_to {
            Some(reply_to) => email.with_reply(reply_to),
            None => email,
        }
    }
}

fn from_header(from: &str, from_name: &str) -> String {
    if from.contains('<') || from_name.trim().is_empty() {
        from.to_owned()
    } else {
        format!("{from_name} <{from}>")
    }
}

#[async_trait::async_trait]
impl RegistrationSink for EmailSink {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError> {
        let confirmation = self.confirmation_for(registration);
        let email = self.build_email(&confirmation);
        self.resend
            .emails
            .send(email)
            .await
            .map_err(|e| SinkError::Delivery(e.to_string()))?;

        tracing::info!(to_email = %confirmation.to_email, "registration confirmation sent");
        Ok(())
    }
}

#[cfg(test)]
#[path = "email_test.rs"]
mod tests;
