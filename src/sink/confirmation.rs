//! Confirmation message sent back to a new registrant.
//!
//! Pure rendering so both the simulated and email sinks share one text.
//! The password is never part of the message.

use super::types::Registration;

pub const DEFAULT_FROM_NAME: &str = "Tech Community";
pub const SUBJECT: &str = "Thank you for registering!";

/// Sender identity stamped onto every confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub from_name: String,
    pub reply_to: Option<String>,
}

impl Default for Sender {
    fn default() -> Self {
        Self { from_name: DEFAULT_FROM_NAME.to_owned(), reply_to: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub to_email: String,
    pub to_name: String,
    pub from_name: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub message: String,
}

impl Confirmation {
    #[must_use]
    pub fn new(registration: &Registration, sender: &Sender) -> Self {
        Self {
            to_email: registration.email.clone(),
            to_name: registration.username.clone(),
            from_name: sender.from_name.clone(),
            reply_to: sender.reply_to.clone(),
            subject: SUBJECT.to_owned(),
            message: render_message(registration),
        }
    }

    /// HTML body for mail delivery. User-supplied text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div>");
        for paragraph in self.message.split("\n\n") {
            let lines: Vec<String> = paragraph.lines().map(escape_html).collect();
            html.push_str("<p>");
            html.push_str(&lines.join("<br>"));
            html.push_str("</p>");
        }
        if let Some(reply_to) = &self.reply_to {
            html.push_str(&format!("<p>Questions? Reply to {}.</p>", escape_html(reply_to)));
        }
        html.push_str(&format!("<p>{}</p></div>", escape_html(&self.from_name)));
        html
    }
}

#[must_use]
pub fn render_message(registration: &Registration) -> String {
    format!(
        "Thank you for registering!\n\nYour registration details:\nUsername: {}\nEmail: {}\nPRN: {}\n\nWe'll be in touch soon!",
        registration.username, registration.email, registration.identifier
    )
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "confirmation_test.rs"]
mod tests;
