//! Plain-text lead notification email.

use chrono::{DateTime, TimeZone};

use leadchat_types::lead::LeadInfo;

/// Subject and body of one lead notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEmail {
    pub subject: String,
    pub body: String,
}

impl LeadEmail {
    /// Render the notification for `lead`, stamped with `at` in its own timezone.
    pub fn compose<Tz>(lead: &LeadInfo, product_name: &str, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let subject = format!("New Lead from Chatbot: {} - {}", lead.name, lead.company);
        let body = format!(
            "New Lead Information:\n\
             ---------------------\n\
             Date/Time: {timestamp}\n\
             Name: {name}\n\
             Company: {company}\n\
             Phone: {phone}\n\
             Email: {email}\n\
             \n\
             This is an automated notification from your {product_name}.\n",
            timestamp = at.format("%Y-%m-%d %H:%M:%S"),
            name = lead.name,
            company = lead.company,
            phone = lead.phone,
            email = lead.email,
        );
        Self { subject, body }
    }
}
