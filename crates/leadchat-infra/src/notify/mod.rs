//! Lead notification delivery.
//!
//! [`email`] renders the notification text; [`smtp`] sends it through an
//! SMTP relay and implements the core `LeadNotifier` port.

pub mod email;
pub mod smtp;
