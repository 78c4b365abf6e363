//! Lead notification port.
//!
//! The controller hands captured lead details to a [`notifier::LeadNotifier`];
//! the SMTP implementation lives in leadchat-infra.

pub mod notifier;
