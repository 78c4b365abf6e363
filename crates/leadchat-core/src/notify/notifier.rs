//! LeadNotifier trait definition.

use std::future::Future;
use std::sync::Arc;

use leadchat_types::error::NotifyError;
use leadchat_types::lead::LeadInfo;

/// Delivers captured lead details to the sales team.
///
/// No retry policy is imposed: a failed call leaves the decision to retry
/// with the caller.
pub trait LeadNotifier: Send + Sync {
    /// Send one notification for `lead`.
    fn notify(&self, lead: &LeadInfo) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

impl<T: LeadNotifier> LeadNotifier for Arc<T> {
    fn notify(&self, lead: &LeadInfo) -> impl Future<Output = Result<(), NotifyError>> + Send {
        (**self).notify(lead)
    }
}
