//! Notification fan-out engine for case-lifecycle events.
//!
//! One pipeline per event: [`RecipientResolver`] computes who must hear
//! about it, [`MessageComposer`] produces the per-role message, and
//! [`DeliveryDispatcher`] pushes to each target independently, tolerating
//! per-recipient failure. Callers fire the pipeline *after* committing the
//! state change that triggered it; delivery is best-effort and never rolls
//! back or blocks the transition.

mod composer;
mod config;
mod dispatcher;
mod resolver;
mod traits;

#[cfg(test)]
mod tests;

pub use composer::MessageComposer;
pub use config::DispatchConfig;
pub use dispatcher::DeliveryDispatcher;
pub use resolver::{RecipientResolver, ResolvedTargets};
pub use traits::DeliveryProvider;
