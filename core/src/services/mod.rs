//! Business services

pub mod notification;
pub mod verification;

pub use notification::{DeliveryDispatcher, DeliveryProvider, MessageComposer, RecipientResolver};
pub use verification::{CodeIssuer, CodeVerifier, VerificationConfig};
