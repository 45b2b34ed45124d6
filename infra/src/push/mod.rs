//! Push delivery module - channel providers for the notification dispatcher

pub mod fcm;
pub mod mock_push;

pub use fcm::FcmHttpProvider;
pub use mock_push::MockPushProvider;
