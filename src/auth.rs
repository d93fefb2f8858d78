//! Gateway credentials and the HMAC date-signing protocol.

pub mod credential;
pub mod signature;

pub use credential::*;
pub use signature::*;
