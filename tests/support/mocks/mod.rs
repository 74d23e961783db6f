// tests/support/mocks/mod.rs
//! Recording test doubles for every port.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod calls;
pub mod logger;
pub mod security;
pub mod time;
pub mod tokens;
pub mod users;

pub use calls::CallLog;
pub use logger::RecordingLogger;
pub use security::{MockPasswordComparer, MockPasswordHasher, MockTokenGenerator, MockTokenVerifier};
pub use time::{FixedClock, fixed_now};
pub use tokens::MockTokenStore;
pub use users::MockUserStore;
