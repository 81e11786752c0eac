pub mod error;
pub mod message;
pub mod options;
pub mod platform;
pub mod port;

#[cfg(feature = "test-utils")]
pub mod testing;
