//! Transport module for submitting intake payloads over HTTP

mod client;
mod error;
mod traits;

pub use client::IntakeClient;
pub use error::TransportError;
pub use traits::IntakeTransport;

#[cfg(test)]
pub use traits::MockIntakeTransport;
