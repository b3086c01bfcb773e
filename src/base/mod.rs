//! Base types and error handling.
//!
//! Provides foundational types shared by the rest of the crate:
//! - [`error::ChatError`]: error taxonomy for transport and storage failures
//! - [`status::ConnectionStatus`]: channel lifecycle states

pub mod error;
pub mod status;
