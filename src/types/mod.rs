//! Core data types shared by the drivers, the client and the runner.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`ProviderResponse`] | Text a provider returned, with finish reason and usage |
//! | [`Artifact`] | A translation written to disk |

pub mod message;
pub mod response;

pub use message::{Message, MessageRole};
pub use response::{Artifact, FinishReason, ProviderResponse, UsageInfo};
