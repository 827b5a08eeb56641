//! HTTP transport shared by both providers.

pub mod http;

pub use http::{HttpReply, HttpTransport, TransportError};
