//! Provider client: one driver plus the HTTP transport.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;

pub use builder::ProviderClientBuilder;
pub use core::ProviderClient;
