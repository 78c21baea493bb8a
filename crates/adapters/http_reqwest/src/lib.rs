//! # homedash-adapter-http
//!
//! Driven adapter for the home automation backend's REST API.
//!
//! [`HttpBackend`] implements the [`RuleApi`](homedash_app::ports::RuleApi),
//! [`StateSource`](homedash_app::ports::StateSource) and
//! [`DeviceControl`](homedash_app::ports::DeviceControl) ports over
//! `reqwest`. Backend errors arrive as `{"error": "…"}` bodies and are
//! converted into [`HomeDashError`](homedash_domain::error::HomeDashError).

pub mod client;
pub mod config;
pub mod error;

pub use client::HttpBackend;
pub use config::HttpConfig;
pub use error::HttpError;
