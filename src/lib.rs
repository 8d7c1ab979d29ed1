//! Webhook bridge between the SmartThings lifecycle protocol and the
//! SmartThings REST API.
//!
//! The platform calls a single webhook endpoint with a `lifecycle`
//! discriminator (PING, CONFIRMATION, CONFIGURATION, INSTALL, UPDATE,
//! UNINSTALL, EVENT). [`lifecycle`] routes each callback to its handler,
//! [`config`] drives the multi-page installation wizard, and [`client`]
//! exposes one thin typed call per REST endpoint.

pub mod client;
pub mod config;
pub mod lifecycle;
pub mod server;
pub mod signature;
