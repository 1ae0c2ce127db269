//! Relay core library — config, message transform, upstream client, and the
//! HTTP relay server used by the CLI.

pub mod config;
pub mod message;
pub mod relay;
pub mod upstream;
