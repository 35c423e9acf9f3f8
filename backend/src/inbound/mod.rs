//! Inbound adapters that translate external requests into domain port calls.

pub mod http;
