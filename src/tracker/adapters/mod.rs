//! Adapter implementations of the port contracts and the outward-facing
//! HTTP surface.

pub mod file;
pub mod http;
