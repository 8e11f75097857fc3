//! A module for parsing `host:port` strings, see [`HostPort`].

mod error;
mod host_port;
mod tests;

pub use error::*;
pub use host_port::*;
