//! Network parameters.
//!
//! Each network is a single [`NetworkParameters`] value selected by a
//! [`Network`] tag. Only the constants the Sprout subsystem and its
//! callers need are carried here.

mod network;

pub use network::{
    magics, InvalidNetworkError, Magic, Network, NetworkParameters, SproutValuePoolCheckpoint,
};
