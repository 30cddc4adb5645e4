//! Sprout shielded data structures.
//!
//! This crate contains the types needed to build and check Sprout JoinSplit
//! transfers: spending keys and payment addresses, notes and their
//! commitments and nullifiers, in-band note encryption, the Sprout note
//! commitment tree and its witnesses, and the consensus-critical encoding of
//! JoinSplit descriptions.
//!
//! Proof construction and verification live in the `sprout-joinsplit` crate.

#![doc(html_root_url = "https://docs.rs/sprout_chain")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]
// Each lazy_static variable uses additional recursion
#![recursion_limit = "512"]

#[macro_use]
extern crate serde;

pub mod amount;
pub mod fmt;
pub mod parameters;
pub mod primitives;
pub mod serialization;
pub mod sprout;
