//! Typed resource kinds served by the Ark apiserver extension
//!
//! Each versioned module holds the spec/status types of its kinds along with
//! their [`Resource`](ark_core::Resource) implementations, so that a typed
//! accessor can be instantiated per kind without any per-kind request code.

pub mod v1;
