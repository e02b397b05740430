//! Types and traits necessary for interacting with the Ark API group
//!
//! This crate is the client-less half of the workspace: request parameters,
//! the url/request builder, resource traits and the wire types they rely on.
//! Everything here is re-exported from `ark-client` for convenience.

mod error;
pub use error::ErrorResponse;

pub mod metadata;

pub mod object;

pub mod params;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{
    ClusterResourceScope, NamespaceResourceScope, Resource, ResourceExt, ResourceScope,
};

pub mod response;

pub mod watch;
pub use watch::WatchEvent;
