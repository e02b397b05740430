//! Crate for interacting with the Ark apiserver extension
//!
//! The [`Client`] wraps an injected http transport; the [`Api`] type layers
//! typed get/list/watch/create/replace/delete/patch calls for one resource
//! kind on top of it.
//!
//! # Example
//!
//! The following creates a [`Schedule`](ark_api::v1::Schedule) and then reads
//! it back:
//!
//! ```rust,no_run
//! use ark_api::v1::{BackupSpec, Schedule, ScheduleSpec};
//! use ark_client::{api::PostParams, Api, Client};
//!
//! # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
//! # let client: Client = todo!();
//! let schedules: Api<Schedule> = Api::namespaced(client, "heptio-ark");
//!
//! let s = Schedule::new("daily-backup", ScheduleSpec {
//!     schedule: "0 7 * * *".into(),
//!     template: BackupSpec::default(),
//! });
//! schedules.create(&PostParams::default(), &s).await?;
//!
//! let fetched = schedules.get("daily-backup").await?;
//! println!("schedule fires at {}", fetched.spec.schedule);
//! # Ok(())
//! # }
//! ```
//!
//! For more details, see:
//!
//! - [`Client`](crate::client) for the transport-wrapping client
//! - [`Api`](crate::Api) for the generic api methods available on every kind
//! - [`ark_core`] for the request parameters and wire types

pub mod api;
pub mod client;
pub mod error;

#[doc(inline)] pub use api::Api;
#[doc(inline)] pub use client::Client;
#[doc(inline)] pub use error::Error;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Re-export of the client-less machinery crate
pub use ark_core as core;
