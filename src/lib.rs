//! In-memory model of near-Earth objects and their close approaches to Earth.
//!
//! Records are built independently from loosely typed source rows
//! ([`RawFields`]) and then joined by [`Catalog::link`], which gives each
//! approach a handle to its object and appends it to that object's list.

pub mod api;
pub mod catalog;
pub mod core;
pub mod utils;

pub use crate::api::types::{ApproachDto, NeoDto};
pub use crate::catalog::Catalog;
pub use crate::core::approach::{CloseApproach, LinkedApproach, NeoId};
pub use crate::core::error::ModelError;
pub use crate::core::fields::{CatalogRecord, RawFields};
pub use crate::core::neo::NearEarthObject;
pub use crate::utils::time::{format_timestamp, parse_calendar_string};
