//! # hubsearch-domain
//!
//! Pure domain model of the dashboard search card.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Host registry records: **Areas**, **Devices**, **Entity registry entries**
//! - The host's **live state** map and attribute values
//! - The **entity index**: registry joiner and live state synchronizer
//! - The **query engine**: facets, multi-term matching, ranking, paging, grouping
//! - The per-card **search session** state machine and card configuration
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod area;
pub mod config;
pub mod device;
pub mod entity;
pub mod index;
pub mod query;
pub mod selection;
pub mod session;
pub mod usage;
