//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod index_service;
pub mod search_card;

pub use index_service::{EntityIndexService, LoadStatus};
pub use search_card::{CardView, SearchCard};
