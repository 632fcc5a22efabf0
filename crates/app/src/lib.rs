//! # hubsearch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RegistrySource` — area, device and entity registries of the host
//!   - `LiveStateSource` — read access to the host's live state map
//!   - `UsageRepository` — per-entity usage counters for ranking
//!   - `SelectionPublisher` — "show more info" notifications to the host
//! - Define **driving/inbound** use-case structs:
//!   - `EntityIndexService` — load, sync, search, select
//!   - `SearchCard` — one card: session state on top of the service
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (selection bus, usage cache, keystroke debouncer)
//!
//! ## Dependency rule
//! Depends on `hubsearch-domain` only (plus `tokio` for sync and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod debounce;
pub mod event_bus;
pub mod ports;
pub mod services;
pub mod usage_cache;
