//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the host.
//! They replace any ambient lookup of host globals: every collaborator is
//! handed to the service at construction time.

pub mod event_bus;
pub mod live_state;
pub mod registry;
pub mod usage;

pub use event_bus::SelectionPublisher;
pub use live_state::LiveStateSource;
pub use registry::RegistrySource;
pub use usage::UsageRepository;
