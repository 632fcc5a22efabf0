//! Live state port — read access to the host's continuously updated state map.

use hubsearch_domain::entity::LiveState;

/// Accessor for the host's live state.
///
/// The map is owned and mutated by the host; the core only reads it, and
/// always reads the current version.
pub trait LiveStateSource {
    /// Run `f` against the current state map.
    fn read<R>(&self, f: impl FnOnce(&LiveState) -> R) -> R;
}

impl<T: LiveStateSource> LiveStateSource for std::sync::Arc<T> {
    fn read<R>(&self, f: impl FnOnce(&LiveState) -> R) -> R {
        (**self).read(f)
    }
}
