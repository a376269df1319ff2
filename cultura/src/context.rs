//! The active culture, held as an explicit, shareable value.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::culture::{self, Culture};

/// Handle to the currently active culture.
///
/// Clones share the same state: activating a culture through one handle is
/// visible through every other. Readers take a snapshot with [`active`]; a
/// snapshot never changes after it is taken.
///
/// [`active`]: CultureContext::active
#[derive(Debug, Clone)]
pub struct CultureContext {
    active: Arc<RwLock<Arc<Culture>>>,
}

impl Default for CultureContext {
    fn default() -> Self {
        Self::new(culture::default_culture())
    }
}

impl CultureContext {
    pub fn new(initial: Culture) -> Self {
        CultureContext {
            active: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Snapshot of the culture active right now.
    pub fn active(&self) -> Arc<Culture> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn active_name(&self) -> String {
        self.active().name.clone()
    }

    /// Makes `culture` the active culture, returning the previous one.
    pub fn activate(&self, culture: Culture) -> Arc<Culture> {
        debug!(culture = %culture.name, "activating culture");
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(culture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        let context = CultureContext::default();
        assert_eq!(context.active_name(), "en");
    }

    #[test]
    fn test_activate_is_shared_between_clones() {
        let context = CultureContext::default();
        let other = context.clone();

        let previous = other.activate(culture::builtin("fr").unwrap());
        assert_eq!(previous.name, "en");
        assert_eq!(context.active_name(), "fr");
    }

    #[test]
    fn test_snapshot_is_stable() {
        let context = CultureContext::default();
        let snapshot = context.active();
        context.activate(culture::builtin("ja").unwrap());
        assert_eq!(snapshot.name, "en");
        assert_eq!(context.active().name, "ja");
    }
}
