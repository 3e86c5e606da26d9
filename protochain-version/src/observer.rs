//! Change-listener plumbing shared by the packed version types
//!
//! Each version type carries a single optional listener slot. Every
//! successful field mutation notifies the listener synchronously, and
//! registering a listener fires one immediate notification so the
//! listener can sync its initial state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use crate::{VersionError, VersionResult};

/// Capability implemented by anything that wants to track mutations of a
/// [`FullVersion`](crate::FullVersion) or [`ShortVersion`](crate::ShortVersion).
pub trait VersionChangeListener {
    /// Invoked synchronously after every successful field mutation of the
    /// observed version, and once immediately upon registration.
    fn on_change(&self);
}

/// Single-slot listener holder.
///
/// Holds a `Weak` back-reference so an observing composite and its
/// observed sub-versions do not keep each other alive in a cycle.
#[derive(Default)]
pub(crate) struct ListenerSlot {
    slot: RefCell<Option<Weak<dyn VersionChangeListener>>>,
}

impl ListenerSlot {
    /// Register `listener` and fire the replay-on-subscribe notification.
    ///
    /// Fails with [`VersionError::DeadListener`] when the listener has
    /// already been dropped; the slot is left unchanged in that case.
    pub fn bind(&self, listener: Weak<dyn VersionChangeListener>) -> VersionResult<()> {
        let live = listener.upgrade().ok_or(VersionError::DeadListener)?;
        *self.slot.borrow_mut() = Some(listener);
        live.on_change();
        Ok(())
    }

    /// Notify the registered listener, if any is still alive.
    pub fn notify(&self) {
        let listener = self.slot.borrow().clone();
        if let Some(listener) = listener.and_then(|weak| weak.upgrade()) {
            listener.on_change();
        }
    }
}

impl fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = self.slot.borrow().is_some();
        f.debug_struct("ListenerSlot").field("bound", &bound).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        hits: Cell<u32>,
    }

    impl VersionChangeListener for Counter {
        fn on_change(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn test_bind_fires_immediately() {
        let counter = Rc::new(Counter { hits: Cell::new(0) });
        let slot = ListenerSlot::default();
        let weak = Rc::downgrade(&counter);
        let weak: Weak<dyn VersionChangeListener> = weak;
        slot.bind(weak).unwrap();
        assert_eq!(counter.hits.get(), 1);

        slot.notify();
        assert_eq!(counter.hits.get(), 2);
    }

    #[test]
    fn test_bind_rejects_dead_listener() {
        let weak: Weak<dyn VersionChangeListener> = {
            let counter = Rc::new(Counter { hits: Cell::new(0) });
            let weak = Rc::downgrade(&counter);
            weak as Weak<dyn VersionChangeListener>
        };
        let slot = ListenerSlot::default();
        assert_eq!(slot.bind(weak), Err(VersionError::DeadListener));
    }

    #[test]
    fn test_notify_without_listener_is_noop() {
        let slot = ListenerSlot::default();
        slot.notify();
    }

    #[test]
    fn test_notify_after_listener_dropped_is_noop() {
        let slot = ListenerSlot::default();
        {
            let counter = Rc::new(Counter { hits: Cell::new(0) });
            let weak = Rc::downgrade(&counter);
            let weak: Weak<dyn VersionChangeListener> = weak;
            slot.bind(weak).unwrap();
        }
        slot.notify();
    }
}
