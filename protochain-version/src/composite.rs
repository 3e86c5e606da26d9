//! Composite (effective) protocol version
//!
//! The in-memory version derived from a bound full/short pair. It is never
//! written into block headers itself; headers carry the packed full and
//! short forms, and the composite keeps the field-wise sum up to date by
//! observing both.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{
    FullVersion, ShortVersion, VersionChangeListener, VersionResult, VersionTriple,
    UNDEFINED_TRIPLE,
};

/// Shared inner state. Implements the listener capability so the bound
/// sub-versions can hold a `Weak` back-reference to it.
#[derive(Debug, Default)]
struct CompositeState {
    full: RefCell<Option<Rc<FullVersion>>>,
    short: RefCell<Option<Rc<ShortVersion>>>,
    effective: Cell<VersionTriple>,
}

impl CompositeState {
    /// Recompute the effective triple. Cheap and idempotent; a no-op
    /// (sentinel) result until both sub-versions are bound.
    fn recompute(&self) {
        let full = self.full.borrow();
        let short = self.short.borrow();
        let triple = match (full.as_ref(), short.as_ref()) {
            (Some(full), Some(short)) => full.add_offset(short),
            _ => UNDEFINED_TRIPLE,
        };
        self.effective.set(triple);
    }
}

impl VersionChangeListener for CompositeState {
    fn on_change(&self) {
        self.recompute();
    }
}

/// Effective protocol version: full version plus short offset, field-wise.
///
/// Holds shared references to the sub-versions it observes and registers
/// itself as their change listener, so any mutation of either one is
/// reflected in the derived triple before the mutating setter returns.
/// Until both sub-versions are bound the triple is [`UNDEFINED_TRIPLE`].
#[derive(Debug)]
pub struct CompositeVersion {
    inner: Rc<CompositeState>,
}

impl CompositeVersion {
    /// Create an unbound composite; the triple starts at the sentinel.
    pub fn new() -> Self {
        let inner = Rc::new(CompositeState::default());
        inner.effective.set(UNDEFINED_TRIPLE);
        Self { inner }
    }

    /// Create a composite already bound to both sub-versions.
    pub fn bound(full: Rc<FullVersion>, short: Rc<ShortVersion>) -> VersionResult<Self> {
        let composite = Self::new();
        composite.set_full(full)?;
        composite.set_short(short)?;
        Ok(composite)
    }

    /// Bind the full version and start observing it.
    ///
    /// Registration fires an immediate notification, so the triple is
    /// recomputed before this returns. Rebinding replaces the previous
    /// full version.
    pub fn set_full(&self, full: Rc<FullVersion>) -> VersionResult<()> {
        *self.inner.full.borrow_mut() = Some(Rc::clone(&full));
        let weak = Rc::downgrade(&self.inner);
        let listener: Weak<dyn VersionChangeListener> = weak;
        full.set_listener(listener)?;
        self.inner.recompute();
        Ok(())
    }

    /// Bind the short version and start observing it. Symmetric to
    /// [`set_full`](Self::set_full).
    pub fn set_short(&self, short: Rc<ShortVersion>) -> VersionResult<()> {
        *self.inner.short.borrow_mut() = Some(Rc::clone(&short));
        let weak = Rc::downgrade(&self.inner);
        let listener: Weak<dyn VersionChangeListener> = weak;
        short.set_listener(listener)?;
        self.inner.recompute();
        Ok(())
    }

    /// Whether both sub-versions are bound.
    pub fn is_bound(&self) -> bool {
        self.inner.full.borrow().is_some() && self.inner.short.borrow().is_some()
    }

    /// Effective major, `-1` while unbound.
    pub fn major(&self) -> i32 {
        self.inner.effective.get().0
    }

    /// Effective minor, `-1` while unbound.
    pub fn minor(&self) -> i32 {
        self.inner.effective.get().1
    }

    /// Effective patch, `-1` while unbound.
    pub fn patch(&self) -> i32 {
        self.inner.effective.get().2
    }

    /// The whole effective triple.
    pub fn triple(&self) -> VersionTriple {
        self.inner.effective.get()
    }

    /// Dotted string form of the effective triple.
    pub fn as_str(&self) -> String {
        let (major, minor, patch) = self.inner.effective.get();
        format!("{}.{}.{}", major, minor, patch)
    }
}

impl Default for CompositeVersion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompositeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_triple_is_sentinel() {
        let composite = CompositeVersion::new();
        assert!(!composite.is_bound());
        assert_eq!(composite.triple(), (-1, -1, -1));
        assert_eq!(composite.as_str(), "-1.-1.-1");
    }

    #[test]
    fn test_binding_both_derives_the_sum() {
        let full = Rc::new(FullVersion::from_fields(0, 1, 0).unwrap());
        let short = Rc::new(ShortVersion::from_fields(0, 0, 0).unwrap());
        let composite = CompositeVersion::bound(full, short).unwrap();
        assert!(composite.is_bound());
        assert_eq!(composite.triple(), (0, 1, 0));
        assert_eq!(composite.as_str(), "0.1.0");
    }

    #[test]
    fn test_half_bound_stays_undefined() {
        let composite = CompositeVersion::new();
        composite
            .set_full(Rc::new(FullVersion::from_fields(1, 2, 3).unwrap()))
            .unwrap();
        assert!(!composite.is_bound());
        assert_eq!(composite.triple(), (-1, -1, -1));

        // binding order is irrelevant; the triple appears once both are set
        composite.set_short(Rc::new(ShortVersion::default())).unwrap();
        assert_eq!(composite.triple(), (1, 2, 3));
    }

    #[test]
    fn test_mutating_a_bound_subversion_updates_the_composite() {
        let full = Rc::new(FullVersion::from_fields(0, 1, 0).unwrap());
        let short = Rc::new(ShortVersion::default());
        let composite =
            CompositeVersion::bound(Rc::clone(&full), Rc::clone(&short)).unwrap();
        assert_eq!(composite.triple(), (0, 1, 0));

        // no re-binding needed: the change propagates synchronously
        full.set_patch(1).unwrap();
        assert_eq!(composite.patch(), 1);
        assert_eq!(composite.triple(), (0, 1, 1));

        short.set_minor(2).unwrap();
        assert_eq!(composite.triple(), (0, 3, 1));
    }

    #[test]
    fn test_sum_may_exceed_packed_widths() {
        let full = Rc::new(FullVersion::from_fields(255, 15, 15).unwrap());
        let short = Rc::new(ShortVersion::from_fields(3, 7, 7).unwrap());
        let composite = CompositeVersion::bound(full, short).unwrap();
        assert_eq!(composite.triple(), (258, 22, 22));
        assert_eq!(composite.as_str(), "258.22.22");
    }

    #[test]
    fn test_rebinding_replaces_the_subversion() {
        let composite = CompositeVersion::bound(
            Rc::new(FullVersion::from_fields(1, 0, 0).unwrap()),
            Rc::new(ShortVersion::default()),
        )
        .unwrap();
        assert_eq!(composite.triple(), (1, 0, 0));

        composite
            .set_full(Rc::new(FullVersion::from_fields(2, 5, 9).unwrap()))
            .unwrap();
        assert_eq!(composite.triple(), (2, 5, 9));
    }

    #[test]
    fn test_composite_never_mutates_subversions() {
        let full = Rc::new(FullVersion::from_fields(4, 5, 6).unwrap());
        let short = Rc::new(ShortVersion::from_fields(1, 1, 1).unwrap());
        let _composite =
            CompositeVersion::bound(Rc::clone(&full), Rc::clone(&short)).unwrap();
        assert_eq!(full.as_str(), "4.5.6");
        assert_eq!(short.as_str(), "+1.+1.+1");
    }
}
