//! Circular dependency guard
//!
//! Tracks the composite types whose construction is currently in flight on
//! the active call path, plus the configured maximum repeat depth. The
//! engine consults [`ConstructionContext::occurrences`] before entering a
//! composite construction and aborts (degrading to default) when a type
//! already repeats more than `max_circular_depth` times.
//!
//! Invariant: the stack exactly mirrors the in-flight call path. Entering
//! construction of a type pushes it; leaving (success or abort) pops it
//! exactly once. After every top-level create the stack is empty.

use std::any::TypeId;

/// Per-synthesizer state for one family of `create` calls
///
/// Owned by the [`crate::Synthesizer`]; never shared between concurrent
/// callers (the engine takes `&mut self`, so the borrow checker enforces
/// the one-instance-per-caller contract).
#[derive(Debug, Default)]
pub struct ConstructionContext {
    in_flight: Vec<TypeId>,
    max_circular_depth: usize,
}

impl ConstructionContext {
    /// Create a context with the default circular depth of 0
    /// (no self-referential recursion)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of times a type may repeat on the in-flight stack
    #[inline]
    #[must_use]
    pub fn max_circular_depth(&self) -> usize {
        self.max_circular_depth
    }

    /// Set the maximum repeat depth
    #[inline]
    pub fn set_max_circular_depth(&mut self, depth: usize) {
        self.max_circular_depth = depth;
    }

    /// Number of times `ty` already appears on the in-flight stack
    #[must_use]
    pub fn occurrences(&self, ty: TypeId) -> usize {
        self.in_flight.iter().filter(|t| **t == ty).count()
    }

    /// Push a type onto the in-flight stack
    pub fn enter(&mut self, ty: TypeId) {
        self.in_flight.push(ty);
    }

    /// Pop a type from the in-flight stack
    ///
    /// Must match the most recent unmatched [`Self::enter`].
    pub fn leave(&mut self, ty: TypeId) {
        let top = self.in_flight.pop();
        debug_assert_eq!(top, Some(ty), "unbalanced construction stack");
    }

    /// Current nesting depth of in-flight composite constructions
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.in_flight.len()
    }

    /// True when no construction is in flight
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_idle() {
        let ctx = ConstructionContext::new();
        assert!(ctx.is_idle());
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.max_circular_depth(), 0);
    }

    #[test]
    fn enter_leave_balanced() {
        let mut ctx = ConstructionContext::new();
        let a = TypeId::of::<u32>();
        let b = TypeId::of::<String>();

        ctx.enter(a);
        ctx.enter(b);
        assert_eq!(ctx.depth(), 2);

        ctx.leave(b);
        ctx.leave(a);
        assert!(ctx.is_idle());
    }

    #[test]
    fn occurrences_counts_repeats() {
        let mut ctx = ConstructionContext::new();
        let a = TypeId::of::<u32>();
        let b = TypeId::of::<String>();

        assert_eq!(ctx.occurrences(a), 0);
        ctx.enter(a);
        ctx.enter(b);
        ctx.enter(a);
        assert_eq!(ctx.occurrences(a), 2);
        assert_eq!(ctx.occurrences(b), 1);
    }

    #[test]
    fn set_max_circular_depth() {
        let mut ctx = ConstructionContext::new();
        ctx.set_max_circular_depth(3);
        assert_eq!(ctx.max_circular_depth(), 3);
    }
}
