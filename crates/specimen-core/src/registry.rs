//! Generator registry
//!
//! Maps a target type to the capability object that produces values of
//! that type. Generators are registered explicitly (the bootstrap layer in
//! `specimen-generators` installs the built-in set); there is at most one
//! entry per type and the last registration wins.

use crate::error::GeneratorError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Number of elements a sequence request produces unless the generator
/// overrides [`ValueGenerator::generate_sequence`]
pub const DEFAULT_SEQUENCE_LEN: usize = 3;

/// Capability for producing values of one specific type
///
/// Implementations are discovered by the bootstrap layer and registered
/// with a [`GeneratorRegistry`]; the construction engine only consumes
/// them. `generate_sequence` feeds single-argument generic containers and
/// defaults to [`DEFAULT_SEQUENCE_LEN`] independent draws.
pub trait ValueGenerator: Send + Sync {
    /// The type this generator produces
    type Output: 'static;

    /// Produce a single value
    fn generate(&self) -> Result<Self::Output, GeneratorError>;

    /// Produce a sequence of values for use as container elements
    fn generate_sequence(&self) -> Result<Vec<Self::Output>, GeneratorError> {
        (0..DEFAULT_SEQUENCE_LEN).map(|_| self.generate()).collect()
    }
}

/// Object-safe form stored in the registry
pub(crate) trait ErasedGenerator: Send + Sync {
    /// Single value, boxed as `Output`
    fn generate_value(&self) -> Result<Box<dyn Any>, GeneratorError>;

    /// Sequence of values, boxed as `Vec<Output>`
    fn generate_sequence_value(&self) -> Result<Box<dyn Any>, GeneratorError>;

    /// Name of the produced type, for diagnostics
    fn output_name(&self) -> &'static str;
}

struct Erased<G>(G);

impl<G: ValueGenerator> ErasedGenerator for Erased<G> {
    fn generate_value(&self) -> Result<Box<dyn Any>, GeneratorError> {
        self.0.generate().map(|v| Box::new(v) as Box<dyn Any>)
    }

    fn generate_sequence_value(&self) -> Result<Box<dyn Any>, GeneratorError> {
        self.0
            .generate_sequence()
            .map(|v| Box::new(v) as Box<dyn Any>)
    }

    fn output_name(&self) -> &'static str {
        std::any::type_name::<G::Output>()
    }
}

/// Registry of value generators keyed by produced type
#[derive(Default)]
pub struct GeneratorRegistry {
    entries: HashMap<TypeId, Arc<dyn ErasedGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator under its output type
    ///
    /// Replaces any previous entry for the same type.
    pub fn register<G>(&mut self, generator: G)
    where
        G: ValueGenerator + 'static,
    {
        self.entries
            .insert(TypeId::of::<G::Output>(), Arc::new(Erased(generator)));
    }

    /// Check if a generator exists for `ty`
    #[inline]
    #[must_use]
    pub fn contains(&self, ty: TypeId) -> bool {
        self.entries.contains_key(&ty)
    }

    /// Typed convenience form of [`Self::contains`]
    #[inline]
    #[must_use]
    pub fn contains_type<V: 'static>(&self) -> bool {
        self.contains(TypeId::of::<V>())
    }

    /// Number of registered generators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no generators are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn lookup(&self, ty: TypeId) -> Option<Arc<dyn ErasedGenerator>> {
        self.entries.get(&ty).cloned()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|g| g.output_name()).collect();
        names.sort_unstable();
        f.debug_struct("GeneratorRegistry")
            .field("outputs", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i32);

    impl ValueGenerator for Fixed {
        type Output = i32;

        fn generate(&self) -> Result<i32, GeneratorError> {
            Ok(self.0)
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = GeneratorRegistry::new();
        assert!(registry.is_empty());

        registry.register(Fixed(7));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_type::<i32>());
        assert!(!registry.contains_type::<u32>());

        let generator = registry.lookup(TypeId::of::<i32>()).unwrap();
        let value = generator.generate_value().unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 7);
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = GeneratorRegistry::new();
        registry.register(Fixed(1));
        registry.register(Fixed(2));
        assert_eq!(registry.len(), 1);

        let generator = registry.lookup(TypeId::of::<i32>()).unwrap();
        let value = generator.generate_value().unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 2);
    }

    #[test]
    fn default_sequence_length() {
        let mut registry = GeneratorRegistry::new();
        registry.register(Fixed(5));

        let generator = registry.lookup(TypeId::of::<i32>()).unwrap();
        let seq = generator.generate_sequence_value().unwrap();
        let seq = seq.downcast::<Vec<i32>>().unwrap();
        assert_eq!(*seq, vec![5; DEFAULT_SEQUENCE_LEN]);
    }

    #[test]
    fn missing_entry_is_none() {
        let registry = GeneratorRegistry::new();
        assert!(registry.lookup(TypeId::of::<String>()).is_none());
    }
}
