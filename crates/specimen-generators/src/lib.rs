//! Specimen Generators
//!
//! Built-in value generators for every terminal type the core classifier
//! knows, plus the bootstrap that installs them into a
//! [`GeneratorRegistry`]. This crate is the registration layer standing in
//! for dynamic plugin discovery: callers populate a registry explicitly
//! before constructing anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use specimen_core::{DescriptorRegistry, Synthesizer};
//! use specimen_generators::builtin_registry;
//!
//! let mut synth = Synthesizer::new(builtin_registry(), DescriptorRegistry::new());
//! let n: u32 = synth.create();
//! let s: String = synth.create();
//! ```
//!
//! Registration order matters only for collisions: the registry keeps the
//! last entry per type, so register custom generators after
//! [`register_builtins`] to override the defaults.

mod decimal;
mod numeric;
mod temporal;
mod text;

// Re-exports
pub use decimal::RandomDecimal;
pub use numeric::{RandomPrimitive, SeededPrimitive};
pub use temporal::{RandomDateTime, RandomNaiveDate, RandomNaiveDateTime};
pub use text::RandomString;

use specimen_core::GeneratorRegistry;

/// Install the built-in generator set into `registry`
pub fn register_builtins(registry: &mut GeneratorRegistry) {
    registry.register(RandomPrimitive::<bool>::new());
    registry.register(RandomPrimitive::<char>::new());
    registry.register(RandomPrimitive::<i8>::new());
    registry.register(RandomPrimitive::<i16>::new());
    registry.register(RandomPrimitive::<i32>::new());
    registry.register(RandomPrimitive::<i64>::new());
    registry.register(RandomPrimitive::<i128>::new());
    registry.register(RandomPrimitive::<isize>::new());
    registry.register(RandomPrimitive::<u8>::new());
    registry.register(RandomPrimitive::<u16>::new());
    registry.register(RandomPrimitive::<u32>::new());
    registry.register(RandomPrimitive::<u64>::new());
    registry.register(RandomPrimitive::<u128>::new());
    registry.register(RandomPrimitive::<usize>::new());
    registry.register(RandomPrimitive::<f32>::new());
    registry.register(RandomPrimitive::<f64>::new());
    registry.register(RandomString::default());
    registry.register(RandomDecimal::default());
    registry.register(RandomDateTime::default());
    registry.register(RandomNaiveDate::default());
    registry.register(RandomNaiveDateTime::default());
}

/// Fresh registry holding exactly the built-in generator set
#[must_use]
pub fn builtin_registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    register_builtins(&mut registry);
    registry
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use specimen_core::is_terminal_type;

    #[test]
    fn builtins_cover_every_terminal_sample() {
        let registry = builtin_registry();

        assert!(registry.contains_type::<bool>());
        assert!(registry.contains_type::<char>());
        assert!(registry.contains_type::<i128>());
        assert!(registry.contains_type::<usize>());
        assert!(registry.contains_type::<f32>());
        assert!(registry.contains_type::<String>());
        assert!(registry.contains_type::<rust_decimal::Decimal>());
        assert!(registry.contains_type::<chrono::DateTime<chrono::Utc>>());
        assert!(registry.contains_type::<chrono::NaiveDate>());
        assert!(registry.contains_type::<chrono::NaiveDateTime>());
    }

    #[test]
    fn builtin_outputs_are_terminal() {
        // every built-in targets a type the classifier calls terminal
        assert!(is_terminal_type::<bool>());
        assert!(is_terminal_type::<String>());
        assert!(is_terminal_type::<rust_decimal::Decimal>());
        assert!(is_terminal_type::<chrono::NaiveDateTime>());
    }
}
