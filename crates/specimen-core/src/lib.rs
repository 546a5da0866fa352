//! Specimen Core
//!
//! Recursive object-graph construction for test fixtures: ask for a type,
//! get back a fully populated instance with every constructor parameter
//! and member resolved through type-registered value generators.
//!
//! # Core Concepts
//!
//! - [`Synthesizer`]: the construction engine and public entry point
//! - [`ValueGenerator`] / [`GeneratorRegistry`]: the capability producing
//!   values for terminal types, keyed by type identity
//! - [`TypeDescriptor`] / [`Describe`] / [`DescriptorRegistry`]: explicit
//!   per-type descriptions replacing runtime reflection
//! - [`ConstructionContext`]: the circular dependency guard
//! - [`is_terminal`]: the terminal/composite classifier
//!
//! # Example
//!
//! ```rust,ignore
//! use specimen_core::{DescriptorRegistry, Synthesizer};
//!
//! let mut descriptors = DescriptorRegistry::new();
//! descriptors.register::<Point>();
//!
//! let mut synth = Synthesizer::new(specimen_generators::builtin_registry(), descriptors);
//! let point: Point = synth.create();
//! ```
//!
//! Construction is best-effort by design: failures never surface from
//! [`Synthesizer::create`]; unresolvable subtrees degrade to defaults.

// Core modules
mod classify;
mod context;
mod descriptor;
mod engine;
mod error;
mod registry;

// Re-exports
pub use classify::{is_terminal, is_terminal_type};
pub use context::ConstructionContext;
pub use descriptor::{
    ArgList, BoxedValue, ConstructorDescriptor, Describe, DescriptorRegistry, MemberDescriptor,
    ParamDescriptor, TypeDescriptor, TypeDescriptorBuilder,
};
pub use engine::{is_considered_initialized, Synthesizer};
pub use error::GeneratorError;
pub use registry::{GeneratorRegistry, ValueGenerator, DEFAULT_SEQUENCE_LEN};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
