//! Construction engine
//!
//! [`Synthesizer`] drives the recursive construction of object graphs:
//! terminal types go straight to the generator registry; composite types
//! get a constructor selected and invoked, then their remaining members
//! populated, all under the circular dependency guard.
//!
//! Failure semantics: construction never surfaces an error. Every
//! unresolvable path (missing descriptor, no usable constructor, depth
//! exceeded, generator failure) degrades that subtree to its default
//! value, and the engine emits a `tracing` event naming the reason.

use crate::classify;
use crate::context::ConstructionContext;
use crate::descriptor::{
    BoxedValue, ConstructorDescriptor, DescriptorRegistry, MemberDescriptor, TypeDescriptor,
};
use crate::registry::{ErasedGenerator, GeneratorRegistry};
use std::any::{Any, TypeId};
use tracing::{debug, trace};

/// Recursive object-graph synthesizer
///
/// Owns the generator and descriptor registries plus the per-instance
/// construction context. `create` takes `&mut self`, so one synthesizer
/// serves one caller at a time; use one instance per thread.
#[derive(Debug)]
pub struct Synthesizer {
    generators: GeneratorRegistry,
    descriptors: DescriptorRegistry,
    context: ConstructionContext,
}

impl Synthesizer {
    /// Create a synthesizer over the given registries
    #[must_use]
    pub fn new(generators: GeneratorRegistry, descriptors: DescriptorRegistry) -> Self {
        Self {
            generators,
            descriptors,
            context: ConstructionContext::new(),
        }
    }

    /// Maximum number of times a type may repeat on the construction path
    /// before degrading to default (0 = no self-referential recursion)
    #[inline]
    #[must_use]
    pub fn max_circular_depth(&self) -> usize {
        self.context.max_circular_depth()
    }

    /// Set the maximum circular dependency depth
    #[inline]
    pub fn set_max_circular_depth(&mut self, depth: usize) {
        self.context.set_max_circular_depth(depth);
    }

    /// Generator registry, for late registrations
    #[inline]
    pub fn generators_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.generators
    }

    /// Descriptor registry, for late registrations
    #[inline]
    pub fn descriptors_mut(&mut self) -> &mut DescriptorRegistry {
        &mut self.descriptors
    }

    /// Construct a fully populated instance of `T`
    ///
    /// Infallible by design: any subtree that cannot be resolved comes
    /// back as its default value, and at worst the whole result is
    /// `T::default()`.
    pub fn create<T: Default + 'static>(&mut self) -> T {
        let produced = self.create_dynamic(TypeId::of::<T>(), std::any::type_name::<T>());
        debug_assert!(self.context.is_idle(), "construction stack not drained");
        match produced {
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => *value,
                Err(_) => {
                    debug!(
                        target_type = std::any::type_name::<T>(),
                        "constructed value has unexpected type, degrading to default"
                    );
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    /// Construct a value for `ty`, or `None` to signal degrade-to-default
    fn create_dynamic(&mut self, ty: TypeId, ty_name: &str) -> Option<BoxedValue> {
        if classify::is_terminal(ty) {
            return self.generate_terminal(ty, ty_name);
        }

        let descriptor = match self.descriptors.lookup(ty) {
            Some(descriptor) => descriptor,
            None => {
                debug!(target_type = ty_name, "no descriptor, degrading to default");
                return None;
            }
        };

        if descriptor.constructors().is_empty() && !descriptor.has_implicit_default() {
            debug!(
                target_type = ty_name,
                "no public constructor and no value semantics, degrading to default"
            );
            return None;
        }

        let repeats = self.context.occurrences(ty);
        if repeats > self.context.max_circular_depth() {
            debug!(
                target_type = ty_name,
                repeats,
                max = self.context.max_circular_depth(),
                "circular dependency depth exceeded, degrading to default"
            );
            return None;
        }

        self.context.enter(ty);
        let instance = self.construct(&descriptor);
        self.context.leave(ty);
        instance
    }

    fn generate_terminal(&self, ty: TypeId, ty_name: &str) -> Option<BoxedValue> {
        match self.generators.lookup(ty) {
            Some(generator) => match generator.generate_value() {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!(
                        target_type = ty_name,
                        error = %err,
                        "terminal generator failed, degrading to default"
                    );
                    None
                }
            },
            None => {
                debug!(
                    target_type = ty_name,
                    "no generator for terminal type, degrading to default"
                );
                None
            }
        }
    }

    fn construct(&mut self, descriptor: &TypeDescriptor) -> Option<BoxedValue> {
        let mut invocation: Option<(&ConstructorDescriptor, Vec<BoxedValue>)> = None;

        let mut instance = if descriptor.constructors().is_empty() {
            // Value semantics with zero declared constructors
            descriptor.implicit_default()?
        } else {
            // Explicit design choice: invoke the single constructor with
            // the most parameters, exactly once.
            let ctor = descriptor
                .constructors()
                .iter()
                .max_by_key(|c| c.params().len())?;
            let args = self.resolve_params(ctor);
            let retained: Vec<BoxedValue> = ctor
                .params()
                .iter()
                .zip(&args)
                .map(|(param, arg)| {
                    param
                        .clone_value(arg.as_ref())
                        .unwrap_or_else(|| param.default_value())
                })
                .collect();
            match ctor.invoke(args) {
                Some(built) => {
                    invocation = Some((ctor, retained));
                    built
                }
                None => {
                    debug!(
                        target_type = descriptor.name(),
                        "constructor invocation failed, degrading to default"
                    );
                    return None;
                }
            }
        };

        let ctor_context = invocation
            .as_ref()
            .map(|(ctor, retained)| (*ctor, retained.as_slice()));
        self.populate_members(descriptor, instance.as_mut(), ctor_context);
        Some(instance)
    }

    fn resolve_params(&mut self, ctor: &ConstructorDescriptor) -> Vec<BoxedValue> {
        ctor.params()
            .iter()
            .map(|param| {
                self.resolve_value(param.ty(), param.ty_name(), param.element())
                    .unwrap_or_else(|| {
                        trace!(param = param.name(), "parameter degraded to default");
                        param.default_value()
                    })
            })
            .collect()
    }

    /// Shared resolution path for constructor parameters and members
    ///
    /// Registry first for any type; a generator *failure* degrades
    /// immediately, while a registry *miss* on a composite type falls back
    /// to recursive construction.
    fn resolve_value(
        &mut self,
        ty: TypeId,
        ty_name: &str,
        element: Option<TypeId>,
    ) -> Option<BoxedValue> {
        if let Some(element) = element {
            return match self.generators.lookup(element) {
                Some(generator) => match generator.generate_sequence_value() {
                    Ok(value) => Some(value),
                    Err(err) => {
                        debug!(
                            target_type = ty_name,
                            error = %err,
                            "sequence generator failed, degrading to default"
                        );
                        None
                    }
                },
                None => {
                    debug!(
                        target_type = ty_name,
                        "no generator for element type, degrading to empty container"
                    );
                    None
                }
            };
        }

        if let Some(generator) = self.generators.lookup(ty) {
            return match generator.generate_value() {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!(
                        target_type = ty_name,
                        error = %err,
                        "generator failed, degrading to default"
                    );
                    None
                }
            };
        }

        if classify::is_terminal(ty) {
            debug!(
                target_type = ty_name,
                "no generator for terminal type, degrading to default"
            );
            return None;
        }

        self.create_dynamic(ty, ty_name)
    }

    fn populate_members(
        &mut self,
        descriptor: &TypeDescriptor,
        instance: &mut dyn Any,
        ctor: Option<(&ConstructorDescriptor, &[BoxedValue])>,
    ) {
        for member in descriptor.members() {
            if !member.writable() {
                trace!(member = member.name(), "skipping read-only member");
                continue;
            }
            if is_considered_initialized(member, instance, ctor) {
                trace!(member = member.name(), "member already initialized");
                continue;
            }
            match self.resolve_value(member.ty(), member.ty_name(), member.element()) {
                Some(value) => {
                    if !member.assign(instance, value) {
                        debug!(
                            member = member.name(),
                            "member assignment rejected value, clearing to default"
                        );
                        member.clear(instance);
                    }
                }
                None => member.clear(instance),
            }
        }
    }
}

/// Decide whether a member already holds a meaningful value
///
/// Heuristic, and deliberately approximate: a member counts as
/// initialized when its current value differs from the type's default
/// (whatever put it there), or when some constructor parameter with the
/// same name and type resolved to a value equal to the member's current
/// one. It cannot distinguish "a generator happened to produce the
/// default" from "truly unset".
#[must_use]
pub fn is_considered_initialized(
    member: &MemberDescriptor,
    instance: &dyn Any,
    ctor: Option<(&ConstructorDescriptor, &[BoxedValue])>,
) -> bool {
    if !member.current_is_default(instance) {
        return true;
    }
    if let Some((ctor, args)) = ctor {
        for (param, arg) in ctor.params().iter().zip(args) {
            if param.name() == member.name()
                && param.ty() == member.ty()
                && member.current_equals(instance, arg.as_ref())
            {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParamDescriptor, TypeDescriptor};
    use crate::error::GeneratorError;
    use crate::registry::ValueGenerator;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Wrapper {
        value: i32,
    }

    struct Fixed(i32);

    impl ValueGenerator for Fixed {
        type Output = i32;

        fn generate(&self) -> Result<i32, GeneratorError> {
            Ok(self.0)
        }
    }

    fn wrapper_descriptors() -> DescriptorRegistry {
        let mut descriptors = DescriptorRegistry::new();
        descriptors.insert(
            TypeDescriptor::of::<Wrapper>()
                .constructor(ConstructorDescriptor::new(
                    vec![ParamDescriptor::of::<i32>("value")],
                    |mut args| {
                        let value = args.take::<i32>(0)?;
                        Some(Box::new(Wrapper { value }))
                    },
                ))
                .member(MemberDescriptor::field(
                    "value",
                    |w: &Wrapper| w.value,
                    |w, v| w.value = v,
                ))
                .build(),
        );
        descriptors
    }

    #[test]
    fn terminal_with_generator() {
        let mut generators = GeneratorRegistry::new();
        generators.register(Fixed(42));
        let mut synth = Synthesizer::new(generators, DescriptorRegistry::new());
        assert_eq!(synth.create::<i32>(), 42);
    }

    #[test]
    fn terminal_without_generator_defaults() {
        let mut synth = Synthesizer::new(GeneratorRegistry::new(), DescriptorRegistry::new());
        assert_eq!(synth.create::<i32>(), 0);
        assert_eq!(synth.create::<String>(), String::new());
    }

    #[test]
    fn composite_without_descriptor_defaults() {
        let mut synth = Synthesizer::new(GeneratorRegistry::new(), DescriptorRegistry::new());
        assert_eq!(synth.create::<Wrapper>(), Wrapper::default());
    }

    #[test]
    fn composite_constructed_through_descriptor() {
        let mut generators = GeneratorRegistry::new();
        generators.register(Fixed(7));
        let mut synth = Synthesizer::new(generators, wrapper_descriptors());
        assert_eq!(synth.create::<Wrapper>(), Wrapper { value: 7 });
    }

    #[test]
    fn late_registration_through_accessors() {
        let mut synth = Synthesizer::new(GeneratorRegistry::new(), DescriptorRegistry::new());
        synth.generators_mut().register(Fixed(3));
        assert_eq!(synth.create::<i32>(), 3);
    }

    #[test]
    fn heuristic_non_default_counts_as_initialized() {
        let descriptors = wrapper_descriptors();
        let descriptor = descriptors.lookup(TypeId::of::<Wrapper>()).unwrap();
        let member = &descriptor.members()[0];

        let touched: Box<dyn Any> = Box::new(Wrapper { value: 5 });
        assert!(is_considered_initialized(member, touched.as_ref(), None));

        let untouched: Box<dyn Any> = Box::new(Wrapper::default());
        assert!(!is_considered_initialized(member, untouched.as_ref(), None));
    }

    #[test]
    fn heuristic_matching_ctor_param_counts_as_initialized() {
        let descriptors = wrapper_descriptors();
        let descriptor = descriptors.lookup(TypeId::of::<Wrapper>()).unwrap();
        let member = &descriptor.members()[0];
        let ctor = &descriptor.constructors()[0];

        // ctor set value to 0 and the retained arg is 0: default-valued
        // but still recognized as constructor-initialized
        let instance: Box<dyn Any> = Box::new(Wrapper { value: 0 });
        let args: Vec<BoxedValue> = vec![Box::new(0i32)];
        assert!(is_considered_initialized(
            member,
            instance.as_ref(),
            Some((ctor, args.as_slice()))
        ));

        // retained arg differs from current value: not a match
        let args: Vec<BoxedValue> = vec![Box::new(9i32)];
        assert!(!is_considered_initialized(
            member,
            instance.as_ref(),
            Some((ctor, args.as_slice()))
        ));
    }
}
