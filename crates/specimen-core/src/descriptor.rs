//! Type descriptors
//!
//! Rust has no runtime reflection, so every constructible type is
//! described once, up front, by a [`TypeDescriptor`]: its public
//! constructors (ordered parameter lists plus an invoke closure) and its
//! public members (fields and writable properties, unified as
//! [`MemberDescriptor`]s carrying accessor closures). The construction
//! engine only ever queries descriptors; it never inspects types itself.
//!
//! Member and parameter value types must be `Default + Clone + PartialEq`
//! so the engine can compare current values against type defaults and
//! retained constructor arguments. That is the cost of trading reflection
//! for closures captured at descriptor-build time.
//!
//! # Example
//!
//! ```rust,ignore
//! impl Describe for Point {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::of::<Point>()
//!             .constructor(ConstructorDescriptor::new(
//!                 vec![
//!                     ParamDescriptor::of::<i32>("x"),
//!                     ParamDescriptor::of::<i32>("y"),
//!                 ],
//!                 |mut args| {
//!                     let x = args.take::<i32>(0)?;
//!                     let y = args.take::<i32>(1)?;
//!                     Some(Box::new(Point::new(x, y)))
//!                 },
//!             ))
//!             .member(MemberDescriptor::field("x", |p: &Point| p.x, |p, v| p.x = v))
//!             .member(MemberDescriptor::field("y", |p: &Point| p.y, |p, v| p.y = v))
//!             .build()
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// A dynamically typed value travelling through the engine
pub type BoxedValue = Box<dyn Any>;

type DefaultFn = Box<dyn Fn() -> BoxedValue + Send + Sync>;

/// Types that can describe themselves for the construction engine
pub trait Describe: Sized + 'static {
    /// Build the descriptor for this type
    fn describe() -> TypeDescriptor;
}

/// Resolved constructor arguments handed to an invoke closure
///
/// Arguments arrive in declaration order; [`ArgList::take`] moves one out
/// by index, downcasting it to its declared type.
pub struct ArgList(Vec<Option<BoxedValue>>);

impl ArgList {
    fn new(values: Vec<BoxedValue>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    /// Move the argument at `index` out of the list
    ///
    /// Returns `None` if the index is out of bounds, the slot was already
    /// taken, or the value is not of type `V` (the value is put back in
    /// that last case).
    pub fn take<V: 'static>(&mut self, index: usize) -> Option<V> {
        let slot = self.0.get_mut(index)?;
        let boxed = slot.take()?;
        match boxed.downcast::<V>() {
            Ok(value) => Some(*value),
            Err(boxed) => {
                *slot = Some(boxed);
                None
            }
        }
    }

    /// Number of argument slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list has no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One constructor parameter: name, type identity and the closures the
/// engine needs to default and retain resolved values
pub struct ParamDescriptor {
    name: &'static str,
    ty: TypeId,
    ty_name: &'static str,
    element: Option<TypeId>,
    default_value: DefaultFn,
    clone_value: Box<dyn Fn(&dyn Any) -> Option<BoxedValue> + Send + Sync>,
}

impl ParamDescriptor {
    /// Describe a plain parameter of type `V`
    #[must_use]
    pub fn of<V>(name: &'static str) -> Self
    where
        V: Default + Clone + 'static,
    {
        Self {
            name,
            ty: TypeId::of::<V>(),
            ty_name: std::any::type_name::<V>(),
            element: None,
            default_value: Box::new(|| Box::new(V::default()) as BoxedValue),
            clone_value: Box::new(|value| {
                value
                    .downcast_ref::<V>()
                    .map(|v| Box::new(v.clone()) as BoxedValue)
            }),
        }
    }

    /// Describe a `Vec<E>` parameter resolved through the element type's
    /// `generate_sequence`
    #[must_use]
    pub fn sequence_of<E>(name: &'static str) -> Self
    where
        E: Clone + 'static,
    {
        Self {
            name,
            ty: TypeId::of::<Vec<E>>(),
            ty_name: std::any::type_name::<Vec<E>>(),
            element: Some(TypeId::of::<E>()),
            default_value: Box::new(|| Box::new(Vec::<E>::new()) as BoxedValue),
            clone_value: Box::new(|value| {
                value
                    .downcast_ref::<Vec<E>>()
                    .map(|v| Box::new(v.clone()) as BoxedValue)
            }),
        }
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter type identity
    #[inline]
    #[must_use]
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Parameter type name, for diagnostics
    #[inline]
    #[must_use]
    pub fn ty_name(&self) -> &'static str {
        self.ty_name
    }

    /// Element type for single-argument generic container parameters
    #[inline]
    #[must_use]
    pub fn element(&self) -> Option<TypeId> {
        self.element
    }

    pub(crate) fn default_value(&self) -> BoxedValue {
        (self.default_value)()
    }

    pub(crate) fn clone_value(&self, value: &dyn Any) -> Option<BoxedValue> {
        (self.clone_value)(value)
    }
}

impl std::fmt::Debug for ParamDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty_name)
            .finish()
    }
}

/// One public constructor: parameter descriptors plus an invoke closure
pub struct ConstructorDescriptor {
    params: Vec<ParamDescriptor>,
    invoke: Box<dyn Fn(ArgList) -> Option<BoxedValue> + Send + Sync>,
}

impl ConstructorDescriptor {
    /// Describe a constructor
    ///
    /// The invoke closure receives resolved arguments in the same order as
    /// `params` and returns the boxed instance, or `None` when an argument
    /// fails to downcast.
    pub fn new<F>(params: Vec<ParamDescriptor>, invoke: F) -> Self
    where
        F: Fn(ArgList) -> Option<BoxedValue> + Send + Sync + 'static,
    {
        Self {
            params,
            invoke: Box::new(invoke),
        }
    }

    /// Ordered parameter descriptors
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub(crate) fn invoke(&self, args: Vec<BoxedValue>) -> Option<BoxedValue> {
        (self.invoke)(ArgList::new(args))
    }
}

impl std::fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .finish()
    }
}

/// One public member (field or property) of a constructible type
///
/// Carries the accessor closures the engine needs to apply the
/// initialization heuristic and to assign generated values. Members
/// declared via [`MemberDescriptor::read_only`] are never assigned.
pub struct MemberDescriptor {
    name: &'static str,
    ty: TypeId,
    ty_name: &'static str,
    element: Option<TypeId>,
    writable: bool,
    current_is_default: Box<dyn Fn(&dyn Any) -> bool + Send + Sync>,
    current_equals: Box<dyn Fn(&dyn Any, &dyn Any) -> bool + Send + Sync>,
    assign: Box<dyn Fn(&mut dyn Any, BoxedValue) -> bool + Send + Sync>,
    clear: Box<dyn Fn(&mut dyn Any) + Send + Sync>,
}

impl MemberDescriptor {
    /// Describe a plain read/write member of type `V` on owner `T`
    #[must_use]
    pub fn field<T, V, G, S>(name: &'static str, get: G, set: S) -> Self
    where
        T: 'static,
        V: Default + Clone + PartialEq + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let set = Arc::new(set);
        let get_default = Arc::clone(&get);
        let get_equals = Arc::clone(&get);
        let set_clear = Arc::clone(&set);
        Self {
            name,
            ty: TypeId::of::<V>(),
            ty_name: std::any::type_name::<V>(),
            element: None,
            writable: true,
            current_is_default: Box::new(move |owner| {
                owner
                    .downcast_ref::<T>()
                    .map_or(true, |t| get_default(t) == V::default())
            }),
            current_equals: Box::new(move |owner, candidate| {
                match (owner.downcast_ref::<T>(), candidate.downcast_ref::<V>()) {
                    (Some(t), Some(v)) => get_equals(t) == *v,
                    _ => false,
                }
            }),
            assign: Box::new(move |owner, value| {
                match (owner.downcast_mut::<T>(), value.downcast::<V>()) {
                    (Some(t), Ok(v)) => {
                        set(t, *v);
                        true
                    }
                    _ => false,
                }
            }),
            clear: Box::new(move |owner| {
                if let Some(t) = owner.downcast_mut::<T>() {
                    set_clear(t, V::default());
                }
            }),
        }
    }

    /// Describe an optional member holding `Option<V>` on owner `T`
    ///
    /// The declared type is `V` (what gets generated or recursively
    /// constructed); `None` counts as the default value. This is how
    /// nullable members, including self-referential ones, are modelled.
    #[must_use]
    pub fn optional<T, V, G, S>(name: &'static str, get: G, set: S) -> Self
    where
        T: 'static,
        V: Clone + PartialEq + 'static,
        G: Fn(&T) -> Option<V> + Send + Sync + 'static,
        S: Fn(&mut T, Option<V>) + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let set = Arc::new(set);
        let get_default = Arc::clone(&get);
        let get_equals = Arc::clone(&get);
        let set_clear = Arc::clone(&set);
        Self {
            name,
            ty: TypeId::of::<V>(),
            ty_name: std::any::type_name::<V>(),
            element: None,
            writable: true,
            current_is_default: Box::new(move |owner| {
                owner.downcast_ref::<T>().map_or(true, |t| get_default(t).is_none())
            }),
            current_equals: Box::new(move |owner, candidate| {
                match (owner.downcast_ref::<T>(), candidate.downcast_ref::<V>()) {
                    (Some(t), Some(v)) => get_equals(t).as_ref() == Some(v),
                    _ => false,
                }
            }),
            assign: Box::new(move |owner, value| {
                match (owner.downcast_mut::<T>(), value.downcast::<V>()) {
                    (Some(t), Ok(v)) => {
                        set(t, Some(*v));
                        true
                    }
                    _ => false,
                }
            }),
            clear: Box::new(move |owner| {
                if let Some(t) = owner.downcast_mut::<T>() {
                    set_clear(t, None);
                }
            }),
        }
    }

    /// Describe a `Vec<E>` member resolved through the element type's
    /// `generate_sequence`
    #[must_use]
    pub fn sequence<T, E, G, S>(name: &'static str, get: G, set: S) -> Self
    where
        T: 'static,
        E: Clone + PartialEq + 'static,
        G: Fn(&T) -> Vec<E> + Send + Sync + 'static,
        S: Fn(&mut T, Vec<E>) + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let set = Arc::new(set);
        let get_default = Arc::clone(&get);
        let get_equals = Arc::clone(&get);
        let set_clear = Arc::clone(&set);
        Self {
            name,
            ty: TypeId::of::<Vec<E>>(),
            ty_name: std::any::type_name::<Vec<E>>(),
            element: Some(TypeId::of::<E>()),
            writable: true,
            current_is_default: Box::new(move |owner| {
                owner.downcast_ref::<T>().map_or(true, |t| get_default(t).is_empty())
            }),
            current_equals: Box::new(move |owner, candidate| {
                match (owner.downcast_ref::<T>(), candidate.downcast_ref::<Vec<E>>()) {
                    (Some(t), Some(v)) => get_equals(t) == *v,
                    _ => false,
                }
            }),
            assign: Box::new(move |owner, value| {
                match (owner.downcast_mut::<T>(), value.downcast::<Vec<E>>()) {
                    (Some(t), Ok(v)) => {
                        set(t, *v);
                        true
                    }
                    _ => false,
                }
            }),
            clear: Box::new(move |owner| {
                if let Some(t) = owner.downcast_mut::<T>() {
                    set_clear(t, Vec::new());
                }
            }),
        }
    }

    /// Describe a member with no public setter
    ///
    /// The engine skips generation for it entirely; it exists so the
    /// descriptor still lists the full public surface of the type.
    #[must_use]
    pub fn read_only<T, V, G>(name: &'static str, get: G) -> Self
    where
        T: 'static,
        V: Default + Clone + PartialEq + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let get_equals = Arc::clone(&get);
        Self {
            name,
            ty: TypeId::of::<V>(),
            ty_name: std::any::type_name::<V>(),
            element: None,
            writable: false,
            current_is_default: Box::new(move |owner| {
                owner.downcast_ref::<T>().map_or(true, |t| get(t) == V::default())
            }),
            current_equals: Box::new(move |owner, candidate| {
                match (owner.downcast_ref::<T>(), candidate.downcast_ref::<V>()) {
                    (Some(t), Some(v)) => get_equals(t) == *v,
                    _ => false,
                }
            }),
            assign: Box::new(|_, _| false),
            clear: Box::new(|_| {}),
        }
    }

    /// Member name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member type identity (the inner type for optional members)
    #[inline]
    #[must_use]
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Member type name, for diagnostics
    #[inline]
    #[must_use]
    pub fn ty_name(&self) -> &'static str {
        self.ty_name
    }

    /// Element type for single-argument generic container members
    #[inline]
    #[must_use]
    pub fn element(&self) -> Option<TypeId> {
        self.element
    }

    /// True when the member has a public setter
    #[inline]
    #[must_use]
    pub fn writable(&self) -> bool {
        self.writable
    }

    pub(crate) fn current_is_default(&self, owner: &dyn Any) -> bool {
        (self.current_is_default)(owner)
    }

    pub(crate) fn current_equals(&self, owner: &dyn Any, candidate: &dyn Any) -> bool {
        (self.current_equals)(owner, candidate)
    }

    pub(crate) fn assign(&self, owner: &mut dyn Any, value: BoxedValue) -> bool {
        (self.assign)(owner, value)
    }

    pub(crate) fn clear(&self, owner: &mut dyn Any) {
        (self.clear)(owner)
    }
}

impl std::fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty_name)
            .field("writable", &self.writable)
            .finish()
    }
}

/// Runtime-queryable description of one constructible type
///
/// Immutable once built; see [`TypeDescriptor::of`] for the builder.
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    constructors: Vec<ConstructorDescriptor>,
    members: Vec<MemberDescriptor>,
    implicit_default: Option<DefaultFn>,
}

impl TypeDescriptor {
    /// Start describing type `T`
    #[must_use]
    pub fn of<T: 'static>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            constructors: Vec::new(),
            members: Vec::new(),
            implicit_default: None,
            _marker: PhantomData,
        }
    }

    /// Identity of the described type
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Name of the described type
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Public constructors, in declaration order
    #[inline]
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Public members, in declaration order
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// True for value-semantics types (always default-constructible even
    /// with zero declared constructors)
    #[inline]
    #[must_use]
    pub fn has_implicit_default(&self) -> bool {
        self.implicit_default.is_some()
    }

    pub(crate) fn implicit_default(&self) -> Option<BoxedValue> {
        self.implicit_default.as_ref().map(|f| f())
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("constructors", &self.constructors)
            .field("members", &self.members)
            .field("value_semantics", &self.implicit_default.is_some())
            .finish()
    }
}

/// Builder returned by [`TypeDescriptor::of`]
pub struct TypeDescriptorBuilder<T> {
    constructors: Vec<ConstructorDescriptor>,
    members: Vec<MemberDescriptor>,
    implicit_default: Option<DefaultFn>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> TypeDescriptorBuilder<T> {
    /// Add a public constructor
    #[must_use]
    pub fn constructor(mut self, ctor: ConstructorDescriptor) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a public member
    #[must_use]
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Mark `T` as a value-semantics type: materializable through its
    /// `Default` even when no constructors are declared
    #[must_use]
    pub fn value_semantics(mut self) -> Self
    where
        T: Default,
    {
        self.implicit_default = Some(Box::new(|| Box::new(T::default()) as BoxedValue));
        self
    }

    /// Finish the descriptor
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            constructors: self.constructors,
            members: self.members,
            implicit_default: self.implicit_default,
        }
    }
}

/// Registry of type descriptors keyed by type identity
///
/// Populated by [`DescriptorRegistry::register`] for `Describe` types or
/// [`DescriptorRegistry::insert`] for descriptors built by hand. At most
/// one descriptor per type; last registration wins.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    entries: HashMap<TypeId, Arc<TypeDescriptor>>,
}

impl DescriptorRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the descriptor of a [`Describe`] type
    pub fn register<T: Describe>(&mut self) {
        let descriptor = T::describe();
        debug_assert_eq!(
            descriptor.id(),
            TypeId::of::<T>(),
            "descriptor describes a different type"
        );
        self.insert(descriptor);
    }

    /// Insert a descriptor built by hand
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        self.entries.insert(descriptor.id(), Arc::new(descriptor));
    }

    /// Check if a descriptor exists for `ty`
    #[inline]
    #[must_use]
    pub fn contains(&self, ty: TypeId) -> bool {
        self.entries.contains_key(&ty)
    }

    /// Number of registered descriptors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no descriptors are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn lookup(&self, ty: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(&ty).cloned()
    }
}
