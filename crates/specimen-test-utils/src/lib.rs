//! Testing utilities for the specimen workspace
//!
//! Shared fixture types with `Describe` implementations, plus
//! deterministic generators (fixed, counting, failing) for exercising the
//! engine's degradation paths.

#![allow(missing_docs)]

use specimen_core::{
    ConstructorDescriptor, Describe, DescriptorRegistry, GeneratorError, MemberDescriptor,
    ParamDescriptor, TypeDescriptor, ValueGenerator,
};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Two-field composite with a single two-parameter constructor.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Describe for Point {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Point>()
            .constructor(ConstructorDescriptor::new(
                vec![
                    ParamDescriptor::of::<i32>("x"),
                    ParamDescriptor::of::<i32>("y"),
                ],
                |mut args| {
                    let x = args.take::<i32>(0)?;
                    let y = args.take::<i32>(1)?;
                    Some(Box::new(Point::new(x, y)))
                },
            ))
            .member(MemberDescriptor::field("x", |p: &Point| p.x, |p, v| p.x = v))
            .member(MemberDescriptor::field("y", |p: &Point| p.y, |p, v| p.y = v))
            .build()
    }
}

/// Composite with two constructors of different arity; the wider one
/// derives `area`, so the constructed value reveals which was invoked.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
    pub area: u64,
}

impl Rect {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            area: u64::from(width) * u64::from(height),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Describe for Rect {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Rect>()
            .constructor(ConstructorDescriptor::new(
                vec![
                    ParamDescriptor::of::<u32>("width"),
                    ParamDescriptor::of::<u32>("height"),
                ],
                |mut args| {
                    let width = args.take::<u32>(0)?;
                    let height = args.take::<u32>(1)?;
                    Some(Box::new(Rect::new(width, height)))
                },
            ))
            .constructor(ConstructorDescriptor::new(vec![], |_| {
                Some(Box::new(Rect::empty()))
            }))
            .member(MemberDescriptor::field(
                "width",
                |r: &Rect| r.width,
                |r, v| r.width = v,
            ))
            .member(MemberDescriptor::field(
                "height",
                |r: &Rect| r.height,
                |r, v| r.height = v,
            ))
            .member(MemberDescriptor::field(
                "area",
                |r: &Rect| r.area,
                |r, v| r.area = v,
            ))
            .build()
    }
}

/// Self-referential composite: a linked-list node.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub next: Option<Box<Node>>,
}

impl Node {
    pub fn new() -> Self {
        Self { next: None }
    }

    /// Number of real nodes in the chain, counting `self`.
    pub fn chain_len(&self) -> usize {
        1 + self.next.as_deref().map_or(0, Node::chain_len)
    }
}

impl Describe for Node {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Node>()
            .constructor(ConstructorDescriptor::new(vec![], |_| {
                Some(Box::new(Node::new()))
            }))
            .member(MemberDescriptor::optional(
                "next",
                |n: &Node| n.next.as_deref().cloned(),
                |n, v: Option<Node>| n.next = v.map(Box::new),
            ))
            .build()
    }
}

/// Nested composite used as a member of [`Customer`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip: u32,
}

impl Address {
    pub fn new(street: String, zip: u32) -> Self {
        Self { street, zip }
    }
}

impl Describe for Address {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Address>()
            .constructor(ConstructorDescriptor::new(
                vec![
                    ParamDescriptor::of::<String>("street"),
                    ParamDescriptor::of::<u32>("zip"),
                ],
                |mut args| {
                    let street = args.take::<String>(0)?;
                    let zip = args.take::<u32>(1)?;
                    Some(Box::new(Address::new(street, zip)))
                },
            ))
            .member(MemberDescriptor::field(
                "street",
                |a: &Address| a.street.clone(),
                |a, v| a.street = v,
            ))
            .member(MemberDescriptor::field("zip", |a: &Address| a.zip, |a, v| a.zip = v))
            .build()
    }
}

/// Composite mixing constructor-set members, a nested composite and a
/// container member.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub age: u32,
    pub address: Address,
    pub orders: Vec<i64>,
}

impl Customer {
    pub fn new(name: String, age: u32) -> Self {
        Self {
            name,
            age,
            address: Address::default(),
            orders: Vec::new(),
        }
    }
}

impl Describe for Customer {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Customer>()
            .constructor(ConstructorDescriptor::new(
                vec![
                    ParamDescriptor::of::<String>("name"),
                    ParamDescriptor::of::<u32>("age"),
                ],
                |mut args| {
                    let name = args.take::<String>(0)?;
                    let age = args.take::<u32>(1)?;
                    Some(Box::new(Customer::new(name, age)))
                },
            ))
            .member(MemberDescriptor::field(
                "name",
                |c: &Customer| c.name.clone(),
                |c, v| c.name = v,
            ))
            .member(MemberDescriptor::field(
                "age",
                |c: &Customer| c.age,
                |c, v| c.age = v,
            ))
            .member(MemberDescriptor::field(
                "address",
                |c: &Customer| c.address.clone(),
                |c, v| c.address = v,
            ))
            .member(MemberDescriptor::sequence(
                "orders",
                |c: &Customer| c.orders.clone(),
                |c, v| c.orders = v,
            ))
            .build()
    }
}

/// Composite with zero public constructors and no value semantics;
/// construction is impossible and must degrade to default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Orphan {
    pub id: u64,
}

impl Describe for Orphan {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Orphan>()
            .member(MemberDescriptor::field("id", |o: &Orphan| o.id, |o, v| o.id = v))
            .build()
    }
}

/// Value-semantics composite: zero constructors, materialized through its
/// implicit default, members then generator-populated.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Gauge {
    pub level: f64,
    pub label: String,
}

impl Describe for Gauge {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Gauge>()
            .value_semantics()
            .member(MemberDescriptor::field(
                "level",
                |g: &Gauge| g.level,
                |g, v| g.level = v,
            ))
            .member(MemberDescriptor::field(
                "label",
                |g: &Gauge| g.label.clone(),
                |g, v| g.label = v,
            ))
            .build()
    }
}

/// Composite with a read-only member set by its constructor.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tagged {
    pub value: i32,
    tag: String,
}

impl Tagged {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            tag: format!("#{value}"),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Describe for Tagged {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Tagged>()
            .constructor(ConstructorDescriptor::new(
                vec![ParamDescriptor::of::<i32>("value")],
                |mut args| {
                    let value = args.take::<i32>(0)?;
                    Some(Box::new(Tagged::new(value)))
                },
            ))
            .member(MemberDescriptor::field(
                "value",
                |t: &Tagged| t.value,
                |t, v| t.value = v,
            ))
            .member(MemberDescriptor::read_only("tag", |t: &Tagged| t.tag.clone()))
            .build()
    }
}

/// Descriptor registry covering every fixture type in this crate.
pub fn fixture_descriptors() -> DescriptorRegistry {
    let mut registry = DescriptorRegistry::new();
    registry.register::<Point>();
    registry.register::<Rect>();
    registry.register::<Node>();
    registry.register::<Address>();
    registry.register::<Customer>();
    registry.register::<Orphan>();
    registry.register::<Gauge>();
    registry.register::<Tagged>();
    registry
}

/// Generator returning a fixed value on every call.
#[derive(Debug, Clone)]
pub struct FixedValue<V>(pub V);

impl<V> ValueGenerator for FixedValue<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Output = V;

    fn generate(&self) -> Result<V, GeneratorError> {
        Ok(self.0.clone())
    }
}

/// Generator that always fails, for exercising degradation paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingGenerator<V>(PhantomData<V>);

impl<V> FailingGenerator<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V> ValueGenerator for FailingGenerator<V>
where
    V: Send + Sync + 'static,
{
    type Output = V;

    fn generate(&self) -> Result<V, GeneratorError> {
        Err(GeneratorError::failed("configured to fail"))
    }
}

/// Fixed `i32` generator that counts how many times it is invoked.
#[derive(Debug)]
pub struct CountingInt {
    value: i32,
    calls: Arc<AtomicUsize>,
}

impl CountingInt {
    /// Returns the generator and a shared handle to its call counter.
    pub fn new(value: i32) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                value,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl ValueGenerator for CountingInt {
    type Output = i32;

    fn generate(&self) -> Result<i32, GeneratorError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_descriptors_cover_all_types() {
        let registry = fixture_descriptors();
        assert_eq!(registry.len(), 8);
        assert!(registry.contains(std::any::TypeId::of::<Point>()));
        assert!(registry.contains(std::any::TypeId::of::<Tagged>()));
    }

    #[test]
    fn rect_wider_constructor_derives_area() {
        let rect = Rect::new(6, 7);
        assert_eq!(rect.area, 42);
    }

    #[test]
    fn node_chain_len() {
        let chain = Node {
            next: Some(Box::new(Node {
                next: Some(Box::new(Node::new())),
            })),
        };
        assert_eq!(chain.chain_len(), 3);
    }

    #[test]
    fn counting_int_counts() {
        let (generator, calls) = CountingInt::new(4);
        assert_eq!(generator.generate().unwrap(), 4);
        assert_eq!(generator.generate().unwrap(), 4);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failing_generator_fails() {
        let generator = FailingGenerator::<i32>::new();
        assert!(generator.generate().is_err());
    }
}
