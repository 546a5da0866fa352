//! End-to-end construction behavior over the shared fixture types

use pretty_assertions::assert_eq;
use specimen_core::{GeneratorRegistry, Synthesizer, DEFAULT_SEQUENCE_LEN};
use specimen_generators::builtin_registry;
use specimen_test_utils::{
    fixture_descriptors, Address, CountingInt, Customer, FailingGenerator, FixedValue, Gauge,
    Orphan, Point, Rect, Tagged,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn synthesizer_with(registry: GeneratorRegistry) -> Synthesizer {
    Synthesizer::new(registry, fixture_descriptors())
}

#[test]
fn test_terminal_types_with_builtins() {
    init_tracing();
    let mut synth = Synthesizer::new(builtin_registry(), fixture_descriptors());

    // never panics, always yields a value of the requested type
    let _: bool = synth.create();
    let _: i64 = synth.create();
    let _: u128 = synth.create();
    let _: f64 = synth.create();
    let _: rust_decimal::Decimal = synth.create();
    let _: chrono::NaiveDate = synth.create();

    let s: String = synth.create();
    assert!((4..=16).contains(&s.len()));
}

#[test]
fn test_terminal_without_generator_degrades_to_default() {
    let mut synth = synthesizer_with(GeneratorRegistry::new());
    assert_eq!(synth.create::<i32>(), 0);
    assert_eq!(synth.create::<String>(), String::new());
}

#[test]
fn test_point_constructor_params_not_regenerated() {
    init_tracing();
    let (generator, calls) = CountingInt::new(0);
    let mut registry = GeneratorRegistry::new();
    registry.register(generator);

    let mut synth = synthesizer_with(registry);
    let point: Point = synth.create();

    assert_eq!(point, Point { x: 0, y: 0 });
    // one draw per constructor parameter; the member pass recognizes both
    // fields as constructor-initialized even though they hold defaults
    assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 2);
}

#[test]
fn test_rect_uses_widest_constructor() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue(7u32));

    let mut synth = synthesizer_with(registry);
    let rect: Rect = synth.create();

    // area proves the two-parameter constructor ran (and ran once)
    assert_eq!(
        rect,
        Rect {
            width: 7,
            height: 7,
            area: 49
        }
    );
}

#[test]
fn test_zero_constructor_type_degrades_to_default() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue(5u64));

    let mut synth = synthesizer_with(registry);
    let orphan: Orphan = synth.create();

    // construction is impossible, so even the id generator never runs
    assert_eq!(orphan, Orphan::default());
}

#[test]
fn test_value_semantics_type_is_member_populated() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue(1.5f64));
    registry.register(FixedValue("lbl".to_string()));

    let mut synth = synthesizer_with(registry);
    let gauge: Gauge = synth.create();

    assert_eq!(
        gauge,
        Gauge {
            level: 1.5,
            label: "lbl".to_string()
        }
    );
}

#[test]
fn test_customer_fully_populated() {
    init_tracing();
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue("fixed".to_string()));
    registry.register(FixedValue(9u32));
    registry.register(FixedValue(5i64));

    let mut synth = synthesizer_with(registry);
    let customer: Customer = synth.create();

    assert_eq!(customer.name, "fixed");
    assert_eq!(customer.age, 9);
    // nested composite resolved by recursive construction
    assert_eq!(customer.address, Address::new("fixed".to_string(), 9));
    // container member resolved through the element generator
    assert_eq!(customer.orders, vec![5i64; DEFAULT_SEQUENCE_LEN]);
}

#[test]
fn test_registered_composite_generator_wins_over_recursion() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue("unused".to_string()));
    registry.register(FixedValue(1u32));
    registry.register(FixedValue(Address::new("direct".to_string(), 77)));

    let mut synth = synthesizer_with(registry);
    let customer: Customer = synth.create();

    assert_eq!(customer.address, Address::new("direct".to_string(), 77));
}

#[test]
fn test_missing_element_generator_leaves_container_empty() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue("n".to_string()));
    registry.register(FixedValue(1u32));
    // no i64 generator

    let mut synth = synthesizer_with(registry);
    let customer: Customer = synth.create();

    assert!(customer.orders.is_empty());
}

#[test]
fn test_generator_failure_degrades_single_member() {
    init_tracing();
    let mut registry = GeneratorRegistry::new();
    registry.register(FailingGenerator::<i32>::new());

    let mut synth = synthesizer_with(registry);

    assert_eq!(synth.create::<i32>(), 0);
    // the enclosing construction survives the failing generator
    assert_eq!(synth.create::<Point>(), Point { x: 0, y: 0 });
}

#[test]
fn test_last_registration_wins() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue(1i32));
    registry.register(FixedValue(2i32));

    let mut synth = synthesizer_with(registry);
    assert_eq!(synth.create::<i32>(), 2);
}

#[test]
fn test_read_only_member_not_overwritten() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue(3i32));
    registry.register(FixedValue("zzz".to_string()));

    let mut synth = synthesizer_with(registry);
    let tagged: Tagged = synth.create();

    assert_eq!(tagged.value, 3);
    // tag has no public setter: the string generator never touches it
    assert_eq!(tagged.tag(), "#3");
}

#[test]
fn test_structural_idempotence_with_fixed_generators() {
    let mut registry = GeneratorRegistry::new();
    registry.register(FixedValue("same".to_string()));
    registry.register(FixedValue(4u32));
    registry.register(FixedValue(8i64));

    let mut synth = synthesizer_with(registry);
    let first: Customer = synth.create();
    let second: Customer = synth.create();

    assert_eq!(first, second);
}
