//! Primitive classifier
//!
//! Distinguishes *terminal* types (directly producible by a registered
//! generator) from *composite* types (requiring recursive construction).
//! Terminal: the boolean/integer/floating-point families, `char`, text,
//! arbitrary-precision decimal and date/time values. Everything else,
//! including generic containers, is composite.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::any::TypeId;
use std::collections::HashSet;

static TERMINALS: Lazy<HashSet<TypeId>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.insert(TypeId::of::<bool>());
    set.insert(TypeId::of::<char>());
    set.insert(TypeId::of::<i8>());
    set.insert(TypeId::of::<i16>());
    set.insert(TypeId::of::<i32>());
    set.insert(TypeId::of::<i64>());
    set.insert(TypeId::of::<i128>());
    set.insert(TypeId::of::<isize>());
    set.insert(TypeId::of::<u8>());
    set.insert(TypeId::of::<u16>());
    set.insert(TypeId::of::<u32>());
    set.insert(TypeId::of::<u64>());
    set.insert(TypeId::of::<u128>());
    set.insert(TypeId::of::<usize>());
    set.insert(TypeId::of::<f32>());
    set.insert(TypeId::of::<f64>());
    set.insert(TypeId::of::<String>());
    set.insert(TypeId::of::<Decimal>());
    set.insert(TypeId::of::<DateTime<Utc>>());
    set.insert(TypeId::of::<NaiveDate>());
    set.insert(TypeId::of::<NaiveDateTime>());
    set
});

/// True when `ty` is a terminal type
#[inline]
#[must_use]
pub fn is_terminal(ty: TypeId) -> bool {
    TERMINALS.contains(&ty)
}

/// Typed convenience form of [`is_terminal`]
#[inline]
#[must_use]
pub fn is_terminal_type<V: 'static>() -> bool {
    is_terminal(TypeId::of::<V>())
}
