//! Arbitrary-precision decimal generator

use rand::Rng;
use rust_decimal::Decimal;
use specimen_core::{GeneratorError, ValueGenerator};

const DEFAULT_SCALE: u32 = 2;
const DEFAULT_MAGNITUDE: i64 = 1_000_000_00;

/// Random decimals with a fixed scale and bounded magnitude
#[derive(Debug, Clone, Copy)]
pub struct RandomDecimal {
    scale: u32,
    magnitude: i64,
}

impl RandomDecimal {
    /// Create a generator producing decimals with `scale` fractional
    /// digits and mantissas in `-magnitude..=magnitude`
    #[must_use]
    pub fn new(scale: u32, magnitude: i64) -> Self {
        debug_assert!(magnitude > 0);
        Self { scale, magnitude }
    }
}

impl Default for RandomDecimal {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, DEFAULT_MAGNITUDE)
    }
}

impl ValueGenerator for RandomDecimal {
    type Output = Decimal;

    fn generate(&self) -> Result<Decimal, GeneratorError> {
        let mantissa = rand::thread_rng().gen_range(-self.magnitude..=self.magnitude);
        Ok(Decimal::new(mantissa, self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_respected() {
        let generator = RandomDecimal::new(3, 1_000);
        let value = generator.generate().unwrap();
        assert_eq!(value.scale(), 3);
    }

    #[test]
    fn magnitude_is_bounded() {
        let generator = RandomDecimal::new(0, 50);
        for _ in 0..32 {
            let value = generator.generate().unwrap();
            assert!(value.abs() <= Decimal::new(50, 0));
        }
    }
}
