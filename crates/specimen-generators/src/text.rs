//! Text generator

use rand::distributions::Alphanumeric;
use rand::Rng;
use specimen_core::{GeneratorError, ValueGenerator};

/// Random alphanumeric strings with a length drawn from a closed range
#[derive(Debug, Clone, Copy)]
pub struct RandomString {
    min_len: usize,
    max_len: usize,
}

impl RandomString {
    /// Create a generator producing strings of `min_len..=max_len` chars
    #[must_use]
    pub fn new(min_len: usize, max_len: usize) -> Self {
        debug_assert!(min_len <= max_len);
        Self { min_len, max_len }
    }
}

impl Default for RandomString {
    fn default() -> Self {
        Self::new(4, 16)
    }
}

impl ValueGenerator for RandomString {
    type Output = String;

    fn generate(&self) -> Result<String, GeneratorError> {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(self.min_len..=self.max_len);
        Ok(rng
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_within_bounds() {
        let generator = RandomString::new(3, 9);
        for _ in 0..32 {
            let s = generator.generate().unwrap();
            assert!((3..=9).contains(&s.len()));
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn fixed_length_range() {
        let generator = RandomString::new(5, 5);
        assert_eq!(generator.generate().unwrap().len(), 5);
    }
}
