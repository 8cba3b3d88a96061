#![forbid(unsafe_code)]

use rand::Rng;
use sophie_tree::{BaseType, Type};

use crate::error::SynthesisError;

/// Decides, per candidate factory application, whether the synthesizer may
/// use it.
pub trait FactoryPolicy {
    fn can_use_factory(&mut self, result: BaseType, arg_types: &[Type]) -> bool;
}

/// Full enumeration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exhaustive;

impl FactoryPolicy for Exhaustive {
    fn can_use_factory(&mut self, _result: BaseType, _arg_types: &[Type]) -> bool {
        true
    }
}

/// Keeps each factory application independently with probability `p`.
#[derive(Clone, Debug)]
pub struct Stochastic<R> {
    probability: f64,
    rng: R,
}

impl<R: Rng> Stochastic<R> {
    pub fn new(probability: f64, rng: R) -> Result<Self, SynthesisError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SynthesisError::Probability { probability });
        }
        Ok(Self { probability, rng })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> FactoryPolicy for Stochastic<R> {
    fn can_use_factory(&mut self, result: BaseType, arg_types: &[Type]) -> bool {
        let keep = self.rng.r#gen::<f64>() < self.probability;
        log::trace!(
            "factory {result:?} <- {} args: {}",
            arg_types.len(),
            if keep { "kept" } else { "dropped" }
        );
        keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_out_of_range_probability() {
        let rng = ChaCha8Rng::seed_from_u64(0);
        assert!(Stochastic::new(1.5, rng.clone()).is_err());
        assert!(Stochastic::new(-0.1, rng.clone()).is_err());
        assert!(Stochastic::new(f64::NAN, rng).is_err());
    }

    #[test]
    fn extreme_probabilities_are_deterministic() {
        let mut never = Stochastic::new(0.0, ChaCha8Rng::seed_from_u64(1)).unwrap();
        let mut always = Stochastic::new(1.0, ChaCha8Rng::seed_from_u64(1)).unwrap();
        for _ in 0..100 {
            assert!(!never.can_use_factory(BaseType::Bool, &[]));
            assert!(always.can_use_factory(BaseType::Bool, &[]));
        }
    }
}
