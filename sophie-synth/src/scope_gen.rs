#![forbid(unsafe_code)]

use rand::seq::SliceRandom;
use rand::Rng;
use sophie_tree::{Scope, Type};

use crate::error::SynthesisError;

const VALUE_TYPES: [Type; 3] = [Type::Bool, Type::Abstract, Type::Int];

/// Builds dataset scopes: `b0..`, `a0..`, `i0..` of the base types and `f0..`
/// of randomly chosen first-order function types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeGenerator {
    pub boolean_symbol_count: usize,
    pub abstract_symbol_count: usize,
    pub int_symbol_count: usize,
    pub function_symbol_count: usize,
    pub max_function_argument_count: usize,
}

impl ScopeGenerator {
    /// Argument lists of length `1..=max_function_argument_count`, shortest
    /// first.
    pub fn argument_lists(&self) -> Result<Vec<Vec<Type>>, SynthesisError> {
        if self.max_function_argument_count == 0 {
            return Err(SynthesisError::ZeroArgumentCount);
        }

        let mut out: Vec<Vec<Type>> = Vec::new();
        let mut previous: Vec<Vec<Type>> = vec![Vec::new()];
        for _ in 0..self.max_function_argument_count {
            let mut next = Vec::with_capacity(previous.len() * VALUE_TYPES.len());
            for prefix in &VALUE_TYPES {
                for rest in &previous {
                    let mut list = Vec::with_capacity(rest.len() + 1);
                    list.push(prefix.clone());
                    list.extend(rest.iter().cloned());
                    next.push(list);
                }
            }
            out.extend(next.iter().cloned());
            previous = next;
        }
        Ok(out)
    }

    /// Every candidate function type.
    pub fn function_types(&self) -> Result<Vec<Type>, SynthesisError> {
        let lists = self.argument_lists()?;
        let mut out = Vec::with_capacity(VALUE_TYPES.len() * lists.len());
        for ret in &VALUE_TYPES {
            for args in &lists {
                out.push(Type::function(ret.clone(), args.iter().cloned()));
            }
        }
        Ok(out)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scope, SynthesisError> {
        let mut scope = Scope::new();

        for i in 0..self.boolean_symbol_count {
            scope.define(format!("b{i}"), Type::Bool);
        }
        for i in 0..self.abstract_symbol_count {
            scope.define(format!("a{i}"), Type::Abstract);
        }
        for i in 0..self.int_symbol_count {
            scope.define(format!("i{i}"), Type::Int);
        }

        if self.function_symbol_count > 0 {
            let candidates = self.function_types()?;
            let chosen: Vec<Type> = if candidates.len() > self.function_symbol_count {
                candidates
                    .choose_multiple(rng, self.function_symbol_count)
                    .cloned()
                    .collect()
            } else {
                candidates
            };
            for (i, ty) in chosen.into_iter().enumerate() {
                scope.define(format!("f{i}"), ty);
            }
        }

        log::debug!("generated scope with {} symbols", scope.symbols().count());
        Ok(scope)
    }
}
