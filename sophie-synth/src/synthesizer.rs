#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::iter::Take;

use rand::seq::SliceRandom;
use rand::Rng;
use sophie_tree::{BaseType, Scope, Term, Type};

use crate::error::SynthesisError;
use crate::factory::{factories_for, Factory};
use crate::policy::{Exhaustive, FactoryPolicy, Stochastic};

/// Terms producible so far, per base type. Rebuilt on every `synthesize`.
#[derive(Debug, Default)]
struct DerivationCache {
    bools: Vec<Term>,
    ints: Vec<Term>,
    abstracts: Vec<Term>,
    seen: HashSet<Term>,
}

impl DerivationCache {
    fn terms(&self, ty: &Type) -> &[Term] {
        match ty.base() {
            Some(BaseType::Bool) => &self.bools,
            Some(BaseType::Int) => &self.ints,
            Some(BaseType::Abstract) => &self.abstracts,
            None => &[],
        }
    }

    fn insert(&mut self, base: BaseType, term: Term) {
        if !self.seen.insert(term.clone()) {
            return;
        }
        match base {
            BaseType::Bool => self.bools.push(term),
            BaseType::Int => self.ints.push(term),
            BaseType::Abstract => self.abstracts.push(term),
        }
    }

    fn sizes(&self) -> (usize, usize, usize) {
        (self.bools.len(), self.ints.len(), self.abstracts.len())
    }

    fn odometer(&self, arg_types: &[Type]) -> Odometer {
        Odometer::new(arg_types.iter().map(|t| self.terms(t).len()).collect())
    }

    fn pick(&self, arg_types: &[Type], indices: &[usize]) -> Vec<Term> {
        arg_types
            .iter()
            .zip(indices)
            .map(|(t, &i)| self.terms(t)[i].clone())
            .collect()
    }
}

/// Cartesian product over index ranges, rightmost position varying fastest.
#[derive(Debug)]
struct Odometer {
    lens: Vec<usize>,
    indices: Vec<usize>,
    done: bool,
}

impl Odometer {
    fn new(lens: Vec<usize>) -> Self {
        let done = lens.iter().any(|&n| n == 0);
        Self {
            indices: vec![0; lens.len()],
            lens,
            done,
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let mut pos = self.indices.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.lens[pos] {
                break;
            }
            self.indices[pos] = 0;
        }

        Some(current)
    }
}

/// Bottom-up generator of well-typed, Bool-rooted terms.
///
/// Layer 0 holds the atoms of each base type. Each of the `max_depth - 2`
/// intermediate layers applies every non-nullary factory to the terms
/// accumulated so far. The final layer does the same for Bool results only
/// and is streamed rather than cached.
#[derive(Debug)]
pub struct TreeSynthesizer<'s, P = Exhaustive> {
    scope: &'s Scope,
    max_depth: usize,
    policy: P,
}

pub type TreeSynthesizerEnumerative<'s> = TreeSynthesizer<'s, Exhaustive>;
pub type TreeSynthesizerStochastic<'s, R> = TreeSynthesizer<'s, Stochastic<R>>;

impl<'s> TreeSynthesizer<'s, Exhaustive> {
    pub fn enumerative(scope: &'s Scope, max_depth: usize) -> Result<Self, SynthesisError> {
        Self::with_policy(scope, max_depth, Exhaustive)
    }
}

impl<'s, R: Rng> TreeSynthesizer<'s, Stochastic<R>> {
    pub fn stochastic(
        scope: &'s Scope,
        max_depth: usize,
        probability: f64,
        rng: R,
    ) -> Result<Self, SynthesisError> {
        Self::with_policy(scope, max_depth, Stochastic::new(probability, rng)?)
    }

    /// Draws `n` distinct terms from a fresh stochastic run.
    ///
    /// When the run produces fewer than `n` terms, all of them are returned in
    /// shuffled order.
    pub fn sample(&mut self, n: usize) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut population: Vec<Term> = self
            .synthesize()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        let rng = self.policy.rng_mut();
        if population.len() < n {
            population.shuffle(rng);
            population
        } else {
            population.choose_multiple(rng, n).cloned().collect()
        }
    }
}

impl<'s, P: FactoryPolicy> TreeSynthesizer<'s, P> {
    pub fn with_policy(scope: &'s Scope, max_depth: usize, policy: P) -> Result<Self, SynthesisError> {
        if max_depth == 0 {
            return Err(SynthesisError::ZeroDepth);
        }
        Ok(Self {
            scope,
            max_depth,
            policy,
        })
    }

    pub fn scope(&self) -> &'s Scope {
        self.scope
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Starts a new run. The cached layers are computed eagerly; the final
    /// layer is produced lazily by the returned iterator.
    pub fn synthesize(&mut self) -> Synthesis<'_, P> {
        let factories: Vec<(BaseType, Vec<Factory>)> = BaseType::ALL
            .iter()
            .map(|&base| (base, factories_for(self.scope, base)))
            .collect();

        let mut cache = DerivationCache::default();
        for (base, fs) in &factories {
            for factory in fs.iter().filter(|f| f.arity() == 0) {
                if !self.policy.can_use_factory(*base, factory.arg_types()) {
                    continue;
                }
                if let Some(term) = factory.instantiate(Vec::new()) {
                    cache.insert(*base, term);
                }
            }
        }
        log::debug!("layer 0: (bool, int, abstract) = {:?}", cache.sizes());

        for layer in 1..self.max_depth.saturating_sub(1) {
            let mut produced: Vec<(BaseType, Term)> = Vec::new();
            for (base, fs) in &factories {
                for factory in fs.iter().filter(|f| f.arity() > 0) {
                    if !self.policy.can_use_factory(*base, factory.arg_types()) {
                        continue;
                    }
                    for indices in cache.odometer(factory.arg_types()) {
                        let args = cache.pick(factory.arg_types(), &indices);
                        if let Some(term) = factory.instantiate(args) {
                            produced.push((*base, term));
                        }
                    }
                }
            }
            for (base, term) in produced {
                cache.insert(base, term);
            }
            log::debug!("layer {layer}: (bool, int, abstract) = {:?}", cache.sizes());
        }

        let finals: Vec<Factory> = if self.max_depth > 1 {
            factories
                .into_iter()
                .filter(|(base, _)| *base == BaseType::Bool)
                .flat_map(|(_, fs)| fs)
                .filter(|f| f.arity() > 0)
                .collect()
        } else {
            Vec::new()
        };

        Synthesis {
            policy: &mut self.policy,
            cache,
            factories: finals.into_iter(),
            current: None,
        }
    }

    pub fn take(&mut self, n: usize) -> Take<Synthesis<'_, P>> {
        self.synthesize().take(n)
    }
}

/// The final, Bool-rooted derivation layer of one synthesis run.
#[derive(Debug)]
pub struct Synthesis<'a, P> {
    policy: &'a mut P,
    cache: DerivationCache,
    factories: std::vec::IntoIter<Factory>,
    current: Option<(Factory, Odometer)>,
}

impl<P: FactoryPolicy> Iterator for Synthesis<'_, P> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        loop {
            if let Some((factory, odometer)) = self.current.as_mut() {
                if let Some(indices) = odometer.next() {
                    let args = self.cache.pick(factory.arg_types(), &indices);
                    if let Some(term) = factory.instantiate(args) {
                        return Some(term);
                    }
                    continue;
                }
            }
            self.current = None;

            let factory = self.factories.next()?;
            if !self
                .policy
                .can_use_factory(BaseType::Bool, factory.arg_types())
            {
                continue;
            }
            let odometer = self.cache.odometer(factory.arg_types());
            self.current = Some((factory, odometer));
        }
    }
}
