#![forbid(unsafe_code)]

mod error;
mod factory;
mod policy;
mod scope_gen;
mod synthesizer;

pub use error::SynthesisError;
pub use factory::{factories_for, Factory};
pub use policy::{Exhaustive, FactoryPolicy, Stochastic};
pub use scope_gen::ScopeGenerator;
pub use synthesizer::{
    Synthesis, TreeSynthesizer, TreeSynthesizerEnumerative, TreeSynthesizerStochastic,
};
