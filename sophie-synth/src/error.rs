#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Error, Diagnostic, PartialEq)]
#[diagnostic(code(sophie::synth))]
pub enum SynthesisError {
    #[error("max_depth must be greater than zero")]
    ZeroDepth,

    #[error("probability must lie in [0, 1], got {probability}")]
    Probability { probability: f64 },

    #[error("max_function_argument_count must be greater than zero")]
    ZeroArgumentCount,
}
