#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[error("type declaration error: {message}")]
#[diagnostic(code(sophie::types))]
pub struct TypeDeclarationError {
    pub message: String,
}

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[error("tree verification error: {message}")]
#[diagnostic(code(sophie::verify))]
pub struct TreeVerificationError {
    pub message: String,
}

impl TreeVerificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[diagnostic(code(sophie::scope))]
pub enum ScopeError {
    #[error("symbol {name:?} is not declared in any frame")]
    Undeclared { name: String },
}
