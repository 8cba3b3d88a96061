#![forbid(unsafe_code)]

use miette::Diagnostic;
use sophie_lex::LexError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum TemplateError {
    #[error("cannot access field at empty path")]
    #[diagnostic(code(sophie::template))]
    EmptyPath,

    #[error(".. not supported in field paths (in '{path}')")]
    #[diagnostic(code(sophie::template))]
    EmptySegment { path: String },

    #[error("object of type {kind} has no field '{field}'")]
    #[diagnostic(code(sophie::template))]
    MissingField { kind: &'static str, field: String },

    #[error("cannot access field '{field}' of a non-term value")]
    #[diagnostic(
        code(sophie::template),
        help("only term-valued fields can be descended into with '.'")
    )]
    NotATerm { field: String },

    #[error("character {character:?} is not in the alphabet")]
    #[diagnostic(code(sophie::template))]
    OutOfAlphabet { character: char },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),
}
