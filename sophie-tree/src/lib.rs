#![forbid(unsafe_code)]

mod error;
mod glob;
mod scope;
mod term;
mod tree;
mod types;

pub use error::{ScopeError, TreeVerificationError, TypeDeclarationError};
pub use glob::{glob_match, GlobMatch, GlobMatcher};
pub use scope::{Scope, ScopeFrame};
pub use term::{BinOp, Precedence, Term, UnaryOp};
pub use tree::{Comparator, Datum, FormatStyle, Member, Structural, Tree};
pub use types::{BaseType, Type};
