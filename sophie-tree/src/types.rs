#![forbid(unsafe_code)]

use std::fmt;

use crate::error::TypeDeclarationError;
use crate::scope::Scope;
use crate::tree::{color_default, color_type, FormatStyle, Member, Tree};

/// The three types a term can be enumerated at.
///
/// Function types never appear as a synthesis target: they are only ever
/// called, never produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Bool,
    Int,
    Abstract,
}

impl BaseType {
    pub const ALL: [BaseType; 3] = [BaseType::Bool, BaseType::Int, BaseType::Abstract];

    pub fn to_type(self) -> Type {
        match self {
            BaseType::Bool => Type::Bool,
            BaseType::Int => Type::Int,
            BaseType::Abstract => Type::Abstract,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
    Abstract,
    /// Matches any type when used on the pattern side of a glob match.
    Wildcard,
    Function {
        ret: Box<Type>,
        args: Vec<Type>,
    },
}

impl Type {
    pub fn function(ret: Type, args: impl IntoIterator<Item = Type>) -> Self {
        Type::Function {
            ret: Box::new(ret),
            args: args.into_iter().collect(),
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    pub fn base(&self) -> Option<BaseType> {
        match self {
            Type::Bool => Some(BaseType::Bool),
            Type::Int => Some(BaseType::Int),
            Type::Abstract => Some(BaseType::Abstract),
            Type::Wildcard | Type::Function { .. } => None,
        }
    }

    /// Return type and argument types if this is a function type.
    pub fn signature(&self) -> Option<(&Type, &[Type])> {
        match self {
            Type::Function { ret, args } => Some((ret.as_ref(), args.as_slice())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Bool => "Bool",
            Type::Int => "Int",
            Type::Abstract => "Abstract",
            Type::Wildcard => "*",
            Type::Function { .. } => "Function",
        }
    }

    /// Rejects function types that take or return other function types.
    ///
    /// The scope is not consulted today; it is part of the signature so that
    /// named abstract types can be resolved here later.
    pub fn verify(&self, _scope: &Scope) -> Result<(), TypeDeclarationError> {
        let Type::Function { ret, args } = self else {
            return Ok(());
        };

        if ret.is_function() || args.iter().any(Type::is_function) {
            return Err(TypeDeclarationError {
                message: "functions are not first-class".to_string(),
            });
        }
        Ok(())
    }

    pub fn format(&self, style: FormatStyle) -> String {
        match self {
            Type::Function { ret, args } => {
                let args_s = args
                    .iter()
                    .map(|t| t.format(style))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} <- ({args_s})", ret.format(style))
            }
            atomic => format!(
                "{}{}{}",
                color_type(style.color),
                atomic.name(),
                color_default(style.color)
            ),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatStyle::plain()))
    }
}

impl Tree for Type {
    fn kind(&self) -> &'static str {
        self.name()
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard)
    }

    fn members(&self) -> Vec<(&'static str, Member<'_, Self>)> {
        match self {
            Type::Function { ret, args } => vec![
                ("return_type", Member::Child(ret)),
                ("arg_types", Member::Children(args)),
            ],
            _ => Vec::new(),
        }
    }
}
