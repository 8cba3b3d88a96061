#![forbid(unsafe_code)]

use std::fmt;

use crate::error::TreeVerificationError;
use crate::scope::Scope;
use crate::tree::{color_default, color_literal, color_symbol, Datum, FormatStyle, Member, Tree};
use crate::types::Type;

/// Binding rank used for printing. Lower binds tighter; a child is
/// parenthesized when its rank is higher than its parent's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precedence {
    Term = 0,
    Negate = 1,
    Mul = 2,
    Add = 3,
    Relation = 4,
    Compare = 5,
    Not = 6,
    Or = 7,
    And = 8,
    Implies = 9,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [UnaryOp::Not, UnaryOp::Negate];

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Not => "Not",
            UnaryOp::Negate => "Negate",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            UnaryOp::Not => "not ",
            UnaryOp::Negate => "-",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            UnaryOp::Not => Precedence::Not,
            UnaryOp::Negate => Precedence::Negate,
        }
    }
}

/// What a binary operator demands of its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operands {
    /// Both sides Bool.
    Bool,
    /// Left side Int, right side the same type as the left.
    Int,
    /// Right side the same type as the left, whatever it is.
    Same,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Or,
    And,
    Implies,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
    Eq,
}

impl BinOp {
    pub const ALL: [BinOp; 13] = [
        BinOp::Or,
        BinOp::And,
        BinOp::Implies,
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Lt,
        BinOp::Le,
        BinOp::Gt,
        BinOp::Ge,
        BinOp::Ne,
        BinOp::Eq,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BinOp::Or => "Or",
            BinOp::And => "And",
            BinOp::Implies => "Implies",
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
            BinOp::Lt => "LT",
            BinOp::Le => "LE",
            BinOp::Gt => "GT",
            BinOp::Ge => "GE",
            BinOp::Ne => "NE",
            BinOp::Eq => "EQ",
        }
    }

    pub fn infix(self) -> &'static str {
        match self {
            BinOp::Or => " or ",
            BinOp::And => " and ",
            BinOp::Implies => " => ",
            BinOp::Add => " + ",
            BinOp::Sub => " - ",
            BinOp::Mul => " * ",
            BinOp::Div => " / ",
            BinOp::Lt => " < ",
            BinOp::Le => " <= ",
            BinOp::Gt => " > ",
            BinOp::Ge => " >= ",
            BinOp::Ne => " /= ",
            BinOp::Eq => " = ",
        }
    }

    /// Operator spelling as it appears in diagnostics.
    fn describe(self) -> &'static str {
        match self {
            BinOp::Or => "'or'",
            BinOp::And => "'and'",
            other => other.infix().trim(),
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Or => Precedence::Or,
            BinOp::And => Precedence::And,
            BinOp::Implies => Precedence::Implies,
            BinOp::Add | BinOp::Sub => Precedence::Add,
            BinOp::Mul | BinOp::Div => Precedence::Mul,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => Precedence::Relation,
            BinOp::Ne | BinOp::Eq => Precedence::Compare,
        }
    }

    fn operands(self) -> Operands {
        match self {
            BinOp::Or | BinOp::And | BinOp::Implies => Operands::Bool,
            BinOp::Add
            | BinOp::Sub
            | BinOp::Mul
            | BinOp::Div
            | BinOp::Lt
            | BinOp::Le
            | BinOp::Gt
            | BinOp::Ge => Operands::Int,
            BinOp::Ne | BinOp::Eq => Operands::Same,
        }
    }

    /// Arithmetic operators take the type of their left operand; everything
    /// else is a predicate.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// Pattern-only node: matches any subterm during a glob match.
    Wildcard,
    Bool(bool),
    Int(i64),
    Symbol(String),
    Call {
        callee: Box<Term>,
        args: Vec<Term>,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Term>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(value)
    }
}

impl Term {
    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    pub fn call(callee: Term, args: impl IntoIterator<Item = Term>) -> Self {
        Term::Call {
            callee: Box::new(callee),
            args: args.into_iter().collect(),
        }
    }

    pub fn unary(op: UnaryOp, arg: Term) -> Self {
        Term::Unary {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn binary(op: BinOp, lhs: Term, rhs: Term) -> Self {
        Term::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn not(arg: Term) -> Self {
        Term::unary(UnaryOp::Not, arg)
    }

    pub fn negate(arg: Term) -> Self {
        Term::unary(UnaryOp::Negate, arg)
    }

    pub fn and(lhs: Term, rhs: Term) -> Self {
        Term::binary(BinOp::And, lhs, rhs)
    }

    pub fn or(lhs: Term, rhs: Term) -> Self {
        Term::binary(BinOp::Or, lhs, rhs)
    }

    pub fn implies(lhs: Term, rhs: Term) -> Self {
        Term::binary(BinOp::Implies, lhs, rhs)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Term::Wildcard | Term::Bool(_) | Term::Int(_) | Term::Symbol(_) | Term::Call { .. } => {
                Precedence::Term
            }
            Term::Unary { op, .. } => op.precedence(),
            Term::Binary { op, .. } => op.precedence(),
        }
    }

    /// Literal spelling, without colour. `None` for non-literals.
    pub fn literal_text(&self) -> Option<String> {
        match self {
            Term::Bool(true) => Some("true".to_string()),
            Term::Bool(false) => Some("false".to_string()),
            Term::Int(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn format(&self, style: FormatStyle) -> String {
        match self {
            Term::Wildcard => "*".to_string(),
            Term::Bool(_) | Term::Int(_) => format!(
                "{}{}{}",
                color_literal(style.color),
                self.literal_text().unwrap_or_default(),
                color_default(style.color)
            ),
            Term::Symbol(name) => format!(
                "{}{}{}",
                color_symbol(style.color),
                name,
                color_default(style.color)
            ),
            Term::Call { callee, args } => {
                let args_s = args
                    .iter()
                    .map(|a| a.format(style))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({args_s})", self.format_child(callee, style))
            }
            Term::Unary { op, arg } => {
                format!("{}{}", op.prefix(), self.format_child(arg, style))
            }
            Term::Binary { op, lhs, rhs } => format!(
                "{}{}{}",
                self.format_child(lhs, style),
                op.infix(),
                self.format_child(rhs, style)
            ),
        }
    }

    fn format_child(&self, child: &Term, style: FormatStyle) -> String {
        if self.precedence() < child.precedence() {
            format!("({})", child.format(style))
        } else {
            child.format(style)
        }
    }

    pub fn get_type(&self, scope: &Scope) -> Result<Type, TreeVerificationError> {
        match self {
            Term::Wildcard => Err(TreeVerificationError::new("wildcard value has no type")),
            Term::Bool(_) => Ok(Type::Bool),
            Term::Int(_) => Ok(Type::Int),
            Term::Symbol(name) => scope
                .lookup(name)
                .cloned()
                .map_err(|_| TreeVerificationError::new(format!("use of undeclared symbol {name:?}"))),
            Term::Call { callee, .. } => {
                let callee_ty = callee.get_type(scope)?;
                match callee_ty.signature() {
                    Some((ret, _)) => Ok(ret.clone()),
                    None => Err(TreeVerificationError::new(format!(
                        "cannot call value of non-functional type: {callee}"
                    ))),
                }
            }
            Term::Unary { op: UnaryOp::Not, .. } => Ok(Type::Bool),
            Term::Unary {
                op: UnaryOp::Negate,
                arg,
            } => arg.get_type(scope),
            Term::Binary { op, lhs, .. } => {
                if op.is_arithmetic() {
                    lhs.get_type(scope)
                } else {
                    Ok(Type::Bool)
                }
            }
        }
    }

    /// Type-checks this term and every subterm against `scope`.
    pub fn verify(&self, scope: &Scope) -> Result<(), TreeVerificationError> {
        for child in self.children() {
            child.verify(scope)?;
        }

        match self {
            Term::Wildcard | Term::Bool(_) | Term::Int(_) => Ok(()),
            Term::Symbol(name) => {
                if scope.contains(name) {
                    Ok(())
                } else {
                    Err(TreeVerificationError::new(format!(
                        "use of undeclared symbol {name:?}"
                    )))
                }
            }
            Term::Call { callee, args } => verify_call(scope, callee, args),
            Term::Unary { op, arg } => {
                let arg_ty = arg.get_type(scope)?;
                let (expected, label) = match op {
                    UnaryOp::Not => (Type::Bool, "'not'"),
                    UnaryOp::Negate => (Type::Int, "-"),
                };
                if arg_ty != expected {
                    return Err(TreeVerificationError::new(format!(
                        "expected argument of {label} to be of type {expected}, not {arg_ty}"
                    )));
                }
                Ok(())
            }
            Term::Binary { op, lhs, rhs } => verify_binary(scope, *op, lhs, rhs),
        }
    }
}

fn verify_call(scope: &Scope, callee: &Term, args: &[Term]) -> Result<(), TreeVerificationError> {
    let callee_ty = callee.get_type(scope)?;
    let Some((_, params)) = callee_ty.signature() else {
        return Err(TreeVerificationError::new(format!(
            "cannot call value of non-functional type: {callee}"
        )));
    };

    if params.len() != args.len() {
        return Err(TreeVerificationError::new(format!(
            "call to {callee} expects {} argument{}, not {}",
            params.len(),
            if params.len() == 1 { "" } else { "s" },
            args.len()
        )));
    }

    for (i, (param, arg)) in params.iter().zip(args).enumerate() {
        let arg_ty = arg.get_type(scope)?;
        if *param != arg_ty {
            return Err(TreeVerificationError::new(format!(
                "argument {i} of {callee} expected to be of type {param}, not {arg_ty}"
            )));
        }
    }
    Ok(())
}

fn verify_binary(
    scope: &Scope,
    op: BinOp,
    lhs: &Term,
    rhs: &Term,
) -> Result<(), TreeVerificationError> {
    let lhs_ty = lhs.get_type(scope)?;
    let rhs_ty = rhs.get_type(scope)?;
    let what = op.describe();

    match op.operands() {
        Operands::Bool => {
            if lhs_ty != Type::Bool {
                return Err(TreeVerificationError::new(format!(
                    "expected left-hand side argument of {what} to be of type Bool, not {lhs_ty}"
                )));
            }
            if rhs_ty != Type::Bool {
                return Err(TreeVerificationError::new(format!(
                    "expected right-hand side argument of {what} to be of type Bool, not {rhs_ty}"
                )));
            }
        }
        Operands::Int | Operands::Same => {
            if op.operands() == Operands::Int && lhs_ty != Type::Int {
                return Err(TreeVerificationError::new(format!(
                    "expected left-hand side argument of {what} to be of type Int, not {lhs_ty}"
                )));
            }
            if rhs_ty != lhs_ty {
                return Err(TreeVerificationError::new(format!(
                    "expected right-hand side argument of {what} to match type of left-hand side, not {rhs_ty}"
                )));
            }
        }
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatStyle::plain()))
    }
}

impl Tree for Term {
    fn kind(&self) -> &'static str {
        match self {
            Term::Wildcard => "Wildcard",
            Term::Bool(_) => "Bool",
            Term::Int(_) => "Int",
            Term::Symbol(_) => "Symbol",
            Term::Call { .. } => "Call",
            Term::Unary { op, .. } => op.name(),
            Term::Binary { op, .. } => op.name(),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, Term::Wildcard)
    }

    fn members(&self) -> Vec<(&'static str, Member<'_, Self>)> {
        match self {
            Term::Wildcard => Vec::new(),
            Term::Bool(b) => vec![("value", Member::Data(Datum::Bool(*b)))],
            Term::Int(n) => vec![("value", Member::Data(Datum::Int(*n)))],
            Term::Symbol(name) => vec![("name", Member::Data(Datum::Text(name)))],
            Term::Call { callee, args } => vec![
                ("callee", Member::Child(callee)),
                ("args", Member::Children(args)),
            ],
            Term::Unary { arg, .. } => vec![("arg", Member::Child(arg))],
            Term::Binary { lhs, rhs, .. } => {
                vec![("lhs", Member::Child(lhs)), ("rhs", Member::Child(rhs))]
            }
        }
    }
}
