#![forbid(unsafe_code)]

use sophie_tree::{BaseType, BinOp, Scope, Term, Type, UnaryOp};

const INT_LITERALS: [i64; 5] = [-5, -1, 0, 1, 5];

#[derive(Clone, Debug, PartialEq)]
enum Build {
    Atom(Term),
    Call(String),
    Unary(UnaryOp),
    Binary(BinOp),
}

/// A production rule: given one term per argument type, builds a term of the
/// factory's result type.
#[derive(Clone, Debug, PartialEq)]
pub struct Factory {
    arg_types: Vec<Type>,
    build: Build,
}

impl Factory {
    pub fn atom(term: Term) -> Self {
        Self {
            arg_types: Vec::new(),
            build: Build::Atom(term),
        }
    }

    pub fn call(callee: impl Into<String>, arg_types: Vec<Type>) -> Self {
        Self {
            arg_types,
            build: Build::Call(callee.into()),
        }
    }

    pub fn unary(op: UnaryOp, operand: BaseType) -> Self {
        Self {
            arg_types: vec![operand.to_type()],
            build: Build::Unary(op),
        }
    }

    pub fn binary(op: BinOp, operands: BaseType) -> Self {
        Self {
            arg_types: vec![operands.to_type(), operands.to_type()],
            build: Build::Binary(op),
        }
    }

    pub fn arg_types(&self) -> &[Type] {
        &self.arg_types
    }

    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }

    /// `None` if `args` does not have one term per argument type.
    pub fn instantiate(&self, args: Vec<Term>) -> Option<Term> {
        if args.len() != self.arity() {
            return None;
        }
        let mut args = args.into_iter();
        let term = match &self.build {
            Build::Atom(term) => term.clone(),
            Build::Call(name) => Term::call(Term::symbol(name.clone()), args),
            Build::Unary(op) => Term::unary(*op, args.next()?),
            Build::Binary(op) => {
                let lhs = args.next()?;
                let rhs = args.next()?;
                Term::binary(*op, lhs, rhs)
            }
        };
        Some(term)
    }
}

fn literals(result: BaseType) -> Vec<Term> {
    match result {
        BaseType::Bool => vec![Term::Bool(true), Term::Bool(false)],
        BaseType::Int => INT_LITERALS.iter().copied().map(Term::Int).collect(),
        BaseType::Abstract => Vec::new(),
    }
}

/// Every production rule whose result has type `result`, in a fixed order:
/// literals, plain symbols, callable symbols, then built-in operators.
pub fn factories_for(scope: &Scope, result: BaseType) -> Vec<Factory> {
    let result_ty = result.to_type();
    let mut out: Vec<Factory> = literals(result).into_iter().map(Factory::atom).collect();

    for (name, ty) in scope.bindings() {
        if *ty == result_ty {
            out.push(Factory::atom(Term::symbol(name)));
        }
    }

    for (name, ty) in scope.bindings() {
        if let Some((ret, args)) = ty.signature() {
            if *ret == result_ty {
                out.push(Factory::call(name, args.to_vec()));
            }
        }
    }

    match result {
        BaseType::Bool => {
            out.push(Factory::unary(UnaryOp::Not, BaseType::Bool));
            for op in [BinOp::Or, BinOp::And, BinOp::Implies, BinOp::Ne, BinOp::Eq] {
                out.push(Factory::binary(op, BaseType::Bool));
            }
            for op in [BinOp::Lt, BinOp::Le, BinOp::Gt, BinOp::Ge, BinOp::Ne, BinOp::Eq] {
                out.push(Factory::binary(op, BaseType::Int));
            }
            for op in [BinOp::Ne, BinOp::Eq] {
                out.push(Factory::binary(op, BaseType::Abstract));
            }
        }
        BaseType::Int => {
            out.push(Factory::unary(UnaryOp::Negate, BaseType::Int));
            for op in [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div] {
                out.push(Factory::binary(op, BaseType::Int));
            }
        }
        BaseType::Abstract => {}
    }

    out
}
