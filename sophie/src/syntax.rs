#![forbid(unsafe_code)]
#![allow(unused_assignments)]

//! Textual forms of types and rule patterns used by run files.
//!
//! Types: `Bool`, `Int`, `Abstract`, `*`, `R <- (A, B)`.
//! Patterns: `*`, `true`, `false`, integers, bare identifiers (symbols),
//! operator constructors such as `And(*, b0)` and `Call(f0, *)`.

use std::mem;

use logos::Logos;
use miette::{Diagnostic, SourceSpan};
use sophie_tree::{BinOp, Term, Type, UnaryOp};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq)]
#[error("syntax error: {message}")]
#[diagnostic(code(sophie::syntax))]
#[allow(unused_assignments)]
pub struct SyntaxError {
    pub message: String,
    #[source_code]
    pub src: String,
    #[label]
    pub span: SourceSpan,
}

impl SyntaxError {
    fn new(message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            message: message.into(),
            src: String::new(),
            span,
        }
    }

    fn in_source(mut self, src: &str) -> Self {
        self.src = src.to_string();
        self
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum TokenKind {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("<-")]
    Arrow,
    #[token("*")]
    Star,
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    span: SourceSpan,
}

fn lex(src: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut out = Vec::new();
    let mut lexer = TokenKind::lexer(src);
    while let Some(next) = lexer.next() {
        let range = lexer.span();
        let span = SourceSpan::new(range.start.into(), range.len());
        match next {
            Ok(kind) => out.push(Token { kind, span }),
            Err(_) => {
                return Err(SyntaxError::new(
                    format!("unexpected '{}'", lexer.slice()),
                    span,
                ));
            }
        }
    }
    Ok(out)
}

pub fn parse_type(src: &str) -> Result<Type, SyntaxError> {
    parse_with(src, |p| p.parse_type())
}

pub fn parse_pattern(src: &str) -> Result<Term, SyntaxError> {
    parse_with(src, |p| p.parse_pattern())
}

fn parse_with<T>(
    src: &str,
    rule: impl FnOnce(&mut Parser<'_>) -> Result<T, SyntaxError>,
) -> Result<T, SyntaxError> {
    let parsed = lex(src).and_then(|tokens| {
        let mut parser = Parser::new(src, &tokens);
        let value = rule(&mut parser)?;
        parser.expect_end()?;
        Ok(value)
    });
    parsed.map_err(|e| e.in_source(src))
}

struct Parser<'a> {
    src_len: usize,
    tokens: &'a [Token],
    idx: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &str, tokens: &'a [Token]) -> Self {
        Self {
            src_len: src.len(),
            tokens,
            idx: 0,
        }
    }

    fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        let tok = self.expect_any()?;
        let mut ty = match &tok.kind {
            TokenKind::Star => Type::Wildcard,
            TokenKind::Ident(name) => match name.as_str() {
                "Bool" => Type::Bool,
                "Int" => Type::Int,
                "Abstract" => Type::Abstract,
                other => {
                    return Err(SyntaxError::new(format!("unknown type '{other}'"), tok.span));
                }
            },
            _ => {
                return Err(SyntaxError::new("expected a type", tok.span));
            }
        };

        // `R <- (A) <- (B)` nests to the left; verification rejects it later.
        while self.at(&TokenKind::Arrow) {
            self.next();
            self.expect(TokenKind::LParen)?;
            let mut args = Vec::new();
            if !self.at(&TokenKind::RParen) {
                loop {
                    args.push(self.parse_type()?);
                    if self.at(&TokenKind::Comma) {
                        self.next();
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RParen)?;
            ty = Type::function(ty, args);
        }

        Ok(ty)
    }

    fn parse_pattern(&mut self) -> Result<Term, SyntaxError> {
        let tok = self.expect_any()?;
        let name = match tok.kind {
            TokenKind::Star => return Ok(Term::Wildcard),
            TokenKind::Int(n) => return Ok(Term::Int(n)),
            TokenKind::Ident(name) => name,
            _ => {
                return Err(SyntaxError::new("expected a pattern", tok.span));
            }
        };

        if !self.at(&TokenKind::LParen) {
            return Ok(match name.as_str() {
                "true" => Term::Bool(true),
                "false" => Term::Bool(false),
                _ => Term::Symbol(name),
            });
        }

        self.next();
        let mut args = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                args.push(self.parse_pattern()?);
                if self.at(&TokenKind::Comma) {
                    self.next();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(TokenKind::RParen)?;

        build_constructor(&name, args)
            .map_err(|message| SyntaxError::new(message, join(tok.span, close.span)))
    }

    fn expect_end(&mut self) -> Result<(), SyntaxError> {
        match self.next() {
            None => Ok(()),
            Some(tok) => Err(SyntaxError::new("unexpected trailing input", tok.span)),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, SyntaxError> {
        let tok = self.expect_any()?;
        if mem::discriminant(&tok.kind) == mem::discriminant(&expected) {
            Ok(tok)
        } else {
            Err(SyntaxError::new(format!("expected {expected:?}"), tok.span))
        }
    }

    fn expect_any(&mut self) -> Result<Token, SyntaxError> {
        let end = SourceSpan::new(self.src_len.into(), 0);
        self.next()
            .ok_or_else(|| SyntaxError::new("unexpected end of input", end))
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.idx)
            .is_some_and(|t| mem::discriminant(&t.kind) == mem::discriminant(kind))
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.idx)?.clone();
        self.idx += 1;
        Some(tok)
    }
}

fn build_constructor(name: &str, mut args: Vec<Term>) -> Result<Term, String> {
    if name == "Call" {
        if args.is_empty() {
            return Err("Call needs a callee".to_string());
        }
        let callee = args.remove(0);
        return Ok(Term::call(callee, args));
    }

    if let Some(op) = UnaryOp::ALL.into_iter().find(|op| op.name() == name) {
        let [arg] = <[Term; 1]>::try_from(args)
            .map_err(|args| format!("{name} takes 1 argument, not {}", args.len()))?;
        return Ok(Term::unary(op, arg));
    }

    if let Some(op) = BinOp::ALL.into_iter().find(|op| op.name() == name) {
        let [lhs, rhs] = <[Term; 2]>::try_from(args)
            .map_err(|args| format!("{name} takes 2 arguments, not {}", args.len()))?;
        return Ok(Term::binary(op, lhs, rhs));
    }

    Err(format!("unknown constructor '{name}'"))
}

fn join(a: SourceSpan, b: SourceSpan) -> SourceSpan {
    let start = a.offset();
    let end = b.offset() + b.len();
    SourceSpan::new(start.into(), end.saturating_sub(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_types() {
        assert_eq!(parse_type("Bool").unwrap(), Type::Bool);
        assert_eq!(parse_type(" Abstract ").unwrap(), Type::Abstract);
        assert_eq!(parse_type("*").unwrap(), Type::Wildcard);
    }

    #[test]
    fn parse_function_types() {
        assert_eq!(
            parse_type("Bool <- (Abstract, Int)").unwrap(),
            Type::function(Type::Bool, [Type::Abstract, Type::Int])
        );
        assert_eq!(
            parse_type("Int <- ()").unwrap(),
            Type::function(Type::Int, [])
        );
        let nested = parse_type("Bool <- (Int) <- (Int)").unwrap();
        assert_eq!(
            nested,
            Type::function(Type::function(Type::Bool, [Type::Int]), [Type::Int])
        );
    }

    #[test]
    fn function_type_round_trips_through_display() {
        let ty = Type::function(Type::Bool, [Type::Abstract, Type::Int]);
        assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
    }

    #[test]
    fn reject_bad_types() {
        let err = parse_type("Float").unwrap_err();
        assert_eq!(err.message, "unknown type 'Float'");
        assert_eq!(err.span, SourceSpan::new(0.into(), 5));

        assert!(parse_type("Bool <- (Int").is_err());
        assert!(parse_type("Bool Int").is_err());
        assert!(parse_type("").is_err());
    }

    #[test]
    fn parse_patterns() {
        assert_eq!(parse_pattern("*").unwrap(), Term::Wildcard);
        assert_eq!(parse_pattern("-5").unwrap(), Term::Int(-5));
        assert_eq!(parse_pattern("true").unwrap(), Term::Bool(true));
        assert_eq!(parse_pattern("b0").unwrap(), Term::symbol("b0"));
        assert_eq!(
            parse_pattern("And(*, Not(b1))").unwrap(),
            Term::and(Term::Wildcard, Term::not(Term::symbol("b1")))
        );
        assert_eq!(
            parse_pattern("LT(i0, 5)").unwrap(),
            Term::binary(BinOp::Lt, Term::symbol("i0"), Term::Int(5))
        );
        assert_eq!(
            parse_pattern("Call(f0, *, a0)").unwrap(),
            Term::call(Term::symbol("f0"), [Term::Wildcard, Term::symbol("a0")])
        );
        assert_eq!(
            parse_pattern("Call(f0)").unwrap(),
            Term::call(Term::symbol("f0"), [])
        );
    }

    #[test]
    fn reject_bad_patterns() {
        let err = parse_pattern("And(*)").unwrap_err();
        assert_eq!(err.message, "And takes 2 arguments, not 1");
        assert_eq!(err.span, SourceSpan::new(0.into(), 6));

        assert_eq!(
            parse_pattern("Frob(*)").unwrap_err().message,
            "unknown constructor 'Frob'"
        );
        assert_eq!(parse_pattern("Call()").unwrap_err().message, "Call needs a callee");
        assert_eq!(parse_pattern("b0 $").unwrap_err().message, "unexpected '$'");
    }
}
