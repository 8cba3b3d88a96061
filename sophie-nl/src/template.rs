#![forbid(unsafe_code)]

use std::fmt;

use sophie_lex::{Lexer, Token, TokenKind};
use sophie_tree::{Datum, Member, Term, Tree};

use crate::alphabet::Alphabet;
use crate::error::TemplateError;

/// A value reached by walking a field path from a term.
#[derive(Clone, Copy, Debug)]
pub enum Field<'a> {
    Term(&'a Term),
    Terms(&'a [Term]),
    Data(Datum<'a>),
}

impl<'a> From<Member<'a, Term>> for Field<'a> {
    fn from(member: Member<'a, Term>) -> Self {
        match member {
            Member::Child(term) => Field::Term(term),
            Member::Children(terms) => Field::Terms(terms),
            Member::Data(datum) => Field::Data(datum),
        }
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Term(term) => write!(f, "{term}"),
            Field::Terms(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            }
            Field::Data(datum) => write!(f, "{datum}"),
        }
    }
}

/// Resolves a dotted path against a term's named members, one hop per
/// segment.
pub fn resolve_field<'a>(term: &'a Term, path: &str) -> Result<Field<'a>, TemplateError> {
    if path.is_empty() {
        return Err(TemplateError::EmptyPath);
    }

    let mut cursor = Field::Term(term);
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(TemplateError::EmptySegment {
                path: path.to_string(),
            });
        }
        let Field::Term(current) = cursor else {
            return Err(TemplateError::NotATerm {
                field: segment.to_string(),
            });
        };
        cursor = current
            .member(segment)
            .map(Field::from)
            .ok_or_else(|| TemplateError::MissingField {
                kind: current.kind(),
                field: segment.to_string(),
            })?;
    }

    Ok(cursor)
}

/// A compiled `"{lhs} and {rhs}"`-style template.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl FormatTemplate {
    pub fn compile(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let tokens = Lexer::new(&source).lex()?;
        Ok(Self { source, tokens })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Characters of the literal text runs, escapes included.
    pub fn alphabet(&self) -> Alphabet {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Text)
            .flat_map(|t| t.text.chars())
            .collect()
    }

    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(Token::field_path)
    }

    /// Renders with each field stringified by its `Display` form.
    pub fn render(&self, term: &Term) -> Result<String, TemplateError> {
        self.render_with(term, |field| Ok(field.to_string()))
    }

    pub fn render_with<'t, F>(&self, term: &'t Term, mut formatter: F) -> Result<String, TemplateError>
    where
        F: FnMut(Field<'t>) -> Result<String, TemplateError>,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token.field_path() {
                None => out.push_str(&token.unescaped()),
                Some(path) => {
                    let field = resolve_field(term, path)?;
                    out.push_str(&formatter(field)?);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
