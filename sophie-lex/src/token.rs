#![forbid(unsafe_code)]

use miette::SourceSpan;

pub type Span = SourceSpan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text, possibly containing `{{` / `}}` escapes.
    Text,
    /// `{path}` including its braces.
    FieldPath,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// Text with `{{` and `}}` collapsed to single braces. Field paths are
    /// returned verbatim.
    pub fn unescaped(&self) -> String {
        match self.kind {
            TokenKind::Text => self.text.replace("{{", "{").replace("}}", "}"),
            TokenKind::FieldPath => self.text.clone(),
        }
    }

    /// The dotted path between the braces, for field-path tokens.
    pub fn field_path(&self) -> Option<&str> {
        if self.kind != TokenKind::FieldPath {
            return None;
        }
        let inner = self.text.strip_prefix('{').unwrap_or(&self.text);
        Some(inner.strip_suffix('}').unwrap_or(inner))
    }
}
