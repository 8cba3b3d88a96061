#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use logos::Logos;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Debug, Error, Diagnostic, PartialEq)]
#[error("lex error at {line}:{column}: {message}")]
#[diagnostic(code(sophie::lex))]
#[allow(unused_assignments)]
pub struct LexError {
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    #[label]
    pub span: SourceSpan,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    // `{{` opens a text run that continues up to the next `{`.
    #[regex(r"\{\{[^{]*")]
    EscapedText,

    // A field path runs to the first `}` (or the end of input), taking in any
    // `{` along the way. A second `{` right after the first is escaped text.
    #[regex(r"\{([^{}][^}]*)?\}?")]
    FieldPath,

    #[regex(r"[^{]+")]
    Text,
}

/// Line/column of a byte offset. Lines and columns start at 1; `\r\n` and a
/// lone `\r` both end a line.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance_over(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        self.offset += 1;
                    }
                    self.line += 1;
                    self.column = 1;
                }
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
            self.offset += c.len_utf8();
        }
    }
}

/// Splits a presentation template into text and field-path runs.
pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    pub fn lex(&self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::start();
        let mut lex = RawToken::lexer(self.src);

        while let Some(raw) = lex.next() {
            let range = lex.span();
            let kind = match raw {
                Ok(RawToken::EscapedText) | Ok(RawToken::Text) => TokenKind::Text,
                Ok(RawToken::FieldPath) => TokenKind::FieldPath,
                Err(_) => return Err(no_progress(&cursor)),
            };
            if range.is_empty() {
                return Err(no_progress(&cursor));
            }

            let slice = lex.slice();
            let text = match kind {
                TokenKind::Text => normalize_newlines(slice),
                TokenKind::FieldPath => slice.to_string(),
            };
            tokens.push(Token {
                kind,
                text,
                span: SourceSpan::new(range.start.into(), range.len()),
                line: cursor.line,
                column: cursor.column,
            });
            cursor.advance_over(slice);
        }

        Ok(tokens)
    }
}

/// `\r\n` and a lone `\r` become `\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn no_progress(cursor: &Cursor) -> LexError {
    LexError {
        message: "lexer read no characters at this location".to_string(),
        offset: cursor.offset,
        line: cursor.line,
        column: cursor.column,
        span: SourceSpan::new(cursor.offset.into(), 0),
    }
}
