#![forbid(unsafe_code)]

use std::fmt;

/// Rendering options shared by every tree printer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatStyle {
    pub indent: usize,
    pub indent_width: usize,
    pub color: bool,
}

impl FormatStyle {
    pub fn plain() -> Self {
        Self {
            indent: 0,
            indent_width: 2,
            color: false,
        }
    }

    pub fn colored() -> Self {
        Self {
            color: true,
            ..Self::plain()
        }
    }

    pub fn nested(self) -> Self {
        Self {
            indent: self.indent + 1,
            ..self
        }
    }

    pub fn newline(&self) -> String {
        format!("\n{}", " ".repeat(self.indent * self.indent_width))
    }
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self::colored()
    }
}

pub(crate) fn color_default(color: bool) -> &'static str {
    if color { "\x1b[0m" } else { "" }
}

pub(crate) fn color_type(color: bool) -> &'static str {
    if color { "\x1b[1;36m" } else { "" }
}

pub(crate) fn color_symbol(color: bool) -> &'static str {
    if color { "\x1b[1;33m" } else { "" }
}

pub(crate) fn color_literal(color: bool) -> &'static str {
    if color { "\x1b[0;35m" } else { "" }
}

/// A leaf scalar stored on a node. Compared by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datum<'a> {
    Bool(bool),
    Int(i64),
    Text(&'a str),
}

impl fmt::Display for Datum<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Int(n) => write!(f, "{n}"),
            Datum::Text(s) => f.write_str(s),
        }
    }
}

/// One named member of a node.
///
/// A member is a child when it holds a node (or a sequence of nodes); anything
/// else is data.
#[derive(Clone, Copy, Debug)]
pub enum Member<'a, T> {
    Child(&'a T),
    Children(&'a [T]),
    Data(Datum<'a>),
}

/// Per-node-pair hook consulted before default structural comparison.
///
/// `Some(verdict)` short-circuits the comparison at this node; `None` defers
/// to the default rule.
pub trait Comparator<'a, T> {
    fn compare(&mut self, pattern: &'a T, candidate: &'a T) -> Option<bool>;
}

/// A comparator with no opinion: plain structural equality.
#[derive(Clone, Copy, Debug, Default)]
pub struct Structural;

impl<'a, T> Comparator<'a, T> for Structural {
    fn compare(&mut self, _pattern: &'a T, _candidate: &'a T) -> Option<bool> {
        None
    }
}

pub trait Tree: Sized {
    /// Variant tag. Two nodes can only be equal if their tags are.
    fn kind(&self) -> &'static str;

    fn is_wildcard(&self) -> bool;

    /// Named members in document order. This table is also what template
    /// field paths resolve against.
    fn members(&self) -> Vec<(&'static str, Member<'_, Self>)>;

    fn member(&self, name: &str) -> Option<Member<'_, Self>> {
        self.members()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| m)
    }

    /// Child nodes, flattening one level of sequence.
    fn children(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        for (_, member) in self.members() {
            match member {
                Member::Child(c) => out.push(c),
                Member::Children(cs) => out.extend(cs.iter()),
                Member::Data(_) => {}
            }
        }
        out
    }

    fn compare(&self, other: &Self) -> bool {
        self.compare_with(other, &mut Structural)
    }

    fn compare_with<'a, C>(&'a self, other: &'a Self, comparator: &mut C) -> bool
    where
        C: Comparator<'a, Self> + ?Sized,
    {
        if let Some(verdict) = comparator.compare(self, other) {
            return verdict;
        }

        if self.kind() != other.kind() {
            return false;
        }

        let ours = self.members();
        let theirs = other.members();
        if ours.len() != theirs.len() {
            return false;
        }

        for ((name, a), (other_name, b)) in ours.into_iter().zip(theirs) {
            if name != other_name {
                return false;
            }
            let same = match (a, b) {
                (Member::Child(a), Member::Child(b)) => a.compare_with(b, comparator),
                (Member::Children(a), Member::Children(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    let mut all = true;
                    for (x, y) in a.iter().zip(b) {
                        if !x.compare_with(y, comparator) {
                            all = false;
                            break;
                        }
                    }
                    all
                }
                (Member::Data(a), Member::Data(b)) => a == b,
                _ => false,
            };
            if !same {
                return false;
            }
        }

        true
    }
}
