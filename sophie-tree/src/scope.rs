#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{ScopeError, TypeDeclarationError};
use crate::tree::{color_default, color_symbol, FormatStyle};
use crate::types::Type;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeFrame {
    symbols: BTreeMap<String, Type>,
}

impl ScopeFrame {
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.symbols.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }
}

/// Chained symbol table. Lookups search innermost-first; the root frame is
/// never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    frames: Vec<ScopeFrame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Into<String>> FromIterator<(N, Type)> for Scope {
    fn from_iter<I: IntoIterator<Item = (N, Type)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (name, ty) in iter {
            scope.define(name, ty);
        }
        scope
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().any(|f| f.contains(name))
    }

    pub fn lookup(&self, name: &str) -> Result<&Type, ScopeError> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.get(name))
            .ok_or_else(|| ScopeError::Undeclared {
                name: name.to_string(),
            })
    }

    /// Binds `name` in the innermost frame, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, ty: Type) {
        if let Some(top) = self.frames.last_mut() {
            top.symbols.insert(name.into(), ty);
        }
    }

    /// Removes the innermost binding of `name`.
    pub fn undefine(&mut self, name: &str) -> Result<Type, ScopeError> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(ty) = frame.symbols.remove(name) {
                return Ok(ty);
            }
        }
        Err(ScopeError::Undeclared {
            name: name.to_string(),
        })
    }

    pub fn push_frame(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// No-op on the root frame.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Visible names in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        let names: BTreeSet<&str> = self.frames.iter().flat_map(ScopeFrame::names).collect();
        names.into_iter()
    }

    /// Visible bindings in name order, each resolved innermost-first.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.symbols()
            .filter_map(move |name| self.lookup(name).ok().map(|ty| (name, ty)))
    }

    pub fn verify(&self) -> Result<(), TypeDeclarationError> {
        for (_, ty) in self.bindings() {
            ty.verify(self)?;
        }
        Ok(())
    }

    pub fn format(&self, style: FormatStyle) -> String {
        let mut out = String::new();
        for (name, ty) in self.bindings() {
            if !out.is_empty() {
                out.push_str(&style.newline());
            }
            out.push_str(&format!(
                "{}{}{}: {}",
                color_symbol(style.color),
                name,
                color_default(style.color),
                ty.format(style.nested())
            ));
        }
        out
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatStyle::plain()))
    }
}
