#![forbid(unsafe_code)]

use crate::tree::{Comparator, Tree};

/// Comparator that treats wildcard nodes on the pattern side as captures.
///
/// Captured candidate subterms are recorded in traversal order.
#[derive(Debug)]
pub struct GlobMatcher<'a, T> {
    captures: Vec<&'a T>,
}

impl<T> Default for GlobMatcher<'_, T> {
    fn default() -> Self {
        Self {
            captures: Vec::new(),
        }
    }
}

impl<'a, T: Tree> GlobMatcher<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captures(&self) -> &[&'a T] {
        &self.captures
    }

    pub fn into_captures(self) -> Vec<&'a T> {
        self.captures
    }
}

impl<'a, T: Tree> Comparator<'a, T> for GlobMatcher<'a, T> {
    fn compare(&mut self, pattern: &'a T, candidate: &'a T) -> Option<bool> {
        if pattern.is_wildcard() {
            self.captures.push(candidate);
            Some(true)
        } else {
            None
        }
    }
}

/// Outcome of [`glob_match`]. `captures` is only meaningful when `matched`.
#[derive(Debug, PartialEq)]
pub struct GlobMatch<'a, T> {
    pub matched: bool,
    pub captures: Vec<&'a T>,
}

pub fn glob_match<'a, T: Tree>(pattern: &'a T, candidate: &'a T) -> GlobMatch<'a, T> {
    let mut matcher = GlobMatcher::new();
    let matched = pattern.compare_with(candidate, &mut matcher);
    GlobMatch {
        matched,
        captures: matcher.into_captures(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;
    use crate::types::Type;

    #[test]
    fn captures_in_document_order() {
        let pattern = Term::and(Term::Wildcard, Term::Wildcard);
        let candidate = Term::and(Term::symbol("b0"), Term::not(Term::symbol("b1")));
        let m = glob_match(&pattern, &candidate);
        assert!(m.matched);
        assert_eq!(
            m.captures,
            vec![&Term::symbol("b0"), &Term::not(Term::symbol("b1"))]
        );
    }

    #[test]
    fn wildcard_root_captures_everything() {
        let candidate = Term::or(Term::Bool(true), Term::Bool(false));
        let m = glob_match(&Term::Wildcard, &candidate);
        assert!(m.matched);
        assert_eq!(m.captures, vec![&candidate]);
    }

    #[test]
    fn variant_mismatch_fails() {
        let pattern = Term::and(Term::Wildcard, Term::Wildcard);
        let candidate = Term::or(Term::symbol("b0"), Term::symbol("b1"));
        assert!(!glob_match(&pattern, &candidate).matched);
    }

    #[test]
    fn partial_captures_before_mismatch() {
        let pattern = Term::and(Term::Wildcard, Term::Bool(true));
        let candidate = Term::and(Term::symbol("b0"), Term::Bool(false));
        let m = glob_match(&pattern, &candidate);
        assert!(!m.matched);
        assert_eq!(m.captures, vec![&Term::symbol("b0")]);
    }

    #[test]
    fn nested_patterns_match_concrete_parts() {
        let pattern = Term::not(Term::and(Term::symbol("b0"), Term::Wildcard));
        let yes = Term::not(Term::and(Term::symbol("b0"), Term::Int(1)));
        let no = Term::not(Term::and(Term::symbol("b1"), Term::Int(1)));
        assert!(glob_match(&pattern, &yes).matched);
        assert!(!glob_match(&pattern, &no).matched);
    }

    #[test]
    fn call_arguments_must_agree_in_length() {
        let pattern = Term::call(Term::symbol("f"), [Term::Wildcard]);
        let candidate = Term::call(Term::symbol("f"), [Term::Int(1), Term::Int(2)]);
        assert!(!glob_match(&pattern, &candidate).matched);
    }

    #[test]
    fn type_wildcards_capture_types() {
        let pattern = Type::function(Type::Wildcard, [Type::Int, Type::Wildcard]);
        let candidate = Type::function(Type::Bool, [Type::Int, Type::Abstract]);
        let m = glob_match(&pattern, &candidate);
        assert!(m.matched);
        assert_eq!(m.captures, vec![&Type::Bool, &Type::Abstract]);
    }
}
