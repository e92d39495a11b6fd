//! The render capability shared by [`Query`](crate::Query) and
//! [`UnionAll`](crate::UnionAll).

use crate::error::BqbResult;
use std::fmt;

/// Anything that can produce query text, or fail with a structural error.
///
/// Nested sources and subquery predicates own a `Box<dyn Render>`, so a query
/// may contain a union that contains queries, to any depth.
pub trait Render: RenderClone + fmt::Debug + Send + Sync {
    /// Render to query text (no leading newline).
    fn render(&self) -> BqbResult<String>;
}

/// Object-safe cloning for boxed renderables.
///
/// Implemented for every `Render + Clone` type; there is no need to
/// implement it by hand.
pub trait RenderClone {
    fn clone_box(&self) -> Box<dyn Render>;
}

impl<T> RenderClone for T
where
    T: Render + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Render> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Render> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Prefix every line of `input` with two spaces, blank lines included.
pub(crate) fn indent(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2 * (input.matches('\n').count() + 1));
    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("  ");
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::indent;

    #[test]
    fn indents_every_line() {
        assert_eq!(indent("a\nb"), "  a\n  b");
    }

    #[test]
    fn indents_blank_lines() {
        assert_eq!(indent("(a)\n\nUNION ALL\n\n(b)"), "  (a)\n  \n  UNION ALL\n  \n  (b)");
    }

    #[test]
    fn indents_single_line() {
        assert_eq!(indent("x"), "  x");
        assert_eq!(indent(""), "  ");
    }
}
