//! `UNION ALL` over several queries.

use crate::error::{BqbError, BqbResult};
use crate::query::Query;
use crate::render::Render;

const UNION_ALL_SEPARATOR: &str = "\n\nUNION ALL\n\n";

/// Queries combined with `UNION ALL`, rendered in declaration order.
///
/// Each branch is wrapped in parentheses:
///
/// ```text
/// (SELECT a,
/// FROM t1)
///
/// UNION ALL
///
/// (SELECT a,
/// FROM t2)
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnionAll {
    queries: Vec<Query>,
}

impl UnionAll {
    pub fn new(queries: impl IntoIterator<Item = Query>) -> Self {
        Self {
            queries: queries.into_iter().collect(),
        }
    }

    /// Append another branch.
    pub fn push(mut self, query: Query) -> Self {
        self.queries.push(query);
        self
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl Render for UnionAll {
    fn render(&self) -> BqbResult<String> {
        if self.queries.is_empty() {
            return Err(BqbError::structural("union must have at least 1 query"));
        }

        let branches = self
            .queries
            .iter()
            .map(|q| q.render().map(|sql| format!("({sql})")))
            .collect::<BqbResult<Vec<_>>>()?;

        Ok(branches.join(UNION_ALL_SEPARATOR))
    }
}

/// Build a [`UnionAll`] from a list of queries.
#[macro_export]
macro_rules! union_all {
    ($($q:expr),* $(,)?) => {{
        let queries: ::std::vec::Vec<$crate::Query> = ::std::vec![$($q),*];
        $crate::UnionAll::new(queries)
    }};
}
