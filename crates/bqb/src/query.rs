//! The SELECT query composite.

use crate::error::{BqbError, BqbResult};
use crate::mods::{
    FromMod, FromQueryMod, GroupByMod, LimitMod, Mod, OrderByMod, SelectMod, WhereMod,
};
use crate::render::{Render, indent};

/// A SELECT statement assembled from fragments.
///
/// Fragments are classified by kind when the query is created and validated
/// when it is rendered. Rendering never mutates the query.
///
/// Output layout:
///
/// ```text
/// SELECT a, b,
/// FROM t
/// WHERE x = @x
///   AND y > 1
/// GROUP BY a
/// ORDER BY b DESC
/// LIMIT 10
/// ```
///
/// Every select entry is followed by a comma, including the last one.
#[derive(Debug, Clone, Default)]
pub struct Query {
    select_mods: Vec<SelectMod>,
    from_mods: Vec<FromMod>,
    from_query_mods: Vec<FromQueryMod>,
    where_mods: Vec<WhereMod>,
    group_by_mods: Vec<GroupByMod>,
    order_by_mods: Vec<OrderByMod>,
    limit_mods: Vec<LimitMod>,
    unknown_mods: Vec<Mod>,
}

impl Query {
    /// Collect `mods` into a query, keeping the declaration order within each kind.
    pub fn new(mods: impl IntoIterator<Item = Mod>) -> Self {
        let mut q = Self::default();
        for m in mods {
            q.collect(m);
        }
        q
    }

    fn collect(&mut self, m: Mod) {
        match m {
            Mod::Select(m) => self.select_mods.push(m),
            Mod::From(m) => self.from_mods.push(m),
            Mod::FromQuery(m) => self.from_query_mods.push(m),
            Mod::Where(m) => self.where_mods.push(m),
            Mod::GroupBy(m) => self.group_by_mods.push(m),
            Mod::OrderBy(m) => self.order_by_mods.push(m),
            Mod::Limit(m) => self.limit_mods.push(m),
            Mod::Many(mods) => {
                for m in mods {
                    self.collect(m);
                }
            }
            other @ (Mod::Param(_) | Mod::Query(_) | Mod::UnionAll(_)) => {
                self.unknown_mods.push(other)
            }
        }
    }

    /// Append a literal WHERE predicate.
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_mods.push(WhereMod::Clause(clause.into()));
        self
    }

    /// Append a LIMIT. A query with more than one limit fails to render.
    pub fn limit(mut self, value: i64) -> Self {
        self.limit_mods.push(LimitMod { value });
        self
    }

    /// Check the query's shape.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// source count, limit count, non-empty select list, stray fragments.
    pub fn validate(&self) -> BqbResult<()> {
        if self.from_mods.len() + self.from_query_mods.len() != 1 {
            return Err(BqbError::structural("must have exactly 1 from clause"));
        }
        if self.limit_mods.len() > 1 {
            return Err(BqbError::structural(
                "cannot have more than 1 limit clause",
            ));
        }
        if self.select_mods.is_empty() {
            return Err(BqbError::structural("must have at least 1 select clause"));
        }
        if let Some(first) = self.unknown_mods.first() {
            if let Mod::Param(p) = first {
                return Err(BqbError::structural(format!(
                    "param bindings are only accepted at finalize time: {}",
                    p.name()
                )));
            }
            return Err(BqbError::structural(format!(
                "unknown fragment: {}",
                first.kind()
            )));
        }
        Ok(())
    }

    fn render_from(&self, sql: &mut String) -> BqbResult<()> {
        if let Some(from) = self.from_mods.first() {
            from.validate()?;
            sql.push_str("\nFROM ");
            sql.push_str(&from.table);
        } else if let Some(from) = self.from_query_mods.first() {
            let nested = from.query.render()?;
            sql.push_str("\nFROM (\n");
            sql.push_str(&indent(&nested));
            sql.push_str("\n) AS ");
            sql.push_str(&from.alias);
        }
        Ok(())
    }
}

impl Render for Query {
    fn render(&self) -> BqbResult<String> {
        self.validate()?;

        let mut sql = String::from("SELECT");
        for m in &self.select_mods {
            sql.push(' ');
            sql.push_str(&m.column);
            sql.push(',');
        }

        self.render_from(&mut sql)?;

        for (i, m) in self.where_mods.iter().enumerate() {
            sql.push_str(if i == 0 { "\nWHERE " } else { "\n  AND " });
            sql.push_str(&m.render()?);
        }

        if !self.group_by_mods.is_empty() {
            sql.push_str("\nGROUP BY ");
            push_joined(&mut sql, self.group_by_mods.iter().map(|m| m.column.as_str()));
        }

        if !self.order_by_mods.is_empty() {
            sql.push_str("\nORDER BY ");
            push_joined(&mut sql, self.order_by_mods.iter().map(|m| m.column.as_str()));
        }

        if let Some(limit) = self.limit_mods.first() {
            sql.push_str(&format!("\nLIMIT {}", limit.value));
        }

        Ok(sql)
    }
}

fn push_joined<'a>(sql: &mut String, items: impl Iterator<Item = &'a str>) {
    for (i, item) in items.enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(item);
    }
}

/// Build a [`Query`] from a list of fragments.
///
/// ```ignore
/// let q = bqb::query!(select(["id"]), from("my_table"), limit(1));
/// ```
#[macro_export]
macro_rules! query {
    ($($m:expr),* $(,)?) => {{
        let mods: ::std::vec::Vec<$crate::Mod> = ::std::vec![$($crate::Mod::from($m)),*];
        $crate::Query::new(mods)
    }};
}

#[cfg(test)]
mod tests;
