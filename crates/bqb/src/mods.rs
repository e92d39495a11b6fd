//! Query fragments ("mods") and their constructors.
//!
//! Every constructor is a pure function that records its arguments and does
//! no validation. Checks happen when the enclosing [`Query`] is rendered, so
//! fragments can be built and reordered freely beforehand.
//!
//! All fragment kinds convert into [`Mod`], which lets [`Query::new`] (and the
//! [`query!`](crate::query!) macro) accept a heterogeneous list:
//!
//! ```ignore
//! use bqb::*;
//!
//! let q = query!(
//!     select(["id", "name"]),
//!     from("my_table"),
//!     where_clause("age > @age"),
//!     order_by(["name ASC"]),
//!     limit(10),
//! );
//! ```

use crate::error::{BqbError, BqbResult};
use crate::ident::is_table_name;
use crate::params::ParamMod;
use crate::query::Query;
use crate::render::{Render, indent};
use crate::union::UnionAll;

/// Substitution slot in a subquery predicate template.
pub const SLOT: &str = "%s";

/// One select-list entry. The text is used verbatim and may be any expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMod {
    pub(crate) column: String,
}

/// A source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromMod {
    pub(crate) table: String,
}

impl FromMod {
    pub(crate) fn validate(&self) -> BqbResult<()> {
        if self.table.is_empty() {
            return Err(BqbError::structural("table cannot be empty"));
        }
        if !is_table_name(&self.table) {
            return Err(BqbError::sanitization(format!(
                "table is unsanitary: {}",
                self.table
            )));
        }
        Ok(())
    }
}

/// An aliased nested query or union used as the source.
#[derive(Debug, Clone)]
pub struct FromQueryMod {
    pub(crate) alias: String,
    pub(crate) query: Box<dyn Render>,
}

/// A filter predicate. Predicates are AND-joined in declaration order.
#[derive(Debug, Clone)]
pub enum WhereMod {
    /// Literal clause text.
    Clause(String),
    /// Clause template with exactly one `%s` slot, filled with a
    /// parenthesized, indented rendering of `query`.
    Subquery {
        template: String,
        query: Box<dyn Render>,
    },
}

impl WhereMod {
    pub(crate) fn render(&self) -> BqbResult<String> {
        match self {
            WhereMod::Clause(clause) => Ok(clause.clone()),
            WhereMod::Subquery { template, query } => {
                if template.matches(SLOT).count() != 1 {
                    return Err(BqbError::template(format!(
                        "subquery clause must have exactly 1 {SLOT} slot: {template}"
                    )));
                }

                // Double parens keep e.g. `UNNEST((<query>))` valid.
                let nested = format!("(\n{}\n)", indent(&query.render()?));
                Ok(template.replacen(SLOT, &nested, 1))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByMod {
    pub(crate) column: String,
}

/// One ORDER BY entry, direction suffix (if any) included verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByMod {
    pub(crate) column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitMod {
    pub(crate) value: i64,
}

/// Any fragment accepted by [`Query::new`].
///
/// `Param`, `Query` and `UnionAll` are accepted so that passing them by
/// mistake produces a descriptive render error instead of being dropped.
#[derive(Debug, Clone)]
pub enum Mod {
    Select(SelectMod),
    From(FromMod),
    FromQuery(FromQueryMod),
    Where(WhereMod),
    GroupBy(GroupByMod),
    OrderBy(OrderByMod),
    Limit(LimitMod),
    /// An ordered run of fragments, flattened on collection.
    Many(Vec<Mod>),
    Param(ParamMod),
    Query(Box<Query>),
    UnionAll(UnionAll),
}

impl Mod {
    /// Short name of the fragment kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Mod::Select(_) => "select",
            Mod::From(_) => "from",
            Mod::FromQuery(_) => "from query",
            Mod::Where(_) => "where",
            Mod::GroupBy(_) => "group by",
            Mod::OrderBy(_) => "order by",
            Mod::Limit(_) => "limit",
            Mod::Many(_) => "fragment list",
            Mod::Param(_) => "param",
            Mod::Query(_) => "query",
            Mod::UnionAll(_) => "union all",
        }
    }
}

impl From<SelectMod> for Mod {
    fn from(m: SelectMod) -> Self {
        Mod::Select(m)
    }
}

impl From<FromMod> for Mod {
    fn from(m: FromMod) -> Self {
        Mod::From(m)
    }
}

impl From<FromQueryMod> for Mod {
    fn from(m: FromQueryMod) -> Self {
        Mod::FromQuery(m)
    }
}

impl From<WhereMod> for Mod {
    fn from(m: WhereMod) -> Self {
        Mod::Where(m)
    }
}

impl From<GroupByMod> for Mod {
    fn from(m: GroupByMod) -> Self {
        Mod::GroupBy(m)
    }
}

impl From<OrderByMod> for Mod {
    fn from(m: OrderByMod) -> Self {
        Mod::OrderBy(m)
    }
}

impl From<LimitMod> for Mod {
    fn from(m: LimitMod) -> Self {
        Mod::Limit(m)
    }
}

impl From<ParamMod> for Mod {
    fn from(m: ParamMod) -> Self {
        Mod::Param(m)
    }
}

impl From<Query> for Mod {
    fn from(q: Query) -> Self {
        Mod::Query(Box::new(q))
    }
}

impl From<UnionAll> for Mod {
    fn from(u: UnionAll) -> Self {
        Mod::UnionAll(u)
    }
}

impl<T: Into<Mod>> From<Vec<T>> for Mod {
    fn from(mods: Vec<T>) -> Self {
        Mod::Many(mods.into_iter().map(Into::into).collect())
    }
}

/// Select-list entries, in order. Each entry is any SQL expression.
pub fn select<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Vec<SelectMod> {
    columns
        .into_iter()
        .map(|c| SelectMod { column: c.into() })
        .collect()
}

/// Read from a table. The name is checked against the table allow-list at render time.
pub fn from(table: impl Into<String>) -> FromMod {
    FromMod {
        table: table.into(),
    }
}

/// Read from a nested query or union, exposed under `alias`.
pub fn from_query(alias: impl Into<String>, query: impl Render + 'static) -> FromQueryMod {
    FromQueryMod {
        alias: alias.into(),
        query: Box::new(query),
    }
}

/// A literal WHERE predicate.
pub fn where_clause(clause: impl Into<String>) -> WhereMod {
    WhereMod::Clause(clause.into())
}

/// A WHERE predicate embedding a subquery at the template's single `%s` slot.
///
/// ```ignore
/// where_query("id IN UNNEST(%s)", query!(select(["id"]), from("other")))
/// ```
pub fn where_query(template: impl Into<String>, query: impl Render + 'static) -> WhereMod {
    WhereMod::Subquery {
        template: template.into(),
        query: Box::new(query),
    }
}

/// GROUP BY entries, in order.
pub fn group_by<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Vec<GroupByMod> {
    columns
        .into_iter()
        .map(|c| GroupByMod { column: c.into() })
        .collect()
}

/// ORDER BY entries, in order, e.g. `order_by(["id", "name DESC"])`.
pub fn order_by<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Vec<OrderByMod> {
    columns
        .into_iter()
        .map(|c| OrderByMod { column: c.into() })
        .collect()
}

pub fn limit(value: i64) -> LimitMod {
    LimitMod { value }
}

/// Combine queries with `UNION ALL`, preserving order.
pub fn union_all(queries: impl IntoIterator<Item = Query>) -> UnionAll {
    UnionAll::new(queries)
}
