//! TOML query definitions.
//!
//! A definition file describes one root query (`[query]`) or one union
//! (`[[union_all]]` branches), plus the parameters to bind (`[[params]]`).
//! Literal `where` predicates come before `where_query` predicates.

use bqb::{Mod, ParamMod, Query, Render, UnionAll};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionFile {
    pub query: Option<QueryDef>,
    pub union_all: Option<Vec<QueryDef>>,
    #[serde(default)]
    pub params: Vec<ParamDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDef {
    #[serde(default)]
    pub select: Vec<String>,
    pub from: Option<String>,
    pub from_query: Option<Box<SourceDef>>,
    #[serde(default, rename = "where")]
    pub where_clauses: Vec<String>,
    #[serde(default)]
    pub where_query: Vec<WhereQueryDef>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub order_by: Vec<String>,
    pub limit: Option<i64>,
}

/// An aliased nested source: either a single query or a union.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDef {
    pub alias: String,
    pub query: Option<QueryDef>,
    pub union_all: Option<Vec<QueryDef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhereQueryDef {
    /// Clause template with a single `%s` slot.
    pub clause: String,
    pub query: Option<QueryDef>,
    pub union_all: Option<Vec<QueryDef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    String,
    StringList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub value: toml::Value,
}

enum Nested {
    Query(Query),
    Union(UnionAll),
}

fn nested(
    what: &str,
    query: &Option<QueryDef>,
    union_all: &Option<Vec<QueryDef>>,
) -> anyhow::Result<Nested> {
    match (query, union_all) {
        (Some(q), None) => Ok(Nested::Query(q.to_query()?)),
        (None, Some(branches)) => Ok(Nested::Union(union(branches)?)),
        (Some(_), Some(_)) => anyhow::bail!("{what}: set either `query` or `union_all`, not both"),
        (None, None) => anyhow::bail!("{what}: missing `query` or `union_all`"),
    }
}

fn union(branches: &[QueryDef]) -> anyhow::Result<UnionAll> {
    let queries = branches
        .iter()
        .map(QueryDef::to_query)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(bqb::union_all(queries))
}

impl QueryDef {
    /// Convert into a [`Query`]. Shape problems (missing source, two limits, ...)
    /// are left for `bqb` to report when the query is rendered.
    pub fn to_query(&self) -> anyhow::Result<Query> {
        let mut mods: Vec<Mod> = vec![bqb::select(self.select.iter().cloned()).into()];

        if let Some(table) = &self.from {
            mods.push(bqb::from(table.clone()).into());
        }

        if let Some(source) = &self.from_query {
            let what = format!("from_query `{}`", source.alias);
            let m = match nested(&what, &source.query, &source.union_all)? {
                Nested::Query(q) => bqb::from_query(source.alias.clone(), q),
                Nested::Union(u) => bqb::from_query(source.alias.clone(), u),
            };
            mods.push(m.into());
        }

        for clause in &self.where_clauses {
            mods.push(bqb::where_clause(clause.clone()).into());
        }

        for wq in &self.where_query {
            let what = format!("where_query `{}`", wq.clause);
            let m = match nested(&what, &wq.query, &wq.union_all)? {
                Nested::Query(q) => bqb::where_query(wq.clause.clone(), q),
                Nested::Union(u) => bqb::where_query(wq.clause.clone(), u),
            };
            mods.push(m.into());
        }

        mods.push(bqb::group_by(self.group_by.iter().cloned()).into());
        mods.push(bqb::order_by(self.order_by.iter().cloned()).into());

        if let Some(n) = self.limit {
            mods.push(bqb::limit(n).into());
        }

        Ok(Query::new(mods))
    }
}

fn toml_type(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::String(_) => "string",
        toml::Value::Integer(_) => "integer",
        toml::Value::Float(_) => "float",
        toml::Value::Boolean(_) => "boolean",
        toml::Value::Datetime(_) => "datetime",
        toml::Value::Array(_) => "array",
        toml::Value::Table(_) => "table",
    }
}

impl ParamDef {
    pub fn to_param(&self) -> anyhow::Result<ParamMod> {
        let name = self.name.as_str();
        let param = match (self.kind, &self.value) {
            (ParamKind::Bool, toml::Value::Boolean(v)) => bqb::param_bool(name, *v),
            (ParamKind::Int, toml::Value::Integer(v)) => bqb::param_int64(name, *v),
            (ParamKind::Float, toml::Value::Float(v)) => bqb::param_float64(name, *v),
            (ParamKind::Float, toml::Value::Integer(v)) => bqb::param_float64(name, *v as f64),
            (ParamKind::String, toml::Value::String(v)) => bqb::param_str(name, v.as_str()),
            (ParamKind::StringList, toml::Value::Array(items)) => {
                let values = items
                    .iter()
                    .map(|item| match item {
                        toml::Value::String(s) => Ok(s.clone()),
                        other => Err(anyhow::anyhow!(
                            "param `{name}`: string_list items must be strings, got {}",
                            toml_type(other)
                        )),
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                bqb::param_str_slice(name, values)
            }
            (kind, value) => anyhow::bail!(
                "param `{name}`: {kind:?} param cannot take a {} value",
                toml_type(value)
            ),
        };
        Ok(param)
    }
}

impl DefinitionFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read definition file {}: {e}", path.display())
        })?;
        Self::parse(&raw).map_err(|e| anyhow::anyhow!("{}: {e:#}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: DefinitionFile =
            toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse definition: {e}"))?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        match (&self.query, &self.union_all) {
            (Some(_), None) | (None, Some(_)) => {}
            (Some(_), Some(_)) => anyhow::bail!("set either [query] or [[union_all]], not both"),
            (None, None) => anyhow::bail!("missing [query] or [[union_all]]"),
        }
        for p in &self.params {
            if p.name.is_empty() {
                anyhow::bail!("param name must not be empty");
            }
        }
        Ok(())
    }

    /// The root renderable.
    pub fn root(&self) -> anyhow::Result<Box<dyn Render>> {
        match nested("root", &self.query, &self.union_all)? {
            Nested::Query(q) => Ok(Box::new(q)),
            Nested::Union(u) => Ok(Box::new(u)),
        }
    }

    pub fn params(&self) -> anyhow::Result<Vec<ParamMod>> {
        self.params.iter().map(ParamDef::to_param).collect()
    }
}
