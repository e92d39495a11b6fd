//! # bqb
//!
//! A composable SQL query builder for BigQuery-style warehouses.
//!
//! ## Features
//!
//! - **Fragments, not strings**: build queries from `select`, `from`, `where_clause`,
//!   `group_by`, `order_by` and `limit` fragments in any order
//! - **Nesting**: subqueries as sources (`from_query`) or inside predicates
//!   (`where_query`), and `UNION ALL` branches, to any depth
//! - **Checked parameters**: `@name` placeholders in the rendered text must line
//!   up exactly with the parameters supplied to [`build`]
//! - **No execution**: the output is text plus ordered parameters for any
//!   [`WarehouseClient`]
//!
//! ## Example
//!
//! ```ignore
//! use bqb::prelude::*;
//!
//! let built = build(
//!     &query!(
//!         select(["id", "name", "age"]),
//!         from("my_table"),
//!         where_clause("age > @age"),
//!         where_clause("name = @name"),
//!     ),
//!     vec![param_int("age", 50), param_str("name", "bob")],
//! )?;
//!
//! assert_eq!(
//!     built.sql,
//!     "\nSELECT id, name, age,\nFROM my_table\nWHERE age > @age\n  AND name = @name"
//! );
//! ```

pub mod build;
pub mod client;
pub mod error;
pub mod ident;
pub mod mods;
pub mod params;
pub mod prelude;
pub mod query;
pub mod render;
pub mod union;

pub use build::{BuildConfig, BuiltQuery, build, build_with_client, build_with_config};
pub use client::WarehouseClient;
pub use error::{BqbError, BqbResult};
pub use ident::{
    extract_param_names, is_column_name, is_table_name, sanitize_column_name, sanitize_table_name,
};
pub use mods::{
    FromMod, FromQueryMod, GroupByMod, LimitMod, Mod, OrderByMod, SelectMod, WhereMod, from,
    from_query, group_by, limit, order_by, select, union_all, where_clause, where_query,
};
pub use params::{
    ParamMod, ParamValue, QueryParameter, param_bool, param_display, param_float64, param_int,
    param_int64, param_str, param_str_slice,
};
pub use query::Query;
pub use render::Render;
pub use union::UnionAll;
