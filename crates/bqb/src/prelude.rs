//! Convenient imports for typical `bqb` usage.
//!
//! ```ignore
//! use bqb::prelude::*;
//! ```

pub use crate::{
    BqbError, BqbResult, BuiltQuery, Mod, Query, Render, UnionAll, WarehouseClient, build,
    build_with_client, from, from_query, group_by, limit, order_by, param_bool, param_display,
    param_float64, param_int, param_int64, param_str, param_str_slice, query, select, union_all,
    where_clause, where_query,
};
