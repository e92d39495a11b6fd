//! Finalize a query tree into text plus checked parameters.

use crate::client::{WarehouseClient, submit};
use crate::error::{BqbError, BqbResult};
use crate::ident::extract_param_names;
use crate::params::{ParamMod, QueryParameter};
use crate::render::Render;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::Level;

/// Options for [`build_with_config`].
///
/// By default the finalized SQL is logged at `DEBUG` under the `bqb.sql`
/// target, truncated to 200 bytes.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Emit a tracing event for every successful build.
    pub log_sql: bool,
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate logged SQL (in bytes, at a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            log_sql: true,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl BuildConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable SQL logging.
    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
            _ => sql.into(),
        }
    }

    fn emit(&self, built: &BuiltQuery) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(&built.sql);
        let params = built.params.len();
        emit_at_level!(
            self.level,
            target: "bqb.sql",
            params,
            sql = %sql,
            "built query"
        );
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Finalized query text and the parameters to bind, in the order supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParameter>,
}

impl BuiltQuery {
    /// Hand this query to a warehouse client.
    pub fn into_client_query<C: WarehouseClient>(self, client: &C) -> BqbResult<C::Query> {
        submit(client, &self.sql, self.params)
    }
}

/// Render `root` and check `params` against its `@name` placeholders.
///
/// The text gets a leading newline. The number of distinct placeholder names
/// must equal the number of params supplied, and every supplied param must
/// name a placeholder that appears in the text.
///
/// ```ignore
/// let built = bqb::build(
///     &query!(select(["id"]), from("users"), where_clause("age > @age")),
///     vec![param_int("age", 50)],
/// )?;
/// ```
pub fn build(root: &dyn Render, params: Vec<ParamMod>) -> BqbResult<BuiltQuery> {
    build_with_config(&BuildConfig::default(), root, params)
}

/// [`build`] with explicit logging options.
pub fn build_with_config(
    config: &BuildConfig,
    root: &dyn Render,
    params: Vec<ParamMod>,
) -> BqbResult<BuiltQuery> {
    let built = finalize(root, params).inspect_err(|e| {
        tracing::debug!(target: "bqb.sql", error = %e, "query build failed");
    })?;

    if config.log_sql {
        config.emit(&built);
    }
    Ok(built)
}

/// [`build`], then hand the result to `client`.
pub fn build_with_client<C: WarehouseClient>(
    client: &C,
    root: &dyn Render,
    params: Vec<ParamMod>,
) -> BqbResult<C::Query> {
    build(root, params)?.into_client_query(client)
}

fn finalize(root: &dyn Render, params: Vec<ParamMod>) -> BqbResult<BuiltQuery> {
    let sql = format!("\n{}", root.render()?);

    let names: BTreeSet<&str> = extract_param_names(&sql).into_iter().collect();
    if names.len() != params.len() {
        return Err(BqbError::ParamCount {
            found: names.len(),
            provided: params.len(),
        });
    }

    if let Some(missing) = params.iter().find(|p| !names.contains(p.name())) {
        return Err(BqbError::UnknownParam(missing.name().to_string()));
    }

    let params = params.into_iter().map(QueryParameter::from).collect();
    Ok(BuiltQuery { sql, params })
}
