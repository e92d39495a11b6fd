//! Execution client seam.
//!
//! bqb never runs queries. A warehouse driver implements [`WarehouseClient`]
//! to turn finalized text and parameters into whatever query object it
//! executes.

use crate::error::{BqbError, BqbResult};
use crate::params::QueryParameter;

/// A client able to accept a finalized query.
pub trait WarehouseClient {
    /// The driver's query handle.
    type Query;
    /// The driver's error type.
    type Error: std::error::Error;

    /// Create a query object from SQL text and ordered named parameters.
    fn query(&self, sql: &str, params: Vec<QueryParameter>) -> Result<Self::Query, Self::Error>;
}

pub(crate) fn submit<C: WarehouseClient>(
    client: &C,
    sql: &str,
    params: Vec<QueryParameter>,
) -> BqbResult<C::Query> {
    client
        .query(sql, params)
        .map_err(|e| BqbError::Client(e.to_string()))
}
