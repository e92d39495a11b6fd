use bqb::prelude::*;
use bqb::{ParamValue, QueryParameter};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("quota exceeded")]
struct QuotaExceeded;

/// Records what it was asked to run and hands back a job id.
#[derive(Default)]
struct RecordingClient {
    calls: RefCell<Vec<(String, Vec<QueryParameter>)>>,
}

impl WarehouseClient for RecordingClient {
    type Query = usize;
    type Error = QuotaExceeded;

    fn query(&self, sql: &str, params: Vec<QueryParameter>) -> Result<usize, QuotaExceeded> {
        let mut calls = self.calls.borrow_mut();
        calls.push((sql.to_string(), params));
        Ok(calls.len())
    }
}

struct RejectingClient;

impl WarehouseClient for RejectingClient {
    type Query = ();
    type Error = QuotaExceeded;

    fn query(&self, _sql: &str, _params: Vec<QueryParameter>) -> Result<(), QuotaExceeded> {
        Err(QuotaExceeded)
    }
}

#[test]
fn forwards_sql_and_params() {
    let client = RecordingClient::default();
    let job = build_with_client(
        &client,
        &query!(select(["id"]), from("users"), where_clause("age > @age")),
        vec![param_int("age", 21)],
    )
    .unwrap();

    assert_eq!(job, 1);
    let calls = client.calls.borrow();
    assert_eq!(calls[0].0, "\nSELECT id,\nFROM users\nWHERE age > @age");
    assert_eq!(
        calls[0].1,
        vec![QueryParameter {
            name: "age".to_string(),
            value: ParamValue::Int64(21),
        }]
    );
}

#[test]
fn client_error_is_mapped() {
    let err = build_with_client(
        &RejectingClient,
        &query!(select(["id"]), from("users")),
        vec![],
    )
    .unwrap_err();

    assert_eq!(err, BqbError::Client("quota exceeded".to_string()));
}

#[test]
fn invalid_query_never_reaches_client() {
    let client = RecordingClient::default();
    let err = build_with_client(&client, &query!(from("users")), vec![]).unwrap_err();

    assert!(err.is_structural());
    assert!(client.calls.borrow().is_empty());
}

#[test]
fn built_query_can_be_submitted_later() {
    let client = RecordingClient::default();
    let built = build(&query!(select(["id"]), from("users")), vec![]).unwrap();
    let sql = built.sql.clone();

    assert_eq!(built.into_client_query(&client).unwrap(), 1);
    assert_eq!(client.calls.borrow()[0].0, sql);
}
