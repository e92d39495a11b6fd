use super::*;
use crate::mods::{from, from_query, group_by, limit, order_by, select, where_clause, where_query};
use crate::params::param_int;
use crate::query;
use crate::union::UnionAll;

#[test]
fn test_select_has_trailing_comma() {
    let q = query!(select(["id", "name"]), from("t"));
    assert_eq!(q.render().unwrap(), "SELECT id, name,\nFROM t");
}

#[test]
fn test_where_and_joined() {
    let q = query!(
        select(["id", "name", "age"]),
        from("my_table"),
        where_clause("age > 50"),
        where_clause("name = 'bob'"),
    );
    assert_eq!(
        q.render().unwrap(),
        "SELECT id, name, age,\nFROM my_table\nWHERE age > 50\n  AND name = 'bob'"
    );
}

#[test]
fn test_fragment_order_does_not_matter() {
    let a = query!(
        limit(5),
        order_by(["id"]),
        where_clause("x = 1"),
        from("t"),
        select(["id"]),
    );
    let b = query!(
        select(["id"]),
        from("t"),
        where_clause("x = 1"),
        order_by(["id"]),
        limit(5),
    );
    assert_eq!(a.render().unwrap(), b.render().unwrap());
}

#[test]
fn test_group_order_limit() {
    let q = query!(
        select(["id", "COUNT(*) AS n"]),
        from("t"),
        group_by(["id", "name"]),
        order_by(["n DESC", "id"]),
        limit(3),
    );
    assert_eq!(
        q.render().unwrap(),
        "SELECT id, COUNT(*) AS n,\nFROM t\nGROUP BY id, name\nORDER BY n DESC, id\nLIMIT 3"
    );
}

#[test]
fn test_builder_helpers_append() {
    let q = query!(select(["id"]), from("t"))
        .where_clause("a = 1")
        .where_clause("b = 2")
        .limit(1);
    assert_eq!(
        q.render().unwrap(),
        "SELECT id,\nFROM t\nWHERE a = 1\n  AND b = 2\nLIMIT 1"
    );
}

#[test]
fn test_render_does_not_mutate() {
    let q = query!(select(["id"]), from("t"), where_clause("a = 1"));
    assert_eq!(q.render().unwrap(), q.render().unwrap());
}

#[test]
fn test_missing_from() {
    let err = query!(select(["id"])).render().unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("must have exactly 1 from clause".to_string())
    );
}

#[test]
fn test_two_sources() {
    let inner = query!(select(["id"]), from("a"));
    let err = query!(select(["id"]), from("b"), from_query("sub", inner))
        .render()
        .unwrap_err();
    assert!(err.is_structural());

    let err = query!(select(["id"]), from("a"), from("b"))
        .render()
        .unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_two_limits() {
    let err = query!(select(["id"]), from("t"), limit(1))
        .limit(2)
        .render()
        .unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("cannot have more than 1 limit clause".to_string())
    );
}

#[test]
fn test_empty_select() {
    let err = query!(from("t")).render().unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("must have at least 1 select clause".to_string())
    );

    // An empty select list is the same as none.
    let err = query!(select(Vec::<String>::new()), from("t"))
        .render()
        .unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_validation_order() {
    // No source and no select: source count is reported first.
    let err = query!(limit(1), limit(2)).render().unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("must have exactly 1 from clause".to_string())
    );

    // Two limits and no select: limit count is reported before select.
    let err = query!(from("t"), limit(1), limit(2)).render().unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("cannot have more than 1 limit clause".to_string())
    );
}

#[test]
fn test_param_inside_query_is_rejected() {
    let err = query!(select(["id"]), from("t"), param_int("age", 1))
        .render()
        .unwrap_err();
    match err {
        BqbError::Structural(msg) => {
            assert!(msg.starts_with("param bindings are only accepted at finalize time"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_stray_composite_is_unknown() {
    let branch = query!(select(["a"]), from("t"));
    let err = query!(select(["id"]), from("t"), UnionAll::new([branch]))
        .render()
        .unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("unknown fragment: union all".to_string())
    );

    let nested = query!(select(["a"]), from("t"));
    let err = query!(select(["id"]), from("t"), nested)
        .render()
        .unwrap_err();
    assert_eq!(err, BqbError::Structural("unknown fragment: query".to_string()));
}

#[test]
fn test_unsanitary_table() {
    let err = query!(select(["id"]), from("t; DROP TABLE t"))
        .render()
        .unwrap_err();
    assert!(err.is_sanitization());

    let err = query!(select(["id"]), from("")).render().unwrap_err();
    assert_eq!(err, BqbError::Structural("table cannot be empty".to_string()));
}

#[test]
fn test_qualified_table() {
    let q = query!(select(["id"]), from("my-project.dataset.events"));
    assert_eq!(
        q.render().unwrap(),
        "SELECT id,\nFROM my-project.dataset.events"
    );
}

#[test]
fn test_from_query() {
    let q = query!(
        select(["id"]),
        from_query("my_sub_query", query!(select(["id"]), from("my_table"))),
    );
    assert_eq!(
        q.render().unwrap(),
        "SELECT id,\nFROM (\n  SELECT id,\n  FROM my_table\n) AS my_sub_query"
    );
}

#[test]
fn test_nested_indentation_is_recursive() {
    let innermost = query!(select(["id"]), from("t"), where_clause("a = 1"));
    let middle = query!(select(["id"]), from_query("inner", innermost));
    let outer = query!(select(["id"]), from_query("middle", middle));
    assert_eq!(
        outer.render().unwrap(),
        "SELECT id,
FROM (
  SELECT id,
  FROM (
    SELECT id,
    FROM t
    WHERE a = 1
  ) AS inner
) AS middle"
    );
}

#[test]
fn test_from_union_indents_blank_lines() {
    let u = UnionAll::new([
        query!(select(["a"]), from("t1")),
        query!(select(["a"]), from("t2")),
    ]);
    let q = query!(select(["a"]), from_query("sub", u));
    assert_eq!(
        q.render().unwrap(),
        "SELECT a,\nFROM (\n  (SELECT a,\n  FROM t1)\n  \n  UNION ALL\n  \n  (SELECT a,\n  FROM t2)\n) AS sub"
    );
}

#[test]
fn test_where_query_after_literal() {
    let q = query!(
        select(["id"]),
        from("t"),
        where_clause("a = 1"),
        where_query("id IN UNNEST(%s)", query!(select(["id"]), from("u"))),
    );
    assert_eq!(
        q.render().unwrap(),
        "SELECT id,\nFROM t\nWHERE a = 1\n  AND id IN UNNEST((\n  SELECT id,\n  FROM u\n))"
    );
}

#[test]
fn test_nested_failure_propagates() {
    let broken = query!(select(["id"]));
    let err = query!(select(["id"]), from_query("sub", broken))
        .render()
        .unwrap_err();
    assert_eq!(
        err,
        BqbError::Structural("must have exactly 1 from clause".to_string())
    );

    let unsanitary = query!(select(["id"]), from("bad name"));
    let err = query!(
        select(["id"]),
        from("t"),
        where_query("id IN (%s)", unsanitary),
    )
    .render()
    .unwrap_err();
    assert!(err.is_sanitization());
}

#[test]
fn test_clone_renders_identically() {
    let q = query!(
        select(["id"]),
        from_query("sub", query!(select(["id"]), from("t"))),
        where_query("id IN UNNEST(%s)", query!(select(["id"]), from("u"))),
    );
    let copy = q.clone();
    assert_eq!(q.render().unwrap(), copy.render().unwrap());
}
