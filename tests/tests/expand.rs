use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use roundup::{
    stmt::{Expr, Value},
    Instance,
};
use tests::Test;

/// (quantity, item) of every line, sorted
fn positions(lines: &IndexMap<String, Vec<Value>>) -> Vec<(i64, String)> {
    let mut positions: Vec<_> = lines["Quantity"]
        .iter()
        .zip(&lines["Item"])
        .map(|(quantity, item)| (quantity.expect_i64(), item.expect_string().to_string()))
        .collect();
    positions.sort();
    positions
}

#[test]
fn attribute_set_expressions_are_recorded() {
    let t = Test::new();
    let f = t.fixture;

    let mut query = t.db.one_round(
        t.documents([2, 3]),
        ["Name", "Positions/Quantity", "Positions/Item"],
    );
    query.execute().unwrap();

    let requests: Vec<_> = query.expand_requests().collect();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].name(), "Positions");
    assert_eq!(requests[0].set(), f.positions);
    assert_eq!(
        requests[0].attributes().collect::<Vec<_>>(),
        vec!["Quantity", "Item"]
    );

    // Paths into the set yield the owner id
    assert!(query.goto_key(3));
    assert_eq!(query.get_value("Positions/Quantity").unwrap(), Value::I64(3));
    assert_eq!(query.get_value("Positions").unwrap(), Value::I64(3));
}

#[test]
fn expand_query_loads_lines_per_owner() {
    let t = Test::new();
    let f = t.fixture;

    let mut query = t
        .db
        .one_round(t.documents([2, 3, 4]), ["Positions/Quantity", "Positions/Item"]);
    query.execute().unwrap();

    let mut expand = query.expand_query("Positions").unwrap();
    expand.execute().unwrap();

    let queries = t.log.queries();
    let select = queries.last().unwrap().body.as_select().unwrap();
    assert_eq!(select.source, f.t_pos);
    assert_eq!(select.returning, ["ID", "TYPEID", "DOCID", "QTY", "ITEM"]);
    assert_eq!(
        select.filter,
        Expr::and(
            Expr::in_list(Expr::column("DOCID"), [2_i64, 3, 4]),
            Expr::eq(Expr::column("TYPEID"), 4_i64),
        )
    );

    assert!(expand.goto_key(2));
    let lines = expand.get_multi_line_value().unwrap();
    assert_eq!(lines.keys().collect::<Vec<_>>(), vec!["Quantity", "Item"]);
    assert_eq!(
        positions(&lines),
        vec![(3, "bolt".to_string()), (5, "nut".to_string())]
    );
    assert_eq!(expand.get_instance().unwrap(), Instance::new(f.document, 2));
    assert_eq!(expand.get_type().unwrap(), f.positions);

    assert!(expand.goto_key(4));
    let lines = expand.get_multi_line_value().unwrap();
    assert_eq!(positions(&lines), vec![(7, "chain".to_string())]);
    assert_eq!(expand.get_value("Quantity").unwrap(), Value::I64(7));

    let mut owners: Vec<i64> = expand
        .get_instances()
        .into_iter()
        .map(|instance| instance.id)
        .collect();
    owners.sort_unstable();
    assert_eq!(owners, vec![2, 3, 4]);
}

#[test]
fn bare_set_name_expands_every_attribute() {
    let t = Test::new();

    let mut query = t.db.one_round(t.documents([2]), ["Positions"]);
    query.execute().unwrap();

    let mut expand = query.expand_query("Positions").unwrap();
    expand.execute().unwrap();

    assert!(expand.next());
    let lines = expand.get_multi_line_value().unwrap();
    assert_eq!(lines.keys().collect::<Vec<_>>(), vec!["Quantity", "Item"]);
    assert_eq!(lines["Quantity"].len(), 2);
}

#[test]
fn expand_without_rows_is_empty() {
    let t = Test::new();
    let f = t.fixture;

    let mut expand = t
        .db
        .expand(t.documents([1, 5]), f.positions, ["Quantity", "Item"])
        .unwrap();
    expand.execute().unwrap();

    assert!(!expand.next());
    assert!(!expand.goto_key(1));
    assert!(!expand.goto_key(5));
    assert!(expand.get_multi_line_value().unwrap().is_empty());
    assert_eq!(expand.get_value("Quantity").unwrap(), Value::Null);
    assert!(expand.get_instances().is_empty());

    let mapping = expand.table_mappings().next().unwrap();
    assert!(mapping.is_expand());
    assert!(!mapping.expand_has_result());
}

#[test]
fn owners_without_lines_are_absent() {
    let t = Test::new();
    let f = t.fixture;

    let mut expand = t
        .db
        .expand(t.documents([1, 3]), f.positions, ["Quantity"])
        .unwrap();
    expand.execute().unwrap();

    assert!(!expand.goto_key(1));
    assert!(expand.goto_key(3));
    assert_eq!(
        expand.get_multi_line_value().unwrap()["Quantity"],
        vec![Value::I64(1)]
    );
}

#[test]
fn multi_line_values_need_an_expand_query() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([2]), ["Name"]);
    query.execute().unwrap();
    assert!(query.next());

    assert!(query.get_multi_line_value().is_err());
    assert!(query.expand_query("Positions").is_err());
}

#[test]
fn expand_requires_attribute_set() {
    let t = Test::new();
    let f = t.fixture;

    assert!(t.db.expand(t.documents([2]), f.document, ["Name"]).is_err());
}
