use pretty_assertions::assert_eq;
use roundup::stmt::Value;
use tests::Test;

#[test]
fn long_id_lists_are_unioned() {
    let t = Test::with_url("sqlite::memory:?max_expressions=2");
    let mut query = t.db.one_round(t.documents(1..=5), ["Name"]);
    query.execute().unwrap();

    let queries = t.log.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].body.is_union());
    assert_eq!(queries[0].body.selects().count(), 3);

    let mut keys: Vec<i64> = query.cursor().keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);

    assert!(query.goto_key(5));
    assert_eq!(query.get_value("Name").unwrap(), Value::from("ORD-5"));
}

#[test]
fn redundant_instances_collapse() {
    let t = Test::with_url("sqlite::memory:?max_expressions=2");
    let mut instances = t.documents(1..=5);
    instances.extend(t.documents([2, 4]));

    let mut query = t.db.one_round(instances, ["Name"]);
    query.execute().unwrap();

    assert_eq!(t.log.queries()[0].body.selects().count(), 3);
    assert_eq!(query.cursor().len(), 5);
}

#[test]
fn unbounded_reads_in_one_select() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents(1..=5), ["Name"]);
    query.execute().unwrap();

    let queries = t.log.queries();
    assert!(!queries[0].body.is_union());
    assert_eq!(query.cursor().len(), 5);
}
