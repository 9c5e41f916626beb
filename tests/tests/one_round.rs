use pretty_assertions::assert_eq;
use roundup::{driver::operation::Transaction::*, stmt::Value, Instance};
use std::collections::BTreeMap;
use tests::Test;

#[test]
fn values_round_trip_across_tables() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents(1..=5), ["Name", "Note"]);
    query.execute().unwrap();

    let mut actual = BTreeMap::new();
    while query.next() {
        let id = query.get_instance().unwrap().id;
        let name = query.get_value("Name").unwrap();
        let note = query.get_value("Note").unwrap();
        actual.insert(id, (name, note));
    }

    let expected: BTreeMap<_, _> = [
        (1, ("Memo", "first")),
        (2, ("INV-2", "second")),
        (3, ("INV-3", "third")),
        (4, ("ORD-4", "fourth")),
        (5, ("ORD-5", "fifth")),
    ]
    .into_iter()
    .map(|(id, (name, note))| (id, (Value::from(name), Value::from(note))))
    .collect();

    assert_eq!(actual, expected);

    // One statement per table
    assert_eq!(t.log.queries().len(), 2);
}

#[test]
fn column_space_is_disjoint_and_contiguous() {
    let t = Test::new();
    let f = t.fixture;

    let instances = [
        Instance::new(f.document, 1),
        Instance::new(f.invoice, 2),
        Instance::new(f.order, 4),
    ];

    let mut query = t.db.one_round(instances, ["Name", "Note", "Total", "Due"]);
    query.execute().unwrap();

    let tables: Vec<_> = query.table_mappings().map(|mapping| mapping.table()).collect();
    assert_eq!(tables, vec![f.t_doc, f.t_doc_ext]);

    let mut indices: Vec<usize> = query
        .table_mappings()
        .flat_map(|mapping| mapping.indices())
        .collect();
    indices.sort_unstable();

    let expected: Vec<usize> = (0..indices.len()).collect();
    assert_eq!(indices, expected);

    let widths: Vec<usize> = query
        .table_mappings()
        .map(|mapping| mapping.columns().len())
        .collect();
    assert_eq!(widths, vec![5, 2]);
}

#[test]
fn typed_attribute_values() {
    let t = Test::new();
    let f = t.fixture;

    let mut query = t.db.one_round(
        [Instance::new(f.invoice, 2), Instance::new(f.invoice, 3)],
        ["Total", "Paid", "Customer"],
    );
    query.execute().unwrap();

    assert!(query.goto_key(2));
    assert_eq!(query.get_value("Total").unwrap(), Value::F64(120.5));
    assert_eq!(query.get_value("Paid").unwrap(), Value::Bool(true));
    assert_eq!(
        query.get_value("Customer").unwrap(),
        Value::Instance(Instance::new(f.customer, 1))
    );

    assert!(query.goto_key(3));
    assert_eq!(query.get_value("Total").unwrap(), Value::F64(80.0));
    assert_eq!(query.get_value("Paid").unwrap(), Value::Bool(false));
}

#[test]
fn unresolvable_expression_is_distinct_from_null() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([6]), ["Name", "Note", "Nope"]);
    query.execute().unwrap();

    assert!(query.next());

    // No T_DOC_EXT row for document 6
    assert_eq!(query.try_value("Note").unwrap(), Some(Value::Null));
    assert_eq!(query.try_value("Nope").unwrap(), None);
    assert_eq!(query.get_value("Nope").unwrap(), Value::Null);
    assert_eq!(query.get_value("Name").unwrap(), Value::from("Draft"));
    assert!(query.get_attribute("Nope").is_none());
    assert_eq!(query.get_attribute("Name").unwrap().column(), "NAME");
}

#[test]
fn id_pseudo_attribute() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([1, 3]), ["ID", "Name"]);
    query.execute().unwrap();

    assert!(query.goto_key(3));
    assert_eq!(query.get_value("ID").unwrap(), Value::I64(3));
}

#[test]
fn reposition_cursor() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([1, 2, 3]), ["Name"]);
    query.execute().unwrap();

    assert!(!query.goto_key(99));
    assert!(query.goto_key(3));
    assert_eq!(query.get_value("Name").unwrap(), Value::from("INV-3"));

    query.before_first();
    assert_eq!(query.try_value("Name").unwrap(), None);

    let mut count = 0;
    while query.next() {
        count += 1;
    }
    assert_eq!(count, 3);
    assert!(query.get_instance().is_err());
}

#[test]
fn missing_rows_are_skipped() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([1, 42]), ["Name"]);
    query.execute().unwrap();

    assert_eq!(query.cursor().keys().collect::<Vec<_>>(), vec![1]);
    assert_eq!(query.get_instances(), t.documents([1, 42]));
}

#[test]
fn statements_commit() {
    let t = Test::new();
    let mut query = t.db.one_round(t.documents([1]), ["Name"]);
    query.execute().unwrap();

    assert_eq!(t.log.transactions(), vec![Start, Commit]);
    assert_eq!(t.log.failures(), 0);
}
