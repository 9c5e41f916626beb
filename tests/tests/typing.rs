use pretty_assertions::assert_eq;
use roundup::{stmt::Value, Instance};
use tests::Test;

#[test]
fn row_type_follows_discriminator() {
    let t = Test::new();
    let f = t.fixture;

    // Every instance is passed in as a plain document
    let mut query = t.db.one_round(t.documents([1, 2, 4]), ["Name"]);
    query.execute().unwrap();

    for (id, ty) in [(1, f.document), (2, f.invoice), (4, f.order)] {
        assert!(query.goto_key(id));
        assert_eq!(query.get_type().unwrap(), ty);
        assert_eq!(query.get_instance().unwrap(), Instance::new(ty, id));
    }
}

#[test]
fn row_without_discriminator_uses_input_type() {
    let t = Test::new();
    let f = t.fixture;

    let mut query = t.db.one_round([Instance::new(f.customer, 2)], ["Name"]);
    query.execute().unwrap();

    assert!(query.next());
    assert_eq!(query.get_type().unwrap(), f.customer);
    assert_eq!(query.get_value("Name").unwrap(), Value::from("Globex"));
}

#[test]
fn parent_attribute_fallback() {
    let t = Test::new();
    let f = t.fixture;

    let instances = [
        Instance::new(f.invoice, 2),
        Instance::new(f.invoice, 3),
        Instance::new(f.document, 1),
        Instance::new(f.order, 4),
    ];

    let mut query = t.db.one_round(instances, ["Name", "Total"]);
    query.execute().unwrap();

    for (id, name) in [(2, "INV-2"), (3, "INV-3"), (1, "Memo"), (4, "ORD-4")] {
        assert!(query.goto_key(id));
        assert_eq!(query.get_value("Name").unwrap(), Value::from(name));
    }

    assert!(query.goto_key(2));
    assert_eq!(query.get_value("Total").unwrap(), Value::F64(120.5));

    // Documents and orders know no `Total`
    assert!(query.goto_key(1));
    assert_eq!(query.try_value("Total").unwrap(), None);
    assert!(query.goto_key(4));
    assert_eq!(query.try_value("Total").unwrap(), None);
}

#[test]
fn sibling_types_share_one_statement() {
    let t = Test::new();
    let f = t.fixture;

    let instances = [
        Instance::new(f.invoice, 2),
        Instance::new(f.order, 4),
        Instance::new(f.document, 1),
    ];

    let mut query = t.db.one_round(instances, ["Name", "Total", "Due"]);
    query.execute().unwrap();

    let queries = t.log.queries();
    assert_eq!(queries.len(), 1);

    let select = queries[0].body.as_select().unwrap();
    assert_eq!(select.source, f.t_doc);
    assert_eq!(select.returning, ["ID", "TYPEID", "NAME", "TOTAL", "DUE"]);
    assert_eq!(select.filter.as_in_list().unwrap().len(), 3);

    assert!(query.goto_key(4));
    assert_eq!(query.get_value("Due").unwrap(), Value::from("2026-01-31"));
}

#[test]
fn unknown_discriminator_is_an_error() {
    let t = Test::with_sql("INSERT INTO T_DOC (ID, TYPEID, NAME) VALUES (7, 42, 'Ghost');");
    let mut query = t.db.one_round(t.documents([7]), ["Name"]);
    query.execute().unwrap();

    assert!(query.next());
    let err = query.get_type().unwrap_err();
    assert!(err.is_unknown_type());
    assert!(query.get_value("Name").is_err());
}

#[test]
fn unrelated_types_with_equal_ids_share_a_row() {
    let t = Test::new();
    let f = t.fixture;

    let instances = [Instance::new(f.customer, 2), Instance::new(f.document, 2)];
    let mut query = t.db.one_round(instances, ["Name"]);
    query.execute().unwrap();

    assert!(query.next());
    assert_eq!(query.get_type().unwrap(), f.invoice);
    assert_eq!(query.get_value("Name").unwrap(), Value::from("INV-2"));
    assert!(!query.next());
}
