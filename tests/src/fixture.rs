//! Schema and rows shared by the integration tests.
//!
//! `T_DOC` holds every document type, told apart by `TYPEID`. Documents
//! carry an extra note in `T_DOC_EXT`. Their positions are an attribute set
//! stored in `T_POS`.

use roundup::schema::{AttributeType, Schema, TableId, TypeId};

pub const SCHEMA_SQL: &str = "
CREATE TABLE T_CUSTOMER (ID INTEGER PRIMARY KEY, NAME TEXT);
CREATE TABLE T_DOC (
    ID INTEGER PRIMARY KEY,
    TYPEID INTEGER NOT NULL,
    NAME TEXT,
    CUSTOMER INTEGER,
    TOTAL REAL,
    PAID INTEGER,
    DUE TEXT
);
CREATE TABLE T_DOC_EXT (ID INTEGER PRIMARY KEY, NOTE TEXT);
CREATE TABLE T_POS (
    ID INTEGER PRIMARY KEY,
    TYPEID INTEGER NOT NULL,
    DOCID INTEGER NOT NULL,
    QTY INTEGER,
    ITEM TEXT
);
";

/// Type ids in `TYPEID`: 1 = Document, 2 = Invoice, 3 = Order, 4 = Positions
pub const SEED_SQL: &str = "
INSERT INTO T_CUSTOMER VALUES (1, 'Acme'), (2, 'Globex');

INSERT INTO T_DOC VALUES
    (1, 1, 'Memo', NULL, NULL, NULL, NULL),
    (2, 2, 'INV-2', 1, 120.5, 1, NULL),
    (3, 2, 'INV-3', 2, 80.0, 0, NULL),
    (4, 3, 'ORD-4', NULL, NULL, NULL, '2026-01-31'),
    (5, 3, 'ORD-5', NULL, NULL, NULL, '2026-02-28'),
    (6, 1, 'Draft', NULL, NULL, NULL, NULL);

INSERT INTO T_DOC_EXT VALUES
    (1, 'first'), (2, 'second'), (3, 'third'), (4, 'fourth'), (5, 'fifth');

INSERT INTO T_POS VALUES
    (100, 4, 2, 3, 'bolt'),
    (101, 4, 2, 5, 'nut'),
    (102, 4, 3, 1, 'gear'),
    (103, 4, 4, 7, 'chain');
";

#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub t_customer: TableId,
    pub t_doc: TableId,
    pub t_doc_ext: TableId,
    pub t_pos: TableId,

    pub customer: TypeId,
    pub document: TypeId,
    pub invoice: TypeId,
    pub order: TypeId,
    pub positions: TypeId,
}

impl Fixture {
    pub fn build() -> (Self, Schema) {
        let mut builder = Schema::builder();

        let t_customer = builder.table("T_CUSTOMER", "ID");
        let t_doc = builder.table_with_discriminator("T_DOC", "ID", "TYPEID");
        let t_doc_ext = builder.table("T_DOC_EXT", "ID");
        let t_pos = builder.table_with_discriminator("T_POS", "ID", "TYPEID");

        let customer = builder
            .ty("Customer", t_customer)
            .attribute("Name", "NAME", AttributeType::String)
            .id();

        let document = builder
            .ty("Document", t_doc)
            .attribute("Name", "NAME", AttributeType::String)
            .attribute_in(t_doc_ext, "Note", &["NOTE"], AttributeType::String)
            .id();

        let invoice = builder
            .ty("Invoice", t_doc)
            .parent(document)
            .attribute("Total", "TOTAL", AttributeType::F64)
            .attribute("Paid", "PAID", AttributeType::Bool)
            .attribute("Customer", "CUSTOMER", AttributeType::Link(customer))
            .id();

        let order = builder
            .ty("Order", t_doc)
            .parent(document)
            .attribute("Due", "DUE", AttributeType::String)
            .id();

        let positions = builder
            .attribute_set(document, "Positions", t_pos)
            .foreign_key("Document", "DOCID")
            .attribute("Quantity", "QTY", AttributeType::I64)
            .attribute("Item", "ITEM", AttributeType::String)
            .id();

        // The seed rows hard-code these
        assert_eq!(
            [document.0, invoice.0, order.0, positions.0],
            [1, 2, 3, 4]
        );

        let fixture = Self {
            t_customer,
            t_doc,
            t_doc_ext,
            t_pos,
            customer,
            document,
            invoice,
            order,
            positions,
        };

        (fixture, builder.build().unwrap())
    }
}
