use super::Serializer;

use roundup_core::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl<'a> Serializer<'a> {
    pub fn sqlite(schema: &'a Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql(schema: &'a Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql(schema: &'a Schema) -> Serializer<'a> {
        Serializer {
            schema,
            flavor: Flavor::Mysql,
        }
    }

    pub(super) fn is_mysql(&self) -> bool {
        self.flavor == Flavor::Mysql
    }

    pub(super) fn is_postgresql(&self) -> bool {
        self.flavor == Flavor::Postgresql
    }
}
