use crate::stmt::ValueRecord;

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, one record per row
    Values(Vec<ValueRecord>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<ValueRecord>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    #[track_caller]
    pub fn into_values(self) -> Vec<ValueRecord> {
        match self {
            Self::Values(values) => values,
            _ => panic!("expected row values; rows={self:#?}"),
        }
    }
}
