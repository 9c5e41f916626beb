use roundup_core::{
    err,
    stmt::{Value, ValueRecord},
    Result,
};

use indexmap::IndexMap;

/// In-memory row store the table planners populate.
///
/// Rows are keyed by an integer (the instance id, or the owner id when
/// reading an attribute set) and kept in insertion order. Each row holds a
/// flat value vector addressed by global column index. Results of several
/// statements are merged into the same row when they share a key, each
/// statement writing its own slice of the column space.
///
/// Rows loaded with a sub-key additionally keep every source row as a
/// "line", keyed by the sub-key.
#[derive(Debug, Default)]
pub struct CachedResult {
    rows: IndexMap<i64, CachedRow>,

    /// `None` before the first row; `rows.len()` once exhausted.
    position: Option<usize>,
}

#[derive(Debug, Default)]
struct CachedRow {
    values: Vec<Value>,
    lines: IndexMap<i64, Vec<Value>>,
}

impl CachedResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the rows of one statement.
    ///
    /// Field `i` of each record lands in column `start_index + i`. The key
    /// is read from field `key_index`. With `sub_key_index`, every record
    /// becomes a line of the keyed row and the row's own values are taken
    /// from its first line.
    pub fn populate(
        &mut self,
        rows: Vec<ValueRecord>,
        start_index: usize,
        key_index: usize,
        sub_key_index: Option<usize>,
    ) -> Result<()> {
        for record in rows {
            let key = read_key(&record, key_index)?;
            let width = start_index + record.len();
            let row = self.rows.entry(key).or_default();

            let values = match sub_key_index {
                None => &mut row.values,
                Some(sub_key_index) => {
                    let sub_key = read_key(&record, sub_key_index)?;
                    let first = row.lines.is_empty();
                    let line = row.lines.entry(sub_key).or_default();

                    write(line, width, start_index, record.fields.clone());

                    if !first {
                        continue;
                    }
                    &mut row.values
                }
            };

            write(values, width, start_index, record.fields);
            log::trace!("populated row; key={key}");
        }

        Ok(())
    }

    /// Advances to the next row. Returns `false` once the rows are
    /// exhausted.
    pub fn next(&mut self) -> bool {
        let next = self.position.map_or(0, |position| position + 1);
        self.position = Some(next.min(self.rows.len()));
        next < self.rows.len()
    }

    /// Moves back in front of the first row.
    pub fn before_first(&mut self) {
        self.position = None;
    }

    /// Positions the cursor on the row with the given key. The position is
    /// unchanged when no such row exists.
    pub fn goto_key(&mut self, key: i64) -> bool {
        match self.rows.get_index_of(&key) {
            Some(index) => {
                self.position = Some(index);
                true
            }
            None => false,
        }
    }

    /// Reads a column of the current row. Returns `None` when the cursor is
    /// not on a row or the row has no value for the column.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.current()?.1.values.get(index)
    }

    pub fn get_i64(&self, index: usize) -> Option<i64> {
        self.get(index)?.as_i64()
    }

    /// Key of the current row
    pub fn key(&self) -> Option<i64> {
        self.current().map(|(key, _)| *key)
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    /// Lines of the current row in load order. Each line is addressed by
    /// global column index, like the row itself.
    pub fn lines(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.current()
            .into_iter()
            .flat_map(|(_, row)| row.lines.values().map(Vec::as_slice))
    }

    pub fn is_positioned(&self) -> bool {
        self.current().is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn current(&self) -> Option<(&i64, &CachedRow)> {
        self.rows.get_index(self.position?)
    }
}

fn read_key(record: &ValueRecord, index: usize) -> Result<i64> {
    record
        .fields
        .get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| err!("row key at field {index} is not an integer; record={record:?}"))
}

fn write(dst: &mut Vec<Value>, width: usize, start_index: usize, fields: Vec<Value>) {
    if dst.len() < width {
        dst.resize(width, Value::Null);
    }

    for (offset, value) in fields.into_iter().enumerate() {
        dst[start_index + offset] = value;
    }
}
