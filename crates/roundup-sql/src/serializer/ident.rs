use super::{Formatter, Params, ToSql};

/// A quoted identifier
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quote = if f.serializer.is_mysql() { '`' } else { '"' };

        f.dst.push(quote);
        for ch in self.0.as_ref().chars() {
            if ch == quote {
                f.dst.push(quote);
            }
            f.dst.push(ch);
        }
        f.dst.push(quote);
    }
}
