//! Streaming TSV rendering of tabular results.
//!
//! Rows are pulled from a [`ResultCursor`] one at a time and written straight
//! to the sink, so a query result is never held in memory as a whole.
//!
//! The format is fixed: tab delimiter, one header line of column names, one
//! line per row, NULL as an empty field. A field is wrapped in double quotes
//! only when it contains a tab, newline, carriage return or double quote, and
//! inner double quotes are doubled.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};

/// Characters that force a field to be quoted
const SPECIAL_CHARS: &[char] = &['\t', '\n', '\r', '"'];

/// A single value of a result row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Canonical text of the value, `None` for NULL
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(Cow::Borrowed(text)),
            Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Forward-only access to a tabular result.
///
/// Column names are requested once before any row. `next_row` returns
/// `Ok(None)` when the result is exhausted and `Err` when advancing failed.
/// Implementations release their underlying resources when dropped.
#[cfg_attr(test, mockall::automock)]
pub trait ResultCursor {
    fn columns(&mut self) -> Result<Vec<String>>;
    fn next_row(&mut self) -> Result<Option<Vec<Value>>>;
}

/// In-memory cursor over prepared rows
#[derive(Debug, Clone)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl MemoryCursor {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into_iter(),
        }
    }
}

impl ResultCursor for MemoryCursor {
    fn columns(&mut self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        Ok(self.rows.next())
    }
}

/// Quote a field if it contains a special character
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(SPECIAL_CHARS) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Stream a result set as TSV into `out`, returning the number of rows written.
///
/// Rows written before a cursor failure stay in the sink.
pub fn write_tsv<C, W>(cursor: &mut C, out: &mut W) -> Result<usize>
where
    C: ResultCursor + ?Sized,
    W: Write + ?Sized,
{
    let columns = cursor.columns().context("getting columns")?;
    out.write_all(columns.join("\t").as_bytes())?;
    out.write_all(b"\n")?;

    let mut rows = 0;
    while let Some(row) = cursor.next_row().context("iterating rows")? {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\t")?;
            }
            if let Some(text) = value.render() {
                out.write_all(escape_field(&text).as_bytes())?;
            }
        }
        out.write_all(b"\n")?;
        rows += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use proptest::prelude::*;
    use std::io;

    fn render(columns: &[&str], rows: Vec<Vec<Value>>) -> String {
        let mut cursor = MemoryCursor::new(columns.iter().copied(), rows);
        let mut out = Vec::new();
        write_tsv(&mut cursor, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_simple_values() {
        let out = render(
            &["id", "name"],
            vec![
                vec![1.into(), "Alice".into()],
                vec![2.into(), "Bob".into()],
            ],
        );
        assert_eq!(out, "id\tname\n1\tAlice\n2\tBob\n");
    }

    #[test]
    fn test_special_character_quoting() {
        let cases = [
            ("foo\tbar", "\"foo\tbar\""),
            ("foo\nbar", "\"foo\nbar\""),
            ("foo\rbar", "\"foo\rbar\""),
            ("foo\"bar", "\"foo\"\"bar\""),
            ("foo'bar", "foo'bar"),
            ("foo\"bar'baz", "\"foo\"\"bar'baz\""),
            ("foo\t\"bar\n", "\"foo\t\"\"bar\n\""),
        ];

        for (input, expected) in cases {
            let out = render(&["value"], vec![vec![input.into()]]);
            assert_eq!(out, format!("value\n{}\n", expected), "input {:?}", input);
        }
    }

    #[test]
    fn test_null_and_empty() {
        assert_eq!(render(&["value"], vec![vec![Value::Null]]), "value\n\n");
        assert_eq!(render(&["value"], vec![vec!["".into()]]), "value\n\n");

        let out = render(&["a", "b", "c"], vec![vec![1.into(), Value::Null, 3.into()]]);
        assert_eq!(out, "a\tb\tc\n1\t\t3\n");
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(render(&["data"], vec![vec![b"hello".to_vec().into()]]), "data\nhello\n");
        assert_eq!(render(&["num"], vec![vec![42.into()]]), "num\n42\n");
        assert_eq!(render(&["val"], vec![vec![3.14.into()]]), "val\n3.14\n");
        assert_eq!(render(&["flag"], vec![vec![true.into()]]), "flag\ntrue\n");
        assert_eq!(render(&["opt"], vec![vec![Option::<i64>::None.into()]]), "opt\n\n");
    }

    #[test]
    fn test_empty_result_writes_header_only() {
        assert_eq!(render(&["col"], vec![]), "col\n");
    }

    #[test]
    fn test_multiple_columns() {
        let out = render(
            &["id", "name", "score"],
            vec![
                vec![1.into(), "Alice".into(), 95.5.into()],
                vec![2.into(), "Bob".into(), 87.3.into()],
            ],
        );
        assert_eq!(out, "id\tname\tscore\n1\tAlice\t95.5\n2\tBob\t87.3\n");
    }

    #[test]
    fn test_cursor_failure_keeps_written_rows() {
        let mut cursor = MockResultCursor::new();
        cursor
            .expect_columns()
            .times(1)
            .returning(|| Ok(vec!["pid".to_string()]));
        let mut calls = 0;
        cursor.expect_next_row().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(Some(vec![Value::Int(7)]))
            } else {
                Err(anyhow!("connection reset"))
            }
        });

        let mut out = Vec::new();
        let err = write_tsv(&mut cursor, &mut out).unwrap_err();
        assert!(err.to_string().contains("iterating rows"));
        assert_eq!(out, b"pid\n7\n");
    }

    #[test]
    fn test_column_failure_writes_nothing() {
        let mut cursor = MockResultCursor::new();
        cursor
            .expect_columns()
            .returning(|| Err(anyhow!("statement closed")));
        cursor.expect_next_row().never();

        let mut out = Vec::new();
        assert!(write_tsv(&mut cursor, &mut out).is_err());
        assert!(out.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts() {
        let mut cursor = MemoryCursor::new(["a"], vec![vec![1.into()]]);
        let err = write_tsv(&mut cursor, &mut FailingWriter).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    proptest! {
        #[test]
        fn prop_plain_fields_are_verbatim(field in "[^\t\n\r\"]*") {
            let escaped = escape_field(&field);
            prop_assert_eq!(escaped.as_ref(), field.as_str());
        }

        #[test]
        fn prop_quoted_fields_unescape(field in ".*[\t\n\r\"].*") {
            let escaped = escape_field(&field).into_owned();
            prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'));
            let inner = &escaped[1..escaped.len() - 1];
            prop_assert_eq!(inner.replace("\"\"", "\""), field);
        }
    }
}
