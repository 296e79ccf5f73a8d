use anyhow::{Context, Result};
use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo};
use tokio::runtime::Runtime;

use crate::utils::tsv::{ResultCursor, Value};

/// Row stream of one query, driven synchronously on the session runtime.
///
/// The query runs over the simple protocol, so every value arrives as text.
/// Booleans, integers, floats and bytea are parsed into their typed
/// [`Value`]; everything else is kept as the server's text.
/// Dropping the cursor before the end abandons the remaining rows; the
/// connection discards them before its next query.
pub struct PgCursor<'c> {
    runtime: &'c Runtime,
    columns: Option<Vec<String>>,
    rows: BoxStream<'c, Result<PgRow, sqlx::Error>>,
}

impl<'c> PgCursor<'c> {
    /// Describe `sql` for its column names, then start streaming its rows
    pub fn open(runtime: &'c Runtime, conn: &'c mut PgConnection, sql: &'c str) -> Result<Self> {
        let columns = runtime
            .block_on(async {
                let statement = (&mut *conn).prepare(sql).await?;
                Ok::<_, sqlx::Error>(
                    statement
                        .columns()
                        .iter()
                        .map(|column| column.name().to_string())
                        .collect::<Vec<_>>(),
                )
            })
            .context("query failed")?;

        let rows = sqlx::raw_sql(sql).fetch(conn);

        Ok(Self {
            runtime,
            columns: Some(columns),
            rows,
        })
    }
}

impl ResultCursor for PgCursor<'_> {
    fn columns(&mut self) -> Result<Vec<String>> {
        Ok(self.columns.take().unwrap_or_default())
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        let row = match self.runtime.block_on(self.rows.try_next())? {
            Some(row) => row,
            None => return Ok(None),
        };

        let mut values = Vec::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            let value = decode_column(&row, index, ColumnKind::of(column.type_info().name()))
                .context(format!("scanning column {}", column.name()))?;
            values.push(value);
        }
        Ok(Some(values))
    }
}

/// How a column is turned into a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bytes,
    Text,
}

impl ColumnKind {
    fn of(type_name: &str) -> Self {
        match type_name {
            "BOOL" => ColumnKind::Bool,
            "INT2" => ColumnKind::Int2,
            "INT4" => ColumnKind::Int4,
            "INT8" => ColumnKind::Int8,
            "FLOAT4" => ColumnKind::Float4,
            "FLOAT8" => ColumnKind::Float8,
            "BYTEA" => ColumnKind::Bytes,
            _ => ColumnKind::Text,
        }
    }
}

// Values arrive in text format; sqlx parses them per type, including the
// `\x` hex form of bytea.
fn decode_column(row: &PgRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    Ok(match kind {
        ColumnKind::Bool => row.try_get::<Option<bool>, _>(index)?.into(),
        ColumnKind::Int2 => row.try_get::<Option<i16>, _>(index)?.map(i64::from).into(),
        ColumnKind::Int4 => row.try_get::<Option<i32>, _>(index)?.into(),
        ColumnKind::Int8 => row.try_get::<Option<i64>, _>(index)?.into(),
        // parsed at double precision so `0.1` stays `0.1`
        ColumnKind::Float4 => row.try_get_unchecked::<Option<f64>, _>(index)?.into(),
        ColumnKind::Float8 => row.try_get::<Option<f64>, _>(index)?.into(),
        ColumnKind::Bytes => row.try_get::<Option<Vec<u8>>, _>(index)?.into(),
        ColumnKind::Text => row.try_get_unchecked::<Option<&str>, _>(index)?.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kinds() {
        assert_eq!(ColumnKind::of("BOOL"), ColumnKind::Bool);
        assert_eq!(ColumnKind::of("INT2"), ColumnKind::Int2);
        assert_eq!(ColumnKind::of("INT4"), ColumnKind::Int4);
        assert_eq!(ColumnKind::of("INT8"), ColumnKind::Int8);
        assert_eq!(ColumnKind::of("FLOAT4"), ColumnKind::Float4);
        assert_eq!(ColumnKind::of("FLOAT8"), ColumnKind::Float8);
        assert_eq!(ColumnKind::of("BYTEA"), ColumnKind::Bytes);
    }

    #[test]
    fn test_other_types_stay_text() {
        for name in ["NUMERIC", "TEXT", "NAME", "OID", "TIMESTAMPTZ", "INTERVAL", "TEXT[]", "UNKNOWN"] {
            assert_eq!(ColumnKind::of(name), ColumnKind::Text, "{}", name);
        }
    }
}
