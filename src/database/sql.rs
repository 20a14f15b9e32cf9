//! Parameterized SQL fragments and the scalar values bound into them.
//!
//! `sql_for_partial_update` turns a sparse set of changed fields into the
//! `SET` portion of an `UPDATE` statement. Column names are quoted and every
//! value travels as a positional parameter, never as SQL text.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use sqlx::{postgres::PgArguments, postgres::PgRow, FromRow, Postgres};

use super::manager::DatabaseError;

/// A scalar the Postgres driver can bind as a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Bound as a text-typed NULL, so only text columns accept it
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Numeric(Decimal),
    Text(String),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Numeric(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Fields to change, keyed by application-level name, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateData(IndexMap<String, SqlValue>);

impl UpdateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Records the field only when a value was supplied
    pub fn set_opt<T: Into<SqlValue>>(self, field: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for UpdateData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// `SET` clause plus the values for its placeholders, index-aligned
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

/// Application-level field name to storage column name
pub type ColumnNames = [(&'static str, &'static str)];

/// Build `"col1"=$1, "col2"=$2, ...` and the matching value list.
///
/// Keys found in `column_names` are translated; others are used verbatim.
/// Fails with `DatabaseError::NoData` when `data` is empty.
pub fn sql_for_partial_update(data: &UpdateData, column_names: &[(&str, &str)]) -> Result<PartialUpdate, DatabaseError> {
    if data.is_empty() {
        return Err(DatabaseError::NoData);
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());

    for (idx, (field, value)) in data.iter().enumerate() {
        let column = column_names
            .iter()
            .find(|(app_name, _)| *app_name == field)
            .map_or(field, |(_, column)| *column);
        cols.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

/// Bind one value to a `query_as`, mapping each variant to its Postgres type
pub fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q SqlValue,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Null => q.bind(None::<String>),
        SqlValue::Bool(b) => q.bind(*b),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Float(f) => q.bind(*f),
        SqlValue::Numeric(d) => q.bind(*d),
        SqlValue::Text(s) => q.bind(s.as_str()),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sql_value() -> impl Strategy<Value = SqlValue> {
        prop_oneof![
            Just(SqlValue::Null),
            any::<bool>().prop_map(SqlValue::Bool),
            any::<i64>().prop_map(SqlValue::Int),
            (-1.0e9..1.0e9f64).prop_map(SqlValue::Float),
            (0i64..1_000_000).prop_map(|n| SqlValue::Numeric(Decimal::new(n, 4))),
            "[ -~]{0,12}".prop_map(SqlValue::Text),
        ]
    }

    /// Distinct keys in arbitrary order, a value and optional column per key,
    /// plus table rows for keys that never appear in the data
    #[allow(clippy::type_complexity)]
    fn update_case() -> impl Strategy<Value = (Vec<String>, Vec<(SqlValue, Option<String>)>, Vec<(String, String)>)> {
        prop::collection::btree_set("[a-m][a-zA-Z0-9]{0,8}", 1..10).prop_flat_map(|keys| {
            let n = keys.len();
            (
                Just(keys.into_iter().collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec((sql_value(), prop::option::of("[a-z_]{1,12}")), n),
                prop::collection::vec(("[n-z][a-z]{0,6}", "[a-z_]{1,12}"), 0..4),
            )
        })
    }

    proptest! {
        /// One segment and one value per key, placeholder i+1 paired with
        /// values[i], columns resolved through the table, same output twice
        #[test]
        fn fragment_lines_up_with_data((keys, entries, unused) in update_case()) {
            let mut data = UpdateData::new();
            let mut table: Vec<(String, String)> = Vec::new();
            for (key, (value, column)) in keys.iter().zip(entries.iter()) {
                data.insert(key.as_str(), value.clone());
                if let Some(column) = column {
                    table.push((key.clone(), column.clone()));
                }
            }
            table.extend(unused);
            let table: Vec<(&str, &str)> = table.iter().map(|(k, c)| (k.as_str(), c.as_str())).collect();

            let result = sql_for_partial_update(&data, &table).unwrap();
            let segments: Vec<&str> = result.set_cols.split(", ").collect();

            prop_assert_eq!(segments.len(), keys.len());
            prop_assert_eq!(result.values.len(), keys.len());

            for (i, (key, (value, column))) in keys.iter().zip(entries.iter()).enumerate() {
                let expected_column = column.as_deref().unwrap_or(key.as_str());
                prop_assert_eq!(segments[i], format!("\"{}\"=${}", expected_column, i + 1));
                prop_assert_eq!(&result.values[i], value);
            }

            prop_assert_eq!(sql_for_partial_update(&data, &table).unwrap(), result);
        }
    }
}
