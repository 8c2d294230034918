//! Loosely-typed input rows.
//!
//! A [`Record`] is an ordered list of `(column, value)` pairs exactly as read
//! from the source. Order matters: writers reproduce the header from it, and
//! derived columns such as the rejection reason are appended at the end.
//! Typed access goes through [`Record::text`] and [`Record::number`], which
//! fail with [`FieldError`] instead of panicking.
use std::fmt;

use crate::error::FieldError;

/// One source row as a column-name to string-value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from pairs. A repeated column keeps its first position
    /// and takes the last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Raw value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Sets `field` to `value`, replacing in place when the column already
    /// exists and appending otherwise. Returns the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String value of `field`, or [`FieldError::Missing`].
    pub fn text(&self, field: &str) -> Result<&str, FieldError> {
        self.get(field).ok_or_else(|| FieldError::Missing {
            field: field.to_string(),
        })
    }

    /// Finite `f64` value of `field`. Surrounding whitespace is ignored.
    /// `NaN` and infinities are rejected as [`FieldError::NotNumeric`].
    pub fn number(&self, field: &str) -> Result<f64, FieldError> {
        let raw = self.text(field)?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(FieldError::NotNumeric {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, value)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place_and_appends_new_columns() {
        let mut record = Record::from_pairs([("nome", "Ana"), ("area", "TI")]);

        assert_eq!(record.insert("nome", "Bia"), Some("Ana".to_string()));
        assert_eq!(record.insert("motivo", "x"), None);

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, ["nome", "area", "motivo"]);
        assert_eq!(record.get("nome"), Some("Bia"));
    }

    #[test]
    fn repeated_columns_keep_last_value() {
        let record = Record::from_pairs([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a"), Some("3"));
    }

    #[test]
    fn number_parsing_cases() {
        let record = Record::from_pairs([
            ("plain", "5000"),
            ("padded", " 0.25 "),
            ("exp", "1e3"),
            ("word", "abc"),
            ("empty", ""),
            ("nan", "NaN"),
            ("inf", "inf"),
        ]);

        assert_eq!(record.number("plain"), Ok(5000.0));
        assert_eq!(record.number("padded"), Ok(0.25));
        assert_eq!(record.number("exp"), Ok(1000.0));
        for field in ["word", "empty", "nan", "inf"] {
            assert!(
                matches!(record.number(field), Err(FieldError::NotNumeric { .. })),
                "{field} should not parse"
            );
        }
        assert!(matches!(
            record.number("absent"),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn display_lists_fields_in_order() {
        let record = Record::from_pairs([("nome", "Ana"), ("area", "TI")]);
        assert_eq!(record.to_string(), r#"{nome: "Ana", area: "TI"}"#);
    }
}
