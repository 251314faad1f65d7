use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Astronomical time scale of a time column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Utc,
    Tai,
    Tt,
    Tdb,
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Tai => write!(f, "tai"),
            Self::Tt => write!(f, "tt"),
            Self::Tdb => write!(f, "tdb"),
        }
    }
}

/// Calendar timestamps sharing one time scale.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeColumn {
    pub scale: TimeScale,
    pub values: Vec<NaiveDateTime>,
}

/// Typed storage for one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
    Time(TimeColumn),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Time(t) => t.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column with an optional physical unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub unit: Option<Unit>,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, unit: Option<Unit>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            unit,
            data,
        }
    }

    pub fn float(name: impl Into<String>, unit: Option<Unit>, values: Vec<f64>) -> Self {
        Self::new(name, unit, ColumnData::Float(values))
    }

    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, None, ColumnData::Int(values))
    }

    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            None,
            ColumnData::Text(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn time(name: impl Into<String>, scale: TimeScale, values: Vec<NaiveDateTime>) -> Self {
        Self::new(name, None, ColumnData::Time(TimeColumn { scale, values }))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_float(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&[i64]> {
        match &self.data {
            ColumnData::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&TimeColumn> {
        match &self.data {
            ColumnData::Time(t) => Some(t),
            _ => None,
        }
    }
}
