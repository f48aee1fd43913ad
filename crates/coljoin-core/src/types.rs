//! Typed columns.
//!
//! A `Column` owns a contiguous vector of one concrete element type. Join
//! kernels borrow the typed slice directly; there is no per-value boxing.

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
}

impl Column {
    pub fn data_type(&self) -> DataType {
        match self {
            Column::Int32(_) => DataType::Int32,
            Column::Int64(_) => DataType::Int64,
            Column::Float32(_) => DataType::Float32,
            Column::Float64(_) => DataType::Float64,
            Column::Utf8(_) => DataType::Utf8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a numeric column of `data_type` from `i64` values, casting each
    /// element. Handy for tests and fixtures that are written once and run
    /// against every key type. Returns `None` for `Utf8`.
    pub fn from_i64s(data_type: DataType, values: &[i64]) -> Option<Self> {
        let col = match data_type {
            DataType::Int32 => Column::Int32(values.iter().map(|&v| v as i32).collect()),
            DataType::Int64 => Column::Int64(values.to_vec()),
            DataType::Float32 => Column::Float32(values.iter().map(|&v| v as f32).collect()),
            DataType::Float64 => Column::Float64(values.iter().map(|&v| v as f64).collect()),
            DataType::Utf8 => return None,
        };
        Some(col)
    }
}

impl From<Vec<i32>> for Column {
    fn from(v: Vec<i32>) -> Self {
        Column::Int32(v)
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Column::Int64(v)
    }
}

impl From<Vec<f32>> for Column {
    fn from(v: Vec<f32>) -> Self {
        Column::Float32(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Float64(v)
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Column::Utf8(v)
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Column::Utf8(v.into_iter().map(str::to_string).collect())
    }
}
