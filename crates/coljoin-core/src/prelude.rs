//! Convenient re-exports for downstream crates.

pub use crate::accessor::{ColumnAccessor, ColumnIndex};
pub use crate::config::{IndexKind, JoinConfig};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::id::JoinId;
pub use crate::label::Label;
pub use crate::schema::DataType;
pub use crate::types::Column;
