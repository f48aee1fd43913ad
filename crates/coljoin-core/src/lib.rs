#![forbid(unsafe_code)]
//! coljoin-core: column types, labels, the column accessor, configuration,
//! budget traits and content hashing.
//!
//! Pure data; threads, allocation policy and join kernels live downstream.

pub mod accessor;
pub mod budget;
pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod label;
pub mod prelude;
pub mod schema;
pub mod types;

pub use accessor::{ColumnAccessor, ColumnIndex};
pub use error::{Error, Result};
pub use label::Label;
pub use schema::DataType;
pub use types::Column;
