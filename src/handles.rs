//! Provides the contract a backend statement handle must fulfill, for a cursor to fetch rows from
//! it.
//!
//! Two decisions are already baked into this module:
//!
//! * Treat warnings by logging them with `log`.
//! * Backends write into receive buffers through raw pointers declared once via
//!   [`Statement::bind_cols`], rather than being handed a buffer with each call to fetch.

mod bind;
mod column_description;
mod data_type;
mod diagnostics;
mod logging;
mod sql_result;
mod statement;

pub use {
    bind::{BindColArgs, NO_TOTAL, NULL_DATA},
    column_description::{ColumnDescription, Nullable},
    data_type::DataType,
    diagnostics::{Diagnostics, Record, State},
    logging::log_diagnostics,
    sql_result::SqlResult,
    statement::Statement,
};
