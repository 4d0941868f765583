//! This module contains the buffers a cursor binds to the columns of a statement and fetches rows
//! into.

mod column_buffer;
mod column_table;
mod indicator;

pub use self::{
    column_buffer::ColumnBuffer,
    column_table::{ColumnBufferTable, DEFAULT_BUFFER_LEN},
    indicator::Indicator,
};
