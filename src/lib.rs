//! # Buffered cursor
//!
//! Fetches the rows of an executed statement into column buffers which are bound once and reused
//! for every row. Values which do not fit into their buffer are not lost: the backend reports
//! their complete length and the cursor fetches them again into a larger buffer, the first time
//! the application asks for them.
//!
//! Backends implement [`handles::Statement`]. Applications advance a cursor and read its values
//! through the [`ResultSet`] trait.

mod cursor;
mod cursor_options;
mod error;
mod result_set;

pub mod buffers;
pub mod handles;

pub use self::{
    cursor::BufferedCursor,
    cursor_options::CursorOptions,
    error::Error,
    handles::{ColumnDescription, DataType, Nullable},
    result_set::ResultSet,
};
