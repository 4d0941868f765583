use crate::buffers::DEFAULT_BUFFER_LEN;

/// Options controlling the behaviour of a [`crate::BufferedCursor`]. Use struct update syntax to
/// only deviate from the defaults where needed.
///
/// ```
/// use buffered_cursor::CursorOptions;
///
/// let options = CursorOptions {
///     max_rows: 10,
///     ..CursorOptions::default()
/// };
/// assert!(!options.keep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOptions {
    /// Maximum number of rows the cursor yields. `0` means unlimited. Once the limit is reached
    /// the remaining rows are discarded by resetting the statement.
    pub max_rows: usize,
    /// If `true` the statement is not closed when the cursor is freed, because the application
    /// intends to execute it again.
    pub keep: bool,
    /// Number of bytes initially bound for each column. Larger values are still fetched
    /// completely, but at the cost of an additional round trip the first time they are accessed.
    pub initial_buffer_len: usize,
    /// Ask the backend to transfer the entire result set to the client at once. Speeds up
    /// iterating large result sets considerably, at the cost of holding all of it in memory.
    pub store_result: bool,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            max_rows: 0,
            keep: false,
            initial_buffer_len: DEFAULT_BUFFER_LEN,
            store_result: true,
        }
    }
}
