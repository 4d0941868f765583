//! Types required to bind receive buffers to the columns of a statement.

use std::ptr::null_mut;

/// Indicator value signaling that the fetched field is `NULL`.
pub const NULL_DATA: isize = -1;

/// Indicator value signaling that the field exists, but its length is not known.
pub const NO_TOTAL: isize = -4;

/// Arguments used to describe a receive buffer when binding it to a column of a statement.
///
/// A backend keeps these descriptions after [`crate::handles::Statement::bind_cols`] and writes
/// through them on every call to [`crate::handles::Statement::fetch`], until the columns are bound
/// again.
#[derive(Debug, Clone, Copy)]
pub struct BindColArgs {
    /// Start address of the value buffer.
    pub target_value: *mut u8,
    /// Number of bytes the backend may write to `target_value`. The allocation behind
    /// `target_value` is larger by one, so the cursor can place a terminating zero after the
    /// longest value which fits.
    pub target_length: usize,
    /// Receives [`NULL_DATA`] for `NULL` fields, or [`NO_TOTAL`] if the length of the value is not
    /// known. Otherwise the length of the complete value in bytes. This may be larger than
    /// `target_length`, in which case only `target_length` bytes have been written and the value
    /// is truncated.
    pub indicator: *mut isize,
}

impl Default for BindColArgs {
    fn default() -> Self {
        Self {
            target_value: null_mut(),
            target_length: 0,
            indicator: null_mut(),
        }
    }
}
