use crate::Error;

/// Operations every cursor provides, regardless of the backend it fetches from. Applications can
/// hold a `Box<dyn ResultSet>` without knowing which backend produced it.
///
/// Column indices start at `1`. Accessing a column outside of `1..=num_result_cols()` fails with
/// [`Error::InvalidColumnIndex`]. Accessing values before the first call to [`Self::next`], or
/// after it returned `false`, fails with [`Error::NoCurrentRow`].
///
/// # Example
///
/// ```
/// use buffered_cursor::{Error, ResultSet};
///
/// /// Concatenates the first column of every row, treating `NULL` as empty.
/// fn first_column(result_set: &mut dyn ResultSet) -> Result<String, Error> {
///     let mut text = String::new();
///     while result_set.next()? {
///         text.push_str(result_set.get_string(1)?.unwrap_or(""));
///     }
///     Ok(text)
/// }
/// ```
pub trait ResultSet {
    /// Name of the backend which produced the result set.
    fn backend_name(&self) -> &'static str;

    /// Number of columns in the result set. `0` if the statement did not produce a result set.
    fn num_result_cols(&self) -> u16;

    /// Name of the column. `None` if there is no column with this index.
    fn column_name(&self, column_number: u16) -> Option<&str>;

    /// Length of the value in the current row in bytes. `0` for `NULL`. This is the complete
    /// length, even if the value has been truncated during fetch and not yet been accessed.
    fn column_size(&self, column_number: u16) -> Result<usize, Error>;

    /// Advances the cursor to the next row.
    ///
    /// # Return
    ///
    /// `true` if the cursor is positioned on a new row. `false` if the result set is exhausted or
    /// the row limit has been reached. Once `false` has been returned, it is returned forever
    /// after.
    ///
    /// An error is fatal. The cursor will not yield any more rows afterwards.
    fn next(&mut self) -> Result<bool, Error>;

    /// `true` if the value of the column in the current row is `NULL`.
    fn is_null(&self, column_number: u16) -> Result<bool, Error>;

    /// Value of the column in the current row as text. `None` if the value is `NULL`.
    ///
    /// The returned reference points into the buffer of the column, so the borrow checker ensures
    /// it is dropped before the cursor moves to the next row.
    fn get_string(&mut self, column_number: u16) -> Result<Option<&str>, Error>;

    /// Value of the column in the current row as raw bytes. `None` if the value is `NULL`.
    fn get_blob(&mut self, column_number: u16) -> Result<Option<&[u8]>, Error>;

    /// Releases all resources held by the result set. Safe to call more than once. Dropping the
    /// result set calls this implicitly.
    fn free(&mut self);
}

impl<T: ResultSet + ?Sized> ResultSet for Box<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn num_result_cols(&self) -> u16 {
        (**self).num_result_cols()
    }

    fn column_name(&self, column_number: u16) -> Option<&str> {
        (**self).column_name(column_number)
    }

    fn column_size(&self, column_number: u16) -> Result<usize, Error> {
        (**self).column_size(column_number)
    }

    fn next(&mut self) -> Result<bool, Error> {
        (**self).next()
    }

    fn is_null(&self, column_number: u16) -> Result<bool, Error> {
        (**self).is_null(column_number)
    }

    fn get_string(&mut self, column_number: u16) -> Result<Option<&str>, Error> {
        (**self).get_string(column_number)
    }

    fn get_blob(&mut self, column_number: u16) -> Result<Option<&[u8]>, Error> {
        (**self).get_blob(column_number)
    }

    fn free(&mut self) {
        (**self).free()
    }
}

impl<T: ResultSet + ?Sized> ResultSet for &mut T {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn num_result_cols(&self) -> u16 {
        (**self).num_result_cols()
    }

    fn column_name(&self, column_number: u16) -> Option<&str> {
        (**self).column_name(column_number)
    }

    fn column_size(&self, column_number: u16) -> Result<usize, Error> {
        (**self).column_size(column_number)
    }

    fn next(&mut self) -> Result<bool, Error> {
        (**self).next()
    }

    fn is_null(&self, column_number: u16) -> Result<bool, Error> {
        (**self).is_null(column_number)
    }

    fn get_string(&mut self, column_number: u16) -> Result<Option<&str>, Error> {
        (**self).get_string(column_number)
    }

    fn get_blob(&mut self, column_number: u16) -> Result<Option<&[u8]>, Error> {
        (**self).get_blob(column_number)
    }

    fn free(&mut self) {
        (**self).free()
    }
}
