use super::{BindColArgs, ColumnDescription, Diagnostics, SqlResult};

/// An executed, prepared statement with an open result set. This is the only collaborator a
/// [`crate::BufferedCursor`] talks to. Each database backend provides its own implementation.
///
/// All calls are synchronous and block the calling thread until the backend answers.
///
/// Any method returning a [`SqlResult`] may return [`SqlResult::NoData`]. Its meaning depends on
/// the call and is documented with each method.
///
/// # Safety
///
/// Implementations write into the memory described by the [`BindColArgs`] passed to
/// [`Self::bind_cols`] and [`Self::fetch_column`]. They must never write more than
/// `target_length` bytes to `target_value`, must always report the complete length of a value
/// (or [`super::NULL_DATA`], or [`super::NO_TOTAL`] if it is unknown) through `indicator`, and
/// must not touch any of the pointers after
/// [`Self::bind_cols`] has been called again or [`Self::free_result`] has been called.
pub unsafe trait Statement: Diagnostics {
    /// Name of the backend. E.g. `mysql`.
    fn backend_name(&self) -> &'static str {
        "generic"
    }

    /// Number of columns in the result set.
    fn num_result_cols(&self) -> u16;

    /// Describes all columns of the result set, ordered by column index. [`SqlResult::NoData`] is
    /// treated like an empty result set.
    fn describe_cols(&mut self) -> SqlResult<Vec<ColumnDescription>>;

    /// Declares the receive buffers for all columns. The buffer at position `i` of `columns`
    /// receives the column with zero based index `i`. Any previous binding is replaced.
    /// [`SqlResult::NoData`] is treated as a failure to bind.
    ///
    /// # Safety
    ///
    /// Every pointer in `columns` must stay valid until the columns are bound again or the result
    /// is freed.
    unsafe fn bind_cols(&mut self, columns: &[BindColArgs]) -> SqlResult<()>;

    /// Fetches the next row into the bound buffers.
    ///
    /// # Return
    ///
    /// * [`SqlResult::Success`] if a row has been fetched and every value fit into its buffer.
    /// * [`SqlResult::SuccessWithInfo`] if a row has been fetched, yet at least one value has been
    ///   truncated. The indicator of that column holds the complete length of the value.
    /// * [`SqlResult::NoData`] if the result set has no more rows.
    /// * [`SqlResult::Error`] if the fetch failed.
    ///
    /// # Safety
    ///
    /// All buffers bound via [`Self::bind_cols`] must still be valid.
    unsafe fn fetch(&mut self) -> SqlResult<()>;

    /// Fetches the value of a single column of the current row directly into `target`, starting
    /// with the first byte of the value. The indicator of `target` is updated as well. Used to
    /// retrieve the complete value of a column after its bound buffer turned out to be too small.
    ///
    /// # Parameters
    ///
    /// * `buffer_index`: Zero based index of the column.
    /// * `target`: Buffer large enough to hold the complete value.
    ///
    /// [`SqlResult::NoData`] is treated as a failure, since the value has already been announced
    /// by the fetch of the row.
    ///
    /// # Safety
    ///
    /// The pointers in `target` must be valid for the duration of the call.
    unsafe fn fetch_column(&mut self, buffer_index: u16, target: &BindColArgs) -> SqlResult<()>;

    /// Asks the backend to transfer the entire result set to the client at once, instead of row by
    /// row. Trades memory for throughput. Backends without such a mode keep the default, which
    /// does nothing. [`SqlResult::NoData`] is fine, if there is nothing left to transfer.
    fn store_result(&mut self) -> SqlResult<()> {
        SqlResult::Success(())
    }

    /// Discards any rows not fetched yet, leaving the statement in a state where it can be executed
    /// again. [`SqlResult::NoData`] is fine, if there is nothing left to discard.
    fn reset(&mut self) -> SqlResult<()>;

    /// Releases the resources associated with the result set. The statement itself stays open.
    fn free_result(&mut self);

    /// Closes the statement. No other method is called afterwards.
    fn close(&mut self);
}

unsafe impl<T: Statement + ?Sized> Statement for &mut T {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn num_result_cols(&self) -> u16 {
        (**self).num_result_cols()
    }

    fn describe_cols(&mut self) -> SqlResult<Vec<ColumnDescription>> {
        (**self).describe_cols()
    }

    unsafe fn bind_cols(&mut self, columns: &[BindColArgs]) -> SqlResult<()> {
        (**self).bind_cols(columns)
    }

    unsafe fn fetch(&mut self) -> SqlResult<()> {
        (**self).fetch()
    }

    unsafe fn fetch_column(&mut self, buffer_index: u16, target: &BindColArgs) -> SqlResult<()> {
        (**self).fetch_column(buffer_index, target)
    }

    fn store_result(&mut self) -> SqlResult<()> {
        (**self).store_result()
    }

    fn reset(&mut self) -> SqlResult<()> {
        (**self).reset()
    }

    fn free_result(&mut self) {
        (**self).free_result()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
