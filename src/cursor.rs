use log::{debug, warn};

use crate::{
    buffers::{ColumnBufferTable, Indicator},
    error::ExtendResult,
    handles::{ColumnDescription, SqlResult, Statement},
    CursorOptions, Error, ResultSet,
};

use std::str;

/// Position of a cursor within its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// `next` has not been called yet.
    BeforeFirstRow,
    /// Positioned on a row. Values may be accessed.
    OnRow,
    /// Terminal. No more rows are produced, because the result set is exhausted, the row limit
    /// has been reached, an error occurred, or the cursor has been freed.
    Stopped,
}

/// Iterates over the result set of an executed statement row by row. Every row is fetched into
/// column buffers which are bound once and reused for all rows.
///
/// Values larger than their buffer are truncated by the fetch. The backend still reports their
/// complete length, and the first time such a value is requested the buffer is grown to fit and
/// the value is fetched again directly into it. Buffers never shrink, so a column with
/// consistently large values is only grown once.
///
/// Use the [`ResultSet`] trait to advance the cursor and access the values.
///
/// A cursor is not meant to be shared between threads. Every access may mutate its buffers.
pub struct BufferedCursor<S: Statement> {
    statement: S,
    /// Do not close `statement` when freeing the cursor.
    keep: bool,
    /// `0` means unlimited.
    max_rows: usize,
    rows_fetched: usize,
    /// Number of described columns. `0` if the cursor failed to initialize or has been freed.
    num_cols: u16,
    state: CursorState,
    /// Set after a buffer has been reallocated. Buffers must be declared to the statement again,
    /// before fetching the next row.
    needs_rebind: bool,
    columns: ColumnBufferTable,
    freed: bool,
}

impl<S> Drop for BufferedCursor<S>
where
    S: Statement,
{
    fn drop(&mut self) {
        self.free_resources();
    }
}

impl<S> BufferedCursor<S>
where
    S: Statement,
{
    /// Creates a cursor over the result set of an already executed `statement`, allocating and
    /// binding one buffer per column.
    ///
    /// Creating the cursor never fails. If the statement has no result columns, or the backend
    /// fails to describe them or to accept the buffers, the cursor behaves like a cursor over an
    /// empty result set.
    pub fn new(mut statement: S, options: CursorOptions) -> Self {
        let mut columns = ColumnBufferTable::default();
        let mut num_cols = 0;
        let mut state = CursorState::BeforeFirstRow;

        let reported = statement.num_result_cols();
        match describe_result_set(&mut statement, reported) {
            Ok(descriptions) if descriptions.len() != usize::from(reported) => {
                debug!(
                    "Backend described {} columns, yet reported {} result columns. Cursor yields \
                    no rows.",
                    descriptions.len(),
                    reported
                );
                state = CursorState::Stopped;
            }
            Ok(descriptions) if !descriptions.is_empty() => {
                num_cols = reported;
                columns = ColumnBufferTable::new(descriptions, options.initial_buffer_len);
                if let Err(error) = bind_columns(&mut statement, &mut columns) {
                    debug!("Binding column buffers failed. Cursor yields no rows. {error}");
                    state = CursorState::Stopped;
                } else if options.store_result {
                    // No data left to transfer is fine, too.
                    if let Err(error) = statement.store_result().into_result_bool(&statement) {
                        warn!(
                            "Could not transfer the result set to the client at once. Rows are \
                            fetched one by one instead. {error}"
                        );
                    }
                }
            }
            Ok(_) => {
                debug!("Statement did not produce any result columns. Cursor yields no rows.");
                state = CursorState::Stopped;
            }
            Err(error) => {
                debug!("Describing the result set failed. Cursor yields no rows. {error}");
                state = CursorState::Stopped;
            }
        }

        Self {
            statement,
            keep: options.keep,
            max_rows: options.max_rows,
            rows_fetched: 0,
            num_cols,
            state,
            needs_rebind: false,
            columns,
            freed: false,
        }
    }

    /// Description of a column. `column_number` starts at `1`. `None` if there is no such column.
    pub fn column_description(&self, column_number: u16) -> Option<&ColumnDescription> {
        column_number
            .checked_sub(1)
            .and_then(|buffer_index| self.columns.description(usize::from(buffer_index)))
    }

    /// Names of all columns, ordered by column index.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .descriptions()
            .iter()
            .map(|description| description.name.as_str())
    }

    /// Number of rows yielded by [`ResultSet::next`] so far.
    pub fn rows_fetched(&self) -> usize {
        self.rows_fetched
    }

    /// Maps the one based `column_number` to a buffer index, after checking that it is in range and
    /// that the cursor is positioned on a row.
    fn buffer_index(&self, column_number: u16) -> Result<u16, Error> {
        if column_number == 0 || column_number > self.num_cols {
            return Err(Error::InvalidColumnIndex {
                column_number,
                num_cols: self.num_cols,
            });
        }
        if self.state != CursorState::OnRow {
            return Err(Error::NoCurrentRow);
        }
        Ok(column_number - 1)
    }

    /// Fetches the complete value of the column, should it have been truncated.
    ///
    /// # Return
    ///
    /// `false` if the value is `NULL`.
    fn complete_value(&mut self, buffer_index: u16) -> Result<bool, Error> {
        match self.columns.indicator(usize::from(buffer_index)) {
            Indicator::Null => return Ok(false),
            Indicator::NoTotal => {
                return Err(Error::UnknownValueLength {
                    column_number: buffer_index + 1,
                })
            }
            Indicator::Length(_) => (),
        }
        let statement = &mut self.statement;
        let grown = self
            .columns
            .ensure_capacity(buffer_index, |index, target| {
                let fetched = unsafe { statement.fetch_column(index, target) }
                    .into_result_bool(&*statement)
                    .provide_context_for_diagnostic(|record, function| Error::FetchFailed {
                        record,
                        function,
                    })?;
                if fetched {
                    Ok(())
                } else {
                    Err(Error::FetchFailed {
                        record: None,
                        function: "fetch_column",
                    })
                }
            })?;
        if grown {
            self.needs_rebind = true;
        }
        Ok(true)
    }

    /// Releases the result set and all column buffers. Closes the statement unless the cursor has
    /// been created with `keep`. Does nothing if called a second time.
    fn free_resources(&mut self) {
        if self.freed {
            return;
        }
        self.freed = true;
        self.state = CursorState::Stopped;
        self.num_cols = 0;
        self.statement.free_result();
        if !self.keep {
            self.statement.close();
        }
        // The statement does not reference the buffers anymore.
        self.columns = ColumnBufferTable::default();
    }
}

impl<S> ResultSet for BufferedCursor<S>
where
    S: Statement,
{
    fn backend_name(&self) -> &'static str {
        self.statement.backend_name()
    }

    fn num_result_cols(&self) -> u16 {
        self.num_cols
    }

    fn column_name(&self, column_number: u16) -> Option<&str> {
        self.column_description(column_number)
            .map(|description| description.name.as_str())
    }

    fn column_size(&self, column_number: u16) -> Result<usize, Error> {
        let buffer_index = self.buffer_index(column_number)?;
        match self.columns.indicator(usize::from(buffer_index)) {
            Indicator::Null => Ok(0),
            Indicator::NoTotal => Err(Error::UnknownValueLength { column_number }),
            Indicator::Length(len) => Ok(len),
        }
    }

    fn next(&mut self) -> Result<bool, Error> {
        if self.state == CursorState::Stopped {
            return Ok(false);
        }

        if self.max_rows != 0 && self.rows_fetched >= self.max_rows {
            self.state = CursorState::Stopped;
            debug!(
                "Row limit of {} reached. Discarding remaining rows.",
                self.max_rows
            );
            // The row limit is a regular end of the result set. A failure to clean up is no
            // reason to fail the caller. No data left to discard is fine, too.
            if let Err(error) = self.statement.reset().into_result_bool(&self.statement) {
                warn!("Resetting the statement after reaching the row limit failed. {error}");
            }
            return Ok(false);
        }

        if self.needs_rebind {
            if let Err(error) = bind_columns(&mut self.statement, &mut self.columns) {
                self.state = CursorState::Stopped;
                return Err(error);
            }
            self.needs_rebind = false;
        }

        let fetched = match unsafe { self.statement.fetch() } {
            // Truncated values are fetched completely once they are accessed. Nothing to worry
            // the user about.
            SqlResult::SuccessWithInfo(()) => {
                debug!("Row {} contains truncated values.", self.rows_fetched + 1);
                Ok(true)
            }
            other => other
                .into_result_bool(&self.statement)
                .provide_context_for_diagnostic(|record, function| Error::FetchFailed {
                    record,
                    function,
                }),
        };

        match fetched {
            Ok(true) => {
                self.rows_fetched += 1;
                self.state = CursorState::OnRow;
                Ok(true)
            }
            Ok(false) => {
                self.state = CursorState::Stopped;
                Ok(false)
            }
            Err(error) => {
                self.state = CursorState::Stopped;
                Err(error)
            }
        }
    }

    fn is_null(&self, column_number: u16) -> Result<bool, Error> {
        let buffer_index = self.buffer_index(column_number)?;
        Ok(self.columns.indicator(usize::from(buffer_index)).is_null())
    }

    fn get_string(&mut self, column_number: u16) -> Result<Option<&str>, Error> {
        let buffer_index = self.buffer_index(column_number)?;
        if !self.complete_value(buffer_index)? {
            return Ok(None);
        }
        let index = usize::from(buffer_index);
        self.columns.terminate(index);
        match self.columns.value(index) {
            None => Ok(None),
            Some(bytes) => str::from_utf8(bytes)
                .map(Some)
                .map_err(|source| Error::InvalidUtf8 {
                    column_number,
                    source,
                }),
        }
    }

    fn get_blob(&mut self, column_number: u16) -> Result<Option<&[u8]>, Error> {
        let buffer_index = self.buffer_index(column_number)?;
        if !self.complete_value(buffer_index)? {
            return Ok(None);
        }
        Ok(self.columns.value(usize::from(buffer_index)))
    }

    fn free(&mut self) {
        self.free_resources()
    }
}

/// Descriptions of all columns in the result set. Empty if the statement did not produce one.
fn describe_result_set(
    statement: &mut impl Statement,
    num_cols: u16,
) -> Result<Vec<ColumnDescription>, Error> {
    if num_cols == 0 {
        return Ok(Vec::new());
    }
    statement
        .describe_cols()
        .into_result_with(&*statement, Some(Vec::new()))
}

/// Declares all column buffers to the statement.
fn bind_columns(
    statement: &mut impl Statement,
    columns: &mut ColumnBufferTable,
) -> Result<(), Error> {
    let bind_args = columns.bind_arguments();
    let bound = unsafe { statement.bind_cols(&bind_args) }
        .into_result_bool(&*statement)
        .provide_context_for_diagnostic(|record, function| Error::BindFailed { record, function })?;
    if bound {
        Ok(())
    } else {
        Err(Error::BindFailed {
            record: None,
            function: "bind_cols",
        })
    }
}
