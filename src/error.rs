use std::str::Utf8Error;

use thiserror::Error as ThisError;

use crate::handles::{log_diagnostics, Diagnostics, Record as DiagnosticRecord, SqlResult};

#[derive(Debug, ThisError)]
/// Error type used by cursors. Errors caused by the backend carry its diagnostic record.
pub enum Error {
    /// The backend returned an error, but did not leave a diagnostic record specifying what went
    /// wrong.
    #[error(
        "No Diagnostics available. The call to {} returned an error. Sadly the backend has not \
        been polite enough to leave a diagnostic record specifying what exactly went wrong.",
        function
    )]
    NoDiagnostics {
        /// Backend function which returned error without producing a diagnostic record.
        function: &'static str,
    },
    /// Error had been returned by a backend function call. A Diagnostic record is obtained and
    /// associated with this error.
    #[error("Backend emitted an error calling '{function}':\n{record}")]
    Diagnostics {
        /// Diagnostic record returned by the backend
        record: DiagnosticRecord,
        /// Backend function which produced the diagnostic record
        function: &'static str,
    },
    /// The backend rejected the declaration of the column receive buffers. The cursor stops and
    /// yields no further rows.
    #[error(
        "Binding the column buffers failed calling '{function}':\n{}",
        record_or_placeholder(.record)
    )]
    BindFailed {
        /// `None` if the backend did not leave a diagnostic record.
        record: Option<DiagnosticRecord>,
        function: &'static str,
    },
    /// Fetching a row, or fetching the complete value of a truncated column failed. The cursor
    /// must not be used any further.
    #[error(
        "Fetching data from the result set failed calling '{function}':\n{}",
        record_or_placeholder(.record)
    )]
    FetchFailed {
        /// `None` if the backend did not leave a diagnostic record.
        record: Option<DiagnosticRecord>,
        function: &'static str,
    },
    /// The application asked for a column which is not part of the result set. Column indices
    /// start at `1`.
    #[error(
        "Column index {column_number} is out of range. The result set has {num_cols} columns. \
        Column indices start at 1."
    )]
    InvalidColumnIndex {
        /// One based index passed by the application.
        column_number: u16,
        /// Number of columns in the result set.
        num_cols: u16,
    },
    /// A value of the current row has been requested, yet the cursor is not positioned on a row.
    /// Either `next` has not been called yet, or it already returned `false`.
    #[error(
        "The cursor is not positioned on a row. Call `next` and only access values if it returns \
        `true`."
    )]
    NoCurrentRow,
    #[error(
        "There is not enough memory to grow the buffer for column {buffer_index} to {element_size} \
        bytes."
    )]
    TooLargeColumnBufferSize {
        /// Zero based column buffer index. Note that this is different from the 1 based column
        /// index.
        buffer_index: u16,
        /// Size needed to hold the value, including terminating zero.
        element_size: usize,
    },
    /// The backend reported neither `NULL` nor a length for the value. Without a length the value
    /// can not be fetched completely.
    #[error(
        "The backend did not report the length of the value in column {column_number}. It can \
        not be fetched completely."
    )]
    UnknownValueLength { column_number: u16 },
    /// A backend function reported that there is no data, where it must always produce a
    /// result.
    #[error("Backend function unexpectedly reported that no data is available.")]
    UnexpectedNoData,
    /// The value requested with `get_string` is not valid UTF-8. Use `get_blob` to access the raw
    /// bytes.
    #[error("Value in column {column_number} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        column_number: u16,
        source: Utf8Error,
    },
}

fn record_or_placeholder(record: &Option<DiagnosticRecord>) -> String {
    match record {
        Some(record) => record.to_string(),
        None => "The backend did not leave a diagnostic record.".to_owned(),
    }
}

impl Error {
    /// Allows for mapping the error variant from the "catch all" diagnostic to a more specific one
    /// offering the oppertunity to provide context in the error message. Errors without a
    /// diagnostic record are mapped, too, passing `None` for the record.
    fn provide_context_for_diagnostic<F>(self, f: F) -> Self
    where
        F: FnOnce(Option<DiagnosticRecord>, &'static str) -> Error,
    {
        match self {
            Error::Diagnostics { record, function } => f(Some(record), function),
            Error::NoDiagnostics { function } => f(None, function),
            other => other,
        }
    }
}

/// Convinience for easily providing more context to errors without an additional call to `map_err`
pub(crate) trait ExtendResult {
    fn provide_context_for_diagnostic<F>(self, f: F) -> Self
    where
        F: FnOnce(Option<DiagnosticRecord>, &'static str) -> Error;
}

impl<T> ExtendResult for Result<T, Error> {
    fn provide_context_for_diagnostic<F>(self, f: F) -> Self
    where
        F: FnOnce(Option<DiagnosticRecord>, &'static str) -> Error,
    {
        self.map_err(|error| error.provide_context_for_diagnostic(f))
    }
}

impl SqlResult<()> {
    /// Use this instead of [`Self::into_result`] if you expect [`SqlResult::NoData`] to be a
    /// valid value. [`SqlResult::NoData`] is mapped to `Ok(false)`, all other success values are
    /// `Ok(true)`.
    pub fn into_result_bool(self, handle: &(impl Diagnostics + ?Sized)) -> Result<bool, Error> {
        self.on_success(|| true).into_result_with(handle, Some(false))
    }
}

// Define that here rather than in `sql_result` mod to keep the `handles` module entirely agnostic
// about the top level `Error` type.
impl<T> SqlResult<T> {
    /// [`Self::Success`] and [`Self::SuccessWithInfo`] are mapped to Ok. In case of
    /// [`Self::SuccessWithInfo`] any diagnostics are logged. [`Self::Error`] and [`Self::NoData`]
    /// are mapped to error.
    pub fn into_result(self, handle: &(impl Diagnostics + ?Sized)) -> Result<T, Error> {
        self.into_result_with(handle, None)
    }

    /// Most flexible way of converting an `SqlResult` to an idiomatic `Result`.
    ///
    /// # Parameters
    ///
    /// * `handle`: This handle is used to extract diagnostics in case `self` is
    ///   [`SqlResult::SuccessWithInfo`] or [`SqlResult::Error`].
    /// * `no_data`: Controls the behaviour for [`SqlResult::NoData`]. `None` indicates that the
    ///   result is never expected to be [`SqlResult::NoData`] and maps it to
    ///   [`Error::UnexpectedNoData`].
    ///   `Some(value)` would cause [`SqlResult::NoData`] to be mapped to `Ok(value)`.
    pub fn into_result_with(
        self,
        handle: &(impl Diagnostics + ?Sized),
        no_data: Option<T>,
    ) -> Result<T, Error> {
        match self {
            // The function has been executed successfully. Holds result.
            SqlResult::Success(value) => Ok(value),
            // The function has been executed successfully. There have been warnings. Holds result.
            SqlResult::SuccessWithInfo(value) => {
                log_diagnostics(handle);
                Ok(value)
            }
            SqlResult::Error { function } => {
                let mut record = DiagnosticRecord::default();
                if record.fill_from(handle, 1) {
                    log_diagnostics(handle);
                    Err(Error::Diagnostics { record, function })
                } else {
                    Err(Error::NoDiagnostics { function })
                }
            }
            SqlResult::NoData => no_data.ok_or(Error::UnexpectedNoData),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handles::{Diagnostics, Record, SqlResult, State};

    use super::{Error, ExtendResult};

    struct LastError(Option<Record>);

    impl Diagnostics for LastError {
        fn diagnostic_record(&self, rec_number: i16) -> Option<Record> {
            if rec_number == 1 {
                self.0.clone()
            } else {
                None
            }
        }
    }

    #[test]
    fn error_without_diagnostics() {
        let result = SqlResult::<()>::Error { function: "fetch" }.into_result(&LastError(None));
        assert!(matches!(result, Err(Error::NoDiagnostics { function: "fetch" })));
    }

    #[test]
    fn narrow_diagnostics_to_fetch_failed() {
        let record = Record::new(State::GENERAL_ERROR, 2013, "Lost connection to server");
        let handle = LastError(Some(record.clone()));

        let result = SqlResult::<()>::Error { function: "fetch" }
            .into_result(&handle)
            .provide_context_for_diagnostic(|record, function| Error::FetchFailed {
                record,
                function,
            });

        match result {
            Err(Error::FetchFailed {
                record: actual,
                function,
            }) => {
                assert_eq!(Some(record), actual);
                assert_eq!("fetch", function);
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn narrow_missing_diagnostics_to_bind_failed() {
        let result = SqlResult::<()>::Error {
            function: "bind_cols",
        }
        .into_result(&LastError(None))
        .provide_context_for_diagnostic(|record, function| Error::BindFailed { record, function });

        assert!(matches!(
            result,
            Err(Error::BindFailed {
                record: None,
                function: "bind_cols"
            })
        ));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("did not leave a diagnostic record"));
    }

    #[test]
    fn unexpected_no_data_is_an_error() {
        let result = SqlResult::<Vec<u8>>::NoData.into_result(&LastError(None));
        assert!(matches!(result, Err(Error::UnexpectedNoData)));
    }

    #[test]
    fn no_data_maps_to_false() {
        let has_row = SqlResult::NoData.into_result_bool(&LastError(None)).unwrap();
        assert!(!has_row);
    }
}
