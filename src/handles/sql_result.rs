/// Result of a call to a backend statement function. This type may hold results, but it is still
/// the responsibility of the user to fetch and handle the diagnostics in case of an Error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SqlResult<T> {
    /// The function has been executed successfully.
    Success(T),
    /// The function has been executed successfully. There have been warnings. Returned by
    /// [`crate::handles::Statement::fetch`] if at least one value of the row did not fit its
    /// receive buffer.
    SuccessWithInfo(T),
    /// No more data is available
    NoData,
    /// The function returned an error state. Check diagnostics.
    Error {
        /// Name of the backend function which caused the error. This helps interpreting the
        /// associated diagnostics if the error is bubbled all the way up to the end users output.
        function: &'static str,
    },
}

impl SqlResult<()> {
    /// Append a return value a successful to Result
    pub fn on_success<F, T>(self, f: F) -> SqlResult<T>
    where
        F: FnOnce() -> T,
    {
        self.map(|()| f())
    }
}

impl<T> SqlResult<T> {
    /// Applies `f` to any value wrapped in `Success` or `SuccessWithInfo`.
    pub fn map<U, F>(self, f: F) -> SqlResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            SqlResult::Success(v) => SqlResult::Success(f(v)),
            SqlResult::SuccessWithInfo(v) => SqlResult::SuccessWithInfo(f(v)),
            SqlResult::Error { function } => SqlResult::Error { function },
            SqlResult::NoData => SqlResult::NoData,
        }
    }
}
