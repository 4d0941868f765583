use std::fmt;

/// A buffer large enough to hold an `SQLSTATE` for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State(pub [u8; 5]);

impl State {
    /// General error. Used by backends which do not know any better.
    pub const GENERAL_ERROR: State = State(*b"HY000");
    /// String or binary data returned for a column resulted in the truncation of nonblank character
    /// or non-NULL binary data. If it was a string value, it was right-truncated.
    pub const STRING_DATA_RIGHT_TRUNCATION: State = State(*b"01004");

    /// View status code as string slice for displaying. Falls back to `?????` should a backend
    /// report a state which is not ASCII.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

/// Report diagnostics from the last call to a backend function using a handle.
pub trait Diagnostics {
    /// Call this method to retrieve diagnostic information for the last call to a function of the
    /// handle.
    ///
    /// # Arguments
    ///
    /// * `rec_number` - Indicates the status record from which the application seeks information.
    ///   Status records are numbered from 1. Function panics for values smaller < 1.
    ///
    /// # Result
    ///
    /// * `Some(rec)` - The function successfully returned diagnostic information.
    /// * `None` - `rec_number` was greater than the number of diagnostic records that existed for
    ///   the specified Handle. Also returned for any positive `rec_number` if there are no
    ///   diagnostic records available.
    fn diagnostic_record(&self, rec_number: i16) -> Option<Record>;
}

impl<T: Diagnostics + ?Sized> Diagnostics for &mut T {
    fn diagnostic_record(&self, rec_number: i16) -> Option<Record> {
        (**self).diagnostic_record(rec_number)
    }
}

impl<T: Diagnostics + ?Sized> Diagnostics for Box<T> {
    fn diagnostic_record(&self, rec_number: i16) -> Option<Record> {
        (**self).diagnostic_record(rec_number)
    }
}

/// Diagnostic Record
///
/// The `description` method of the `std::error::Error` trait only returns the message. Use
/// `std::fmt::Display` to retrieve status code and other information.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Record {
    /// Five character SQLSTATE
    pub state: State,
    /// Error code returned by the backend
    pub native_error: i32,
    /// The error message without a terminating zero.
    pub message: String,
}

impl Record {
    /// Creates a diagnostic record with the given state and message.
    pub fn new(state: State, native_error: i32, message: impl Into<String>) -> Self {
        Self {
            state,
            native_error,
            message: message.into(),
        }
    }

    /// Fill this diagnostic `Record` from any handle.
    ///
    /// # Return
    ///
    /// `true` if a record has been found, `false` if not.
    pub fn fill_from(&mut self, handle: &(impl Diagnostics + ?Sized), record_number: i16) -> bool {
        match handle.diagnostic_record(record_number) {
            Some(record) => {
                *self = record;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {}, Native error: {}, Message: {}",
            self.state.as_str(),
            self.native_error,
            self.message,
        )
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
