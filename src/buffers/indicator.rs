use crate::handles::{NO_TOTAL, NULL_DATA};

/// Indicates existence and length of a value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Indicator {
    /// Field does not exist
    Null,
    /// Field exists, but its length had not be reported by the backend.
    NoTotal,
    /// Fields exists. Value indicates number of bytes required to store the value. In case of
    /// truncated data, this is the true length of the data, before truncation occurred.
    Length(usize),
}

impl Indicator {
    /// Creates an indicator from an `isize` indicator value written by the backend. Negative
    /// values other than [`NULL_DATA`] carry no length and are treated like [`NO_TOTAL`].
    pub fn from_isize(indicator: isize) -> Self {
        match indicator {
            NULL_DATA => Indicator::Null,
            NO_TOTAL => Indicator::NoTotal,
            other => match usize::try_from(other) {
                Ok(len) => Indicator::Length(len),
                Err(_) => Indicator::NoTotal,
            },
        }
    }

    /// Does this indicator imply truncation for a value of the given length?
    ///
    /// `length_in_buffer` is specified in bytes without terminating zeroes.
    pub fn is_truncated(self, length_in_buffer: usize) -> bool {
        match self {
            Indicator::Null => false,
            Indicator::NoTotal => true,
            Indicator::Length(complete_length) => complete_length > length_in_buffer,
        }
    }

    /// Only `true` if the indicator is the equivalent to [`NULL_DATA`], indicating a non-existing
    /// value.
    pub fn is_null(self) -> bool {
        match self {
            Indicator::Null => true,
            Indicator::NoTotal | Indicator::Length(_) => false,
        }
    }

    /// If the indicator is [`Indicator::Length`] this is [`Some`].
    pub fn length(self) -> Option<usize> {
        if let Indicator::Length(len) = self {
            Some(len)
        } else {
            None
        }
    }
}
