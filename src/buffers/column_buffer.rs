use std::cmp::min;

use log::debug;

use crate::{handles::BindColArgs, Error};

use super::Indicator;

/// Receive buffer for the value of a single column. The buffer is always one byte larger than the
/// length bound to the statement, to make room for a terminating zero.
///
/// The indicator belonging to the value is not part of this buffer. It is owned by the
/// [`super::ColumnBufferTable`] and passed in where needed.
#[derive(Debug)]
pub struct ColumnBuffer {
    /// Bound length plus one.
    values: Vec<u8>,
}

impl ColumnBuffer {
    /// Allocates a buffer able to receive values of up to `max_len` bytes without truncation.
    pub fn new(max_len: usize) -> Self {
        Self {
            values: vec![0; max_len + 1],
        }
    }

    /// Number of bytes the backend may write into this buffer.
    pub fn max_len(&self) -> usize {
        self.values.len() - 1
    }

    /// The bytes of the current value which are actually in the buffer. `None` if the value is
    /// `NULL`. Shorter than [`Indicator::length`] if the value is truncated. If the length is not
    /// known, the entire buffer is returned.
    pub fn value(&self, indicator: Indicator) -> Option<&[u8]> {
        match indicator {
            Indicator::Null => None,
            Indicator::NoTotal => Some(&self.values[..self.max_len()]),
            Indicator::Length(len) => Some(&self.values[..min(len, self.max_len())]),
        }
    }

    /// Writes a zero right after the value, so the buffer can be handed out as a C string.
    pub fn terminate(&mut self, indicator: Indicator) {
        if let Indicator::Length(len) = indicator {
            let end = min(len, self.max_len());
            self.values[end] = 0;
        }
    }

    /// Start address the backend writes values to. The pointer stays valid until the buffer is
    /// replaced by [`Self::fetch_complete_value`].
    pub fn target_value(&mut self) -> *mut u8 {
        self.values.as_mut_ptr()
    }

    /// Fetches the complete value of a truncated column into a newly allocated buffer of exactly
    /// the required size. The new buffer replaces the old one, only if `fetch_column` succeeds.
    /// Otherwise the buffer is unchanged and the value stays truncated.
    ///
    /// # Parameters
    ///
    /// * `buffer_index`: Zero based index of the column. Used for logging and errors.
    /// * `indicator`: Indicator of the current value, as written by the last fetch.
    /// * `target_indicator`: Location of the indicator, handed to `fetch_column` so the backend
    ///   can update it.
    ///
    /// # Return
    ///
    /// `true` if the buffer has been replaced, `false` if the value has not been truncated in the
    /// first place, or its complete length is unknown.
    pub(crate) fn fetch_complete_value<F>(
        &mut self,
        buffer_index: u16,
        indicator: Indicator,
        target_indicator: *mut isize,
        fetch_column: F,
    ) -> Result<bool, Error>
    where
        F: FnOnce(&BindColArgs) -> Result<(), Error>,
    {
        if !indicator.is_truncated(self.max_len()) {
            return Ok(false);
        }
        let Some(len) = indicator.length() else {
            return Ok(false);
        };
        debug!(
            "Growing buffer of truncated column {}. Maximum length {} => {}",
            usize::from(buffer_index) + 1,
            self.max_len(),
            len
        );
        let mut values = Vec::new();
        values
            .try_reserve_exact(len + 1)
            .map_err(|_| Error::TooLargeColumnBufferSize {
                buffer_index,
                element_size: len + 1,
            })?;
        values.resize(len + 1, 0);
        let target = BindColArgs {
            target_value: values.as_mut_ptr(),
            target_length: len,
            indicator: target_indicator,
        };
        fetch_column(&target)?;
        self.values = values;
        Ok(true)
    }
}
