use crate::{
    handles::{BindColArgs, ColumnDescription, NULL_DATA},
    Error,
};

use super::{ColumnBuffer, Indicator};

/// Default number of bytes bound for each column. Fits the vast majority of values, so growing a
/// buffer stays the exception.
pub const DEFAULT_BUFFER_LEN: usize = 255;

/// Owns one receive buffer per column of a result set, together with the column descriptions and
/// the indicators.
///
/// The backend writes indicators through the raw pointers handed out by [`Self::bind_arguments`].
/// They live in an allocation of their own, which is never resized, so their addresses stay valid
/// for the lifetime of the table, even if the table itself is moved or a value buffer is
/// replaced. The table only ever reads them.
#[derive(Debug, Default)]
pub struct ColumnBufferTable {
    descriptions: Vec<ColumnDescription>,
    buffers: Vec<ColumnBuffer>,
    indicators: Vec<isize>,
}

impl ColumnBufferTable {
    /// Allocates a buffer of `max_len` bytes for each described column. The position of a
    /// description determines the zero based index of its column.
    pub fn new(descriptions: Vec<ColumnDescription>, max_len: usize) -> Self {
        let buffers = descriptions
            .iter()
            .map(|_| ColumnBuffer::new(max_len))
            .collect();
        let indicators = vec![NULL_DATA; descriptions.len()];
        Self {
            descriptions,
            buffers,
            indicators,
        }
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.buffers.len()
    }

    /// Description of the column with the zero based `buffer_index`.
    pub fn description(&self, buffer_index: usize) -> Option<&ColumnDescription> {
        self.descriptions.get(buffer_index)
    }

    /// Descriptions of all columns, ordered by index.
    pub fn descriptions(&self) -> &[ColumnDescription] {
        &self.descriptions
    }

    /// Existence and complete length of the value in the current row. Panics if out of bounds.
    pub fn indicator(&self, buffer_index: usize) -> Indicator {
        Indicator::from_isize(self.indicators[buffer_index])
    }

    /// The bytes of the current value which are actually in the buffer. `None` for `NULL`.
    pub fn value(&self, buffer_index: usize) -> Option<&[u8]> {
        self.buffers[buffer_index].value(self.indicator(buffer_index))
    }

    /// Writes a zero right after the current value of the column.
    pub fn terminate(&mut self, buffer_index: usize) {
        let indicator = self.indicator(buffer_index);
        self.buffers[buffer_index].terminate(indicator)
    }

    /// Describes all buffers, so they can be declared to the statement. Must be called again after
    /// any buffer grew, since the old descriptions point to freed memory.
    pub fn bind_arguments(&mut self) -> Vec<BindColArgs> {
        let indicators = self.indicators.as_mut_ptr();
        self.buffers
            .iter_mut()
            .enumerate()
            .map(|(buffer_index, buffer)| BindColArgs {
                target_value: buffer.target_value(),
                target_length: buffer.max_len(),
                indicator: indicators.wrapping_add(buffer_index),
            })
            .collect()
    }

    /// Makes sure the complete value of the column at `buffer_index` is in its buffer. If the
    /// value of the current row has been truncated, a buffer large enough to hold it is allocated
    /// and `fetch_column` is invoked to transfer the value directly into it.
    ///
    /// # Return
    ///
    /// `true` if the buffer has been replaced. In this case the table must be bound to the
    /// statement again, before fetching the next row.
    pub fn ensure_capacity<F>(&mut self, buffer_index: u16, fetch_column: F) -> Result<bool, Error>
    where
        F: FnOnce(u16, &BindColArgs) -> Result<(), Error>,
    {
        let index = usize::from(buffer_index);
        let indicator = self.indicator(index);
        let target_indicator = self.indicators.as_mut_ptr().wrapping_add(index);
        self.buffers[index].fetch_complete_value(
            buffer_index,
            indicator,
            target_indicator,
            |target| fetch_column(buffer_index, target),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        buffers::Indicator,
        handles::{ColumnDescription, DataType, NO_TOTAL, NULL_DATA},
    };

    use super::ColumnBufferTable;

    fn table(num_cols: usize, max_len: usize) -> ColumnBufferTable {
        let descriptions = (1..=num_cols)
            .map(|n| ColumnDescription::new(format!("c{n}"), DataType::Varchar { length: 10 }))
            .collect();
        ColumnBufferTable::new(descriptions, max_len)
    }

    #[test]
    fn one_buffer_per_description() {
        let mut table = table(3, 10);

        assert_eq!(3, table.num_cols());
        assert_eq!("c2", table.description(1).unwrap().name);
        assert!(table.description(3).is_none());
        assert_eq!(10, table.bind_arguments()[2].target_length);
        assert_eq!(Indicator::Null, table.indicator(0));
    }

    #[test]
    fn bind_arguments_describe_each_column() {
        let mut table = table(2, 10);

        let args = table.bind_arguments();

        assert_eq!(2, args.len());
        assert!(args.iter().all(|arg| arg.target_length == 10));
        assert_ne!(args[0].target_value, args[1].target_value);
        assert_ne!(args[0].indicator, args[1].indicator);
    }

    #[test]
    fn indicators_written_through_bound_pointers() {
        let mut table = table(2, 10);
        let mut args = table.bind_arguments();

        unsafe {
            *args[0].indicator = 3;
            *args[1].indicator = NO_TOTAL;
        }
        // Moving the table must not invalidate the bound pointers.
        let mut moved = table;
        unsafe {
            *args[0].indicator = 4;
        }

        assert_eq!(Indicator::Length(4), moved.indicator(0));
        assert_eq!(Indicator::NoTotal, moved.indicator(1));
        moved.terminate(0);
        assert_eq!(Some(&[0u8; 4][..]), moved.value(0));
    }

    #[test]
    fn only_truncated_columns_are_fetched_again() {
        let mut table = table(3, 4);
        let mut args = table.bind_arguments();
        unsafe {
            *args[0].indicator = 4;
            *args[1].indicator = NULL_DATA;
            *args[2].indicator = NO_TOTAL;
        }

        let grown_first = table
            .ensure_capacity(0, |_, _| panic!("Value fits into buffer."))
            .unwrap();
        let grown_second = table
            .ensure_capacity(1, |_, _| panic!("NULL never needs fetching."))
            .unwrap();
        let grown_third = table
            .ensure_capacity(2, |_, _| panic!("Unknown length can not be fetched."))
            .unwrap();

        assert!(!grown_first);
        assert!(!grown_second);
        assert!(!grown_third);
    }

    #[test]
    fn grow_truncated_column() {
        let mut table = table(2, 4);
        let mut args = table.bind_arguments();
        unsafe {
            *args[1].indicator = 12;
        }

        let grown = table
            .ensure_capacity(1, |index, target| {
                assert_eq!(1, index);
                assert_eq!(12, target.target_length);
                // Indicator of the new target is the one bound before.
                assert_eq!(args[1].indicator, target.indicator);
                unsafe {
                    std::ptr::copy_nonoverlapping(b"Hello, World".as_ptr(), target.target_value, 12)
                };
                Ok(())
            })
            .unwrap();

        assert!(grown);
        assert_eq!(Some(&b"Hello, World"[..]), table.value(1));
        let rebound = table.bind_arguments();
        assert_eq!(12, rebound[1].target_length);
        // Untouched
        assert_eq!(4, rebound[0].target_length);
        assert_eq!(args[0].target_value, rebound[0].target_value);
    }
}
