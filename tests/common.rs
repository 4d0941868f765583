#![allow(dead_code)]

use std::{cell::Cell, ptr, rc::Rc};

use buffered_cursor::handles::{
    BindColArgs, ColumnDescription, DataType, Diagnostics, Record, SqlResult, State, Statement,
    NO_TOTAL, NULL_DATA,
};

/// Initialize logging once, so tests can be run with e.g. `RUST_LOG=debug cargo test`.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Number of calls a cursor made to each method of a [`StatementStub`]. Shared via `Rc`, so tests
/// can inspect it while the statement is owned by the cursor.
#[derive(Debug, Default)]
pub struct Calls {
    pub bind_cols: Cell<usize>,
    pub fetch: Cell<usize>,
    pub fetch_column: Cell<usize>,
    pub store_result: Cell<usize>,
    pub reset: Cell<usize>,
    pub free_result: Cell<usize>,
    pub close: Cell<usize>,
}

fn count(calls: &Cell<usize>) {
    calls.set(calls.get() + 1)
}

/// In memory result set, writing its rows into the buffers bound by the cursor, just like a real
/// backend would.
pub struct StatementStub {
    columns: Vec<ColumnDescription>,
    rows: Vec<Vec<Option<Vec<u8>>>>,
    /// Index of the row the statement is positioned on.
    current: Option<usize>,
    next_row: usize,
    bound: Vec<BindColArgs>,
    last_error: Option<Record>,
    pub calls: Rc<Calls>,
    pub fail_describe: bool,
    /// Fail binding once `bind_cols` has been called this many times.
    pub fail_bind_after: Option<usize>,
    /// Fail fetching the row with this zero based index.
    pub fail_fetch_at: Option<usize>,
    pub fail_fetch_column: bool,
    pub fail_store_result: bool,
    pub fail_reset: bool,
    /// Failing calls do not leave a diagnostic record.
    pub omit_diagnostics: bool,
    /// Answer `fetch_column`, `store_result` and `reset` with `NoData`.
    pub no_data: bool,
    /// Write `NO_TOTAL` instead of the complete length of truncated values.
    pub report_no_total: bool,
    /// Overrides the number of result columns reported, without changing the descriptions.
    pub reported_cols: Option<u16>,
}

impl StatementStub {
    /// A result set with one `VARCHAR` column for each name and no rows.
    pub fn new(column_names: &[&str]) -> Self {
        let columns = column_names
            .iter()
            .map(|&name| ColumnDescription::new(name, DataType::Varchar { length: 255 }))
            .collect();
        Self {
            columns,
            rows: Vec::new(),
            current: None,
            next_row: 0,
            bound: Vec::new(),
            last_error: None,
            calls: Rc::new(Calls::default()),
            fail_describe: false,
            fail_bind_after: None,
            fail_fetch_at: None,
            fail_fetch_column: false,
            fail_store_result: false,
            fail_reset: false,
            omit_diagnostics: false,
            no_data: false,
            report_no_total: false,
            reported_cols: None,
        }
    }

    /// Appends a row of text values. `None` represents `NULL`.
    pub fn with_row(self, values: &[Option<&str>]) -> Self {
        let row = values
            .iter()
            .map(|value| value.map(|text| text.as_bytes().to_vec()))
            .collect();
        self.with_values(row)
    }

    /// Appends a row of raw values. `None` represents `NULL`.
    pub fn with_values(mut self, row: Vec<Option<Vec<u8>>>) -> Self {
        assert_eq!(self.columns.len(), row.len());
        self.rows.push(row);
        self
    }

    /// Shared handle to the call counters.
    pub fn calls(&self) -> Rc<Calls> {
        self.calls.clone()
    }

    fn error(&mut self, function: &'static str, message: &str) -> SqlResult<()> {
        self.last_error = if self.omit_diagnostics {
            None
        } else {
            Some(Record::new(State::GENERAL_ERROR, 2013, message))
        };
        SqlResult::Error { function }
    }
}

/// Writes `value` into `target` like a backend would. Returns `true` if the value has been
/// truncated.
///
/// # Safety
///
/// `target` must point to valid memory.
unsafe fn write_value(target: &BindColArgs, value: Option<&[u8]>, no_total: bool) -> bool {
    match value {
        None => {
            *target.indicator = NULL_DATA;
            false
        }
        Some(bytes) => {
            let len = bytes.len().min(target.target_length);
            ptr::copy_nonoverlapping(bytes.as_ptr(), target.target_value, len);
            let truncated = bytes.len() > target.target_length;
            *target.indicator = if truncated && no_total {
                NO_TOTAL
            } else {
                bytes.len() as isize
            };
            truncated
        }
    }
}

impl Diagnostics for StatementStub {
    fn diagnostic_record(&self, rec_number: i16) -> Option<Record> {
        assert!(rec_number > 0);
        if rec_number == 1 {
            self.last_error.clone()
        } else {
            None
        }
    }
}

unsafe impl Statement for StatementStub {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    fn num_result_cols(&self) -> u16 {
        self.reported_cols.unwrap_or(self.columns.len() as u16)
    }

    fn describe_cols(&mut self) -> SqlResult<Vec<ColumnDescription>> {
        if self.fail_describe {
            return self
                .error("describe_cols", "Prepared statement contains no metadata")
                .map(|()| Vec::new());
        }
        SqlResult::Success(self.columns.clone())
    }

    unsafe fn bind_cols(&mut self, columns: &[BindColArgs]) -> SqlResult<()> {
        count(&self.calls.bind_cols);
        if let Some(limit) = self.fail_bind_after {
            if self.calls.bind_cols.get() > limit {
                return self.error("bind_cols", "Using unsupported buffer type");
            }
        }
        assert_eq!(self.columns.len(), columns.len());
        self.bound = columns.to_vec();
        SqlResult::Success(())
    }

    unsafe fn fetch(&mut self) -> SqlResult<()> {
        count(&self.calls.fetch);
        if self.fail_fetch_at == Some(self.next_row) {
            return self.error("fetch", "Lost connection to server during query");
        }
        if self.next_row >= self.rows.len() {
            self.current = None;
            return SqlResult::NoData;
        }
        let mut truncated = false;
        for (target, value) in self.bound.iter().zip(&self.rows[self.next_row]) {
            truncated |= write_value(target, value.as_deref(), self.report_no_total);
        }
        self.current = Some(self.next_row);
        self.next_row += 1;
        if truncated {
            SqlResult::SuccessWithInfo(())
        } else {
            SqlResult::Success(())
        }
    }

    unsafe fn fetch_column(&mut self, buffer_index: u16, target: &BindColArgs) -> SqlResult<()> {
        count(&self.calls.fetch_column);
        if self.fail_fetch_column {
            return self.error("fetch_column", "Lost connection to server during query");
        }
        if self.no_data {
            return SqlResult::NoData;
        }
        let row = self
            .current
            .expect("fetch_column must only be called while positioned on a row");
        let value = self.rows[row][usize::from(buffer_index)].as_deref();
        write_value(target, value, false);
        SqlResult::Success(())
    }

    fn store_result(&mut self) -> SqlResult<()> {
        count(&self.calls.store_result);
        if self.fail_store_result {
            return self.error("store_result", "Out of memory");
        }
        if self.no_data {
            return SqlResult::NoData;
        }
        SqlResult::Success(())
    }

    fn reset(&mut self) -> SqlResult<()> {
        count(&self.calls.reset);
        if self.fail_reset {
            return self.error("reset", "Commands out of sync");
        }
        self.current = None;
        self.next_row = self.rows.len();
        if self.no_data {
            SqlResult::NoData
        } else {
            SqlResult::Success(())
        }
    }

    fn free_result(&mut self) {
        count(&self.calls.free_result);
        self.bound.clear();
    }

    fn close(&mut self) {
        count(&self.calls.close);
    }
}
