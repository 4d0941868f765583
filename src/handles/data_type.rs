/// Enumeration over the SQL data types a backend may declare for a column. The cursor fetches
/// every column as raw bytes regardless of its type, so this serves as information for the
/// application only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataType {
    /// The type is not known.
    #[default]
    Unknown,
    /// `Char(n)`. Character string of fixed length.
    Char {
        /// Column size in characters (excluding terminating zero).
        length: usize,
    },
    /// `Varchar(n)`. Variable length character string.
    Varchar {
        /// Maximum length of the character string (excluding terminating zero).
        length: usize,
    },
    /// `TEXT`, `CLOB` or similar. Character data without a declared upper bound.
    LongVarchar,
    /// `Binary(n)`. Binary data of fixed length.
    Binary {
        /// Length in bytes.
        length: usize,
    },
    /// `Varbinary(n)`. Variable length binary data.
    Varbinary {
        /// Maximum length in bytes.
        length: usize,
    },
    /// `BLOB` or similar. Binary data without a declared upper bound.
    LongVarbinary,
    /// `Decimal(p,s)`. Signed, exact, numeric value with a precision of at least p and scale s.
    Decimal {
        /// Total number of digits.
        precision: usize,
        /// Number of decimal digits.
        scale: i16,
    },
    /// `TINYINT`. 8 Bit Integer
    Tinyint,
    /// `Smallint`. 16 Bit Integer
    SmallInt,
    /// `Integer`. 32 Bit Integer
    Integer,
    /// `BIGINT`. 64 Bit Integer
    Bigint,
    /// `Real`. Signed, approximate, numeric value with a binary precision 24.
    Real,
    /// `Double Precision`. Signed, approximate, numeric value with a binary precision 53.
    Double,
    /// `BIT`. Single bit binary data.
    Bit,
    /// `Date`. Year, month, and day fields.
    Date,
    /// `Time`. Hour, minute, and second fields. Precision p indicates the seconds precision.
    Time { precision: i16 },
    /// `Timestamp`. Year, month, day, hour, minute, and second fields.
    Timestamp { precision: i16 },
    /// The backend declared a type which is not among the other types of these enumeration.
    Other {
        /// Backend specific type code.
        type_code: i32,
    },
}
