use super::data_type::DataType;

/// Indication of whether a column is nullable or not.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Nullable {
    #[default]
    Unknown,
    Nullable,
    NoNulls,
}

/// Describes the type and attributes of a column. Reported by the backend once, when the cursor is
/// created, and never changed afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct ColumnDescription {
    /// Column name. May be empty if unavailable.
    pub name: String,
    /// Type of the column
    pub data_type: DataType,
    /// Indicates whether the column is nullable or not.
    pub nullable: Nullable,
}

impl ColumnDescription {
    /// Creates a description for a column of unknown nullability.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: Nullable::Unknown,
        }
    }
}
