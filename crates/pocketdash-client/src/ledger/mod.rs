pub mod aggregate;
pub mod colors;
pub mod date;
pub mod normalize;
pub mod types;

pub use aggregate::{aggregate, classify};
pub use colors::{ColorResolver, ColorRule};
pub use date::{DateLabelStyle, parse_timestamp, relative_group, relative_group_with};
pub use normalize::{NormalizedRows, normalize_records, parse_positive_amount};
pub use types::{
    Aggregate, CategoryAggregate, MonthlySummary, RowExclusions, Transaction, TransactionKind,
};
