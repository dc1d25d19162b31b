pub mod types;
pub mod filter;
pub mod filter_fields;
pub mod filter_order;
pub mod records;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::{filter, filter_refs, matches, Filter};
pub use filter_fields::{field, optional_field, FieldAccessors};
pub use filter_order::{FilterOrder, SortKeys, SortValue};
pub use records::{lease_accessors, Filterable, Sortable};
