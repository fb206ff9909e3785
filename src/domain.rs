//! Domain module - listing entities and validated property rows
//!
//! Buildings and their units are created fresh by each extraction pass and
//! are never mutated afterwards; validated properties are flat projections of
//! building/unit pairs that passed the habitability filter.

pub mod criteria;
pub mod listing;
pub mod property;

pub use criteria::{AssumedAttributes, ValidationCriteria};
pub use listing::{Building, Floor, SchemaRevision, StationAccess, Unit};
pub use property::{AttributeOrigin, PropertyType, ValidatedProperty};
