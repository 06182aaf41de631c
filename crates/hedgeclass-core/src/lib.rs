//! Core types for hedgeclass: the static category/priority table, label ids
//! and names, per-paragraph label vectors, and their Arrow schema.

pub mod category;
mod error;
pub mod label;
pub mod names;
pub mod schema;
pub mod vector;

pub use category::{
    DEFAULT_THRESHOLD, Family, FamilyOutcomes, GENERIC_RESOLUTION_FACTOR, HEDGE_PRIORITY,
    Instrument, SPECIFIC_FAMILIES, TimeContext,
};
pub use error::LabelError;
pub use label::LabelId;
pub use names::{LabelNames, UNKNOWN_LABEL};
pub use schema::labels;
pub use vector::{FIELD_COUNT, Field, LabelVector};
