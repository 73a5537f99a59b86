//! Queryable API models.
//!
//! Each model declares its fields up front through [`Model::FIELDS`], so a
//! filter can only ever reference a field the API actually exposes.

mod field;
mod movie;
mod quote;

pub use field::{resolve_field, FieldDescriptor, FieldSelector};
pub use movie::{Movie, MovieField};
pub use quote::{Quote, QuoteField};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A document type served by the API.
pub trait Model: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    /// Symbolic identifier for each field of the model.
    type Field: Copy + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Human-readable model name, used in diagnostics.
    const NAME: &'static str;

    /// Every field the API exposes for this model.
    const FIELDS: &'static [FieldDescriptor<Self::Field>];

    /// Wire names of all declared fields, in declaration order.
    fn wire_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(FieldDescriptor::wire_name).collect()
    }
}
