use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{FieldDescriptor, Model};

/// A line of dialog spoken in one of the films.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: String,
    pub dialog: String,
    /// Id of the character speaking.
    pub character: String,
    /// Id of the movie the quote is from.
    pub movie: String,
}

/// Filterable fields of [`Quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QuoteField {
    Id,
    Dialog,
    Character,
    Movie,
}

impl Model for Quote {
    type Field = QuoteField;

    const NAME: &'static str = "Quote";

    const FIELDS: &'static [FieldDescriptor<QuoteField>] = &[
        FieldDescriptor::renamed(QuoteField::Id, "id", "_id"),
        FieldDescriptor::new(QuoteField::Dialog, "dialog"),
        FieldDescriptor::new(QuoteField::Character, "character"),
        FieldDescriptor::new(QuoteField::Movie, "movie"),
    ];
}
