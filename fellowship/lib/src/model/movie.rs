use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{FieldDescriptor, Model};

/// A film from the trilogies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub runtime_in_minutes: u32,
    pub budget_in_millions: f64,
    pub box_office_revenue_in_millions: f64,
    pub academy_award_nominations: u32,
    pub academy_award_wins: u32,
    pub rotten_tomatoes_score: f64,
}

/// Filterable fields of [`Movie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MovieField {
    Id,
    Name,
    RuntimeInMinutes,
    BudgetInMillions,
    BoxOfficeRevenueInMillions,
    AcademyAwardNominations,
    AcademyAwardWins,
    RottenTomatoesScore,
}

impl Model for Movie {
    type Field = MovieField;

    const NAME: &'static str = "Movie";

    const FIELDS: &'static [FieldDescriptor<MovieField>] = &[
        FieldDescriptor::renamed(MovieField::Id, "id", "_id"),
        FieldDescriptor::new(MovieField::Name, "name"),
        FieldDescriptor::renamed(MovieField::RuntimeInMinutes, "runtime_in_minutes", "runtimeInMinutes"),
        FieldDescriptor::renamed(MovieField::BudgetInMillions, "budget_in_millions", "budgetInMillions"),
        FieldDescriptor::renamed(
            MovieField::BoxOfficeRevenueInMillions,
            "box_office_revenue_in_millions",
            "boxOfficeRevenueInMillions",
        ),
        FieldDescriptor::renamed(
            MovieField::AcademyAwardNominations,
            "academy_award_nominations",
            "academyAwardNominations",
        ),
        FieldDescriptor::renamed(MovieField::AcademyAwardWins, "academy_award_wins", "academyAwardWins"),
        FieldDescriptor::renamed(
            MovieField::RottenTomatoesScore,
            "rotten_tomatoes_score",
            "rottenTomatoesScore",
        ),
    ];
}
