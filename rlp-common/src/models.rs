//! Recipe domain models
//!
//! A recipe is stored across three tables linked 1:1 by primary key:
//! `recipes` (descriptive fields), `recipe_stats` (durability/quality) and
//! `training_data` (stat requirements). The API always exposes the three
//! together as a single flat record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pagination::PageRequest;

/// Crafting job (Disciple of the Hand) codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    /// Carpenter
    CRP,
    /// Blacksmith
    BSM,
    /// Armorer
    ARM,
    /// Goldsmith
    GSM,
    /// Leatherworker
    LTW,
    /// Weaver
    WVR,
    /// Alchemist
    ALC,
    /// Culinarian
    CUL,
}

impl Job {
    pub const ALL: [Job; 8] = [
        Job::CRP,
        Job::BSM,
        Job::ARM,
        Job::GSM,
        Job::LTW,
        Job::WVR,
        Job::ALC,
        Job::CUL,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Job::CRP => "CRP",
            Job::BSM => "BSM",
            Job::ARM => "ARM",
            Job::GSM => "GSM",
            Job::LTW => "LTW",
            Job::WVR => "WVR",
            Job::ALC => "ALC",
            Job::CUL => "CUL",
        }
    }

    /// Parse an exact three-letter job code (case-sensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Job::ALL.into_iter().find(|job| job.as_str() == code)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `recipes` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub job: Job,
    pub recipe_level: i64,
    pub master_book_level: i64,
    pub stars: i64,
    pub patch_version: String,
    pub collected_at: DateTime<Utc>,
}

/// Row of the `recipe_stats` table (keyed by the owning recipe id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStats {
    pub max_durability: i64,
    pub max_quality: i64,
    pub required_durability: i64,
}

/// Row of the `training_data` table (keyed by the owning recipe id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    pub required_craftsmanship: i64,
    pub required_control: i64,
    pub progress_per_100: f64,
    pub quality_per_100: f64,
}

/// A recipe joined with both owned sub-records, serialized flat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWithRelations {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(flatten)]
    pub stats: RecipeStats,
    #[serde(flatten)]
    pub training: TrainingData,
}

/// Fully validated input for recipe creation
///
/// Only produced by [`crate::validation::validate_new_recipe`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub job: Job,
    pub recipe_level: i64,
    pub master_book_level: i64,
    pub stars: i64,
    pub patch_version: String,
    #[serde(flatten)]
    pub stats: RecipeStats,
    #[serde(flatten)]
    pub training: TrainingData,
}

/// Validated partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub job: Option<Job>,
    pub recipe_level: Option<i64>,
    pub master_book_level: Option<i64>,
    pub stars: Option<i64>,
    pub patch_version: Option<String>,
    pub max_durability: Option<i64>,
    pub max_quality: Option<i64>,
    pub required_durability: Option<i64>,
    pub required_craftsmanship: Option<i64>,
    pub required_control: Option<i64>,
    pub progress_per_100: Option<f64>,
    pub quality_per_100: Option<f64>,
}

impl RecipePatch {
    pub fn touches_recipe(&self) -> bool {
        self.name.is_some()
            || self.job.is_some()
            || self.recipe_level.is_some()
            || self.master_book_level.is_some()
            || self.stars.is_some()
            || self.patch_version.is_some()
    }

    pub fn touches_stats(&self) -> bool {
        self.max_durability.is_some() || self.max_quality.is_some() || self.required_durability.is_some()
    }

    pub fn touches_training(&self) -> bool {
        self.required_craftsmanship.is_some()
            || self.required_control.is_some()
            || self.progress_per_100.is_some()
            || self.quality_per_100.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !(self.touches_recipe() || self.touches_stats() || self.touches_training())
    }
}

/// Request-scoped search filters plus pagination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Substring match on recipe name
    pub name: Option<String>,
    pub job: Option<Job>,
    pub min_level: Option<i64>,
    pub max_level: Option<i64>,
    pub master_book_level: Option<i64>,
    pub stars: Option<i64>,
    pub patch_version: Option<String>,
    pub min_craftsmanship: Option<i64>,
    pub max_craftsmanship: Option<i64>,
    pub min_control: Option<i64>,
    pub max_control: Option<i64>,
    pub page: PageRequest,
}

impl SearchCriteria {
    /// True when any filter beyond pagination is set
    pub fn has_filters(&self) -> bool {
        self.name.is_some()
            || self.job.is_some()
            || self.min_level.is_some()
            || self.max_level.is_some()
            || self.master_book_level.is_some()
            || self.stars.is_some()
            || self.patch_version.is_some()
            || self.min_craftsmanship.is_some()
            || self.max_craftsmanship.is_some()
            || self.min_control.is_some()
            || self.max_control.is_some()
    }
}
