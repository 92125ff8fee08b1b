//! Strain catalog models and DTOs.

use budedex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row from the `strains` table. Name is the natural key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Strain {
    pub name: String,
    pub url: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub strain_type: String,
    pub thc: Option<String>,
    pub cbd: Option<String>,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Row from the `strain_complete` view: the strain plus aggregated
/// taxonomy strings and genetics links.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrainComplete {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub strain: Strain,
    pub strain_id: Option<DbId>,
    pub aliases: Option<String>,
    pub positive_effects: Option<String>,
    pub negative_effects: Option<String>,
    pub flavors: Option<String>,
    pub terpenes: Option<String>,
    pub medical_benefits: Option<String>,
    pub parents: Option<String>,
    pub children: Option<String>,
}

/// Row from the `strain_search` view plus the computed relevance score.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrainSearchHit {
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub strain_type: String,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub search_text: String,
    pub relevance_score: i32,
}

/// DTO for creating a strain.
#[derive(Debug, Deserialize)]
pub struct CreateStrain {
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub strain_type: String,
    pub thc: Option<String>,
    pub cbd: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a strain. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStrain {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub strain_type: Option<String>,
    pub thc: Option<String>,
    pub cbd: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Listing parameters: filters plus a whitelisted sort.
#[derive(Debug, Clone, Default)]
pub struct StrainQuery {
    pub page: i64,
    pub limit: i64,
    pub strain_type: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Structured search filters, ANDed onto the free-text predicate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    #[serde(rename = "type")]
    pub strain_type: Option<String>,
    pub min_rating: Option<f64>,
    pub effects: Option<Vec<String>>,
    pub flavors: Option<Vec<String>>,
    pub terpenes: Option<Vec<String>>,
    pub medical_conditions: Option<Vec<String>>,
}

/// Row from the `popular_strains` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PopularStrain {
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub strain_type: String,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub favourite_count: i64,
    pub seen_count: i64,
    pub popularity_score: f64,
}

/// Row from the `effects` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Effect {
    pub effect: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub effect_type: String,
}

/// Row from the `flavors` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flavor {
    pub flavor: String,
}

/// Row from the `terpenes` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Terpene {
    pub terpene_name: String,
    pub terpene_type: Option<String>,
}

/// Row from the `medical_conditions` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalCondition {
    pub condition_name: String,
}
