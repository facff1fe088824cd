use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSource {
    #[default]
    Api,
    Page,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployerRatingsQuery {
    /// Comma-separated employer ids.
    #[validate(length(min = 1))]
    pub ids: String,
    #[serde(default)]
    pub source: RatingSource,
}

impl EmployerRatingsQuery {
    pub fn employer_ids(&self) -> BTreeSet<String> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployerRatingsResponse {
    pub source: &'static str,
    pub ratings: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheInfoResponse {
    pub vacancy_descriptions_api: usize,
    pub vacancy_descriptions_page: usize,
    pub employer_page_ratings: usize,
    pub eviction: &'static str,
}
