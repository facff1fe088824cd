use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::employer_dto::{
        CacheInfoResponse, EmployerRatingsQuery, EmployerRatingsResponse, RatingSource,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn employer_ratings(
    State(state): State<AppState>,
    Query(params): Query<EmployerRatingsQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;
    let ids = params.employer_ids();

    let ratings: BTreeMap<String, Option<f64>> = match params.source {
        RatingSource::Api => state
            .rating_service
            .fetch_employer_ratings(&ids)
            .await
            .into_iter()
            .map(|(id, lookup)| (id, lookup.found()))
            .collect(),
        RatingSource::Page => {
            let mut ratings = BTreeMap::new();
            for id in ids {
                let lookup = state.rating_service.scrape_employer_mark(&id).await;
                ratings.insert(id, lookup.found());
            }
            ratings
        }
    };

    Ok(Json(EmployerRatingsResponse {
        source: match params.source {
            RatingSource::Api => "api",
            RatingSource::Page => "page",
        },
        ratings,
    }))
}

#[axum::debug_handler]
pub async fn cache_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(CacheInfoResponse {
        vacancy_descriptions_api: state.enrichment_service.api_cache().len(),
        vacancy_descriptions_page: state.enrichment_service.page_cache().len(),
        employer_page_ratings: state.rating_service.scrape_cache().len(),
        eviction: "none",
    })
}
