pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    enrichment_service::EnrichmentService,
    extraction_service::ExtractionService,
    hh_service::HhService,
    rating_service::RatingService,
    salary_service::ShiftPayEstimator,
    scoring_service::EmployerScorer,
    sources::{EmployerProfileSource, PageSource, VacancyDetailSource, VacancySource},
};

#[derive(Clone)]
pub struct AppState {
    pub vacancy_source: Arc<dyn VacancySource>,
    pub enrichment_service: EnrichmentService,
    pub rating_service: RatingService,
    pub extraction_service: ExtractionService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let hh = Arc::new(HhService::new(config)?);
        Ok(Self::from_sources(
            hh.clone(),
            hh.clone(),
            hh.clone(),
            hh,
            config,
        ))
    }

    pub fn from_sources(
        vacancy_source: Arc<dyn VacancySource>,
        detail_source: Arc<dyn VacancyDetailSource>,
        page_source: Arc<dyn PageSource>,
        profile_source: Arc<dyn EmployerProfileSource>,
        config: &Config,
    ) -> Self {
        let enrichment_service = EnrichmentService::new(detail_source, page_source.clone())
            .with_concurrency_limit(config.enrich_concurrency);
        let rating_service =
            RatingService::new(profile_source, page_source, config.hh_site_base_url.clone());
        let extraction_service = ExtractionService::new(
            ShiftPayEstimator::new(config.shifts_per_month),
            EmployerScorer::default(),
        );

        Self {
            vacancy_source,
            enrichment_service,
            rating_service,
            extraction_service,
        }
    }
}
