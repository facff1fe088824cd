pub mod analytics_service;
pub mod cache;
pub mod enrichment_service;
pub mod extraction_service;
pub mod hh_service;
pub mod rating_service;
pub mod salary_service;
pub mod scoring_service;
pub mod sources;
