use std::time::Instant;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::vacancy_dto::{
        AnalyzeQuery, AnalyzeResponse, EmployerDetail, EmployerMarksQuery, EmployerMarksResponse,
        FetchQuery, ItemsResponse, SalarySample, SalaryValidationQuery, SalaryValidationResponse,
    },
    error::Result,
    services::{
        analytics_service::{raw_salary_stats, salary_stats, top_skills, DEFAULT_TOP_SKILLS},
        salary_service::normalize_salary,
    },
    AppState,
};

const SAMPLE_SIZE: usize = 10;

#[axum::debug_handler]
pub async fn fetch(
    State(state): State<AppState>,
    Query(params): Query<FetchQuery>,
) -> Result<Response> {
    params.validate()?;
    let mut items = state
        .vacancy_source
        .fetch_vacancies(&params.search())
        .await?;
    info!(query = %params.query, count = items.len(), "Vacancies fetched");

    if params.include_description {
        state
            .enrichment_service
            .enrich_with_descriptions(&mut items, params.preference())
            .await;
    }

    if params.simplified {
        let parsed = state
            .extraction_service
            .parse_vacancies(&items, params.employer_mark);
        Ok(Json(ItemsResponse::from(parsed)).into_response())
    } else {
        Ok(Json(ItemsResponse::from(items)).into_response())
    }
}

#[axum::debug_handler]
pub async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;
    let items = state
        .vacancy_source
        .fetch_vacancies(&params.search())
        .await?;
    let parsed = state.extraction_service.parse_vacancies(&items, false);

    Ok(Json(AnalyzeResponse {
        query: params.query,
        area: params.area,
        count: items.len(),
        salaries: salary_stats(&parsed),
        skills: top_skills(&items, DEFAULT_TOP_SKILLS),
    }))
}

#[axum::debug_handler]
pub async fn salary_validation(
    State(state): State<AppState>,
    Query(params): Query<SalaryValidationQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;
    let items = state
        .vacancy_source
        .fetch_vacancies(&params.search())
        .await?;

    let salary_samples = items
        .iter()
        .take(SAMPLE_SIZE)
        .map(|item| SalarySample {
            id: item.id.clone(),
            title: item.name.clone(),
            raw_salary: item.salary.clone(),
            normalized: normalize_salary(item.salary.as_ref()),
            employer: item.employer.as_ref().and_then(|e| e.name.clone()),
        })
        .collect();

    let items_with_salary = items
        .iter()
        .filter(|item| normalize_salary(item.salary.as_ref()).is_some())
        .count();
    let salary_coverage = if items.is_empty() {
        "0%".to_string()
    } else {
        format!(
            "{:.1}%",
            items_with_salary as f64 / items.len() as f64 * 100.0
        )
    };

    Ok(Json(SalaryValidationResponse {
        query: params.query,
        area: params.area,
        total_items: items.len(),
        items_with_salary,
        salary_coverage,
        salary_samples,
        salary_stats: raw_salary_stats(&items),
    }))
}

#[axum::debug_handler]
pub async fn employer_marks(
    State(state): State<AppState>,
    Query(params): Query<EmployerMarksQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;
    let started = Instant::now();

    let items = state
        .vacancy_source
        .fetch_vacancies(&params.search())
        .await?;
    let parsed = state.extraction_service.parse_vacancies(&items, true);

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let weights = state.extraction_service.scorer().weights();

    Ok(Json(EmployerMarksResponse {
        query: params.query,
        area: params.area,
        total_items: items.len(),
        processing_time_ms: (elapsed_ms * 100.0).round() / 100.0,
        employer_details: parsed.iter().take(SAMPLE_SIZE).map(EmployerDetail::from).collect(),
        note: format!(
            "Employer marks (1-5 scale) computed from: trusted flag ({:.0}%), salary availability ({:.0}%), avg salary ({:.0}%), vacancy count ({:.0}%)",
            weights.trusted * 100.0,
            weights.salary_rate * 100.0,
            weights.avg_salary * 100.0,
            weights.vacancy_count * 100.0,
        ),
    }))
}
