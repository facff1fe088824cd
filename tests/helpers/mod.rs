#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use job_analytics_backend::{
    config::Config,
    error::{Error, Result},
    models::{
        employer::EmployerProfile,
        vacancy::{RawVacancy, VacancySearch},
    },
    routes,
    services::sources::{EmployerProfileSource, PageSource, VacancyDetailSource, VacancySource},
    AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub struct StaticVacancies(pub Vec<RawVacancy>);

#[async_trait]
impl VacancySource for StaticVacancies {
    async fn fetch_vacancies(&self, _search: &VacancySearch) -> Result<Vec<RawVacancy>> {
        Ok(self.0.clone())
    }
}

pub struct UnavailableVacancies;

#[async_trait]
impl VacancySource for UnavailableVacancies {
    async fn fetch_vacancies(&self, _search: &VacancySearch) -> Result<Vec<RawVacancy>> {
        Err(Error::Upstream {
            status: 503,
            url: "https://api.hh.ru/vacancies".to_string(),
        })
    }
}

#[derive(Default)]
pub struct NoDetails;

#[async_trait]
impl VacancyDetailSource for NoDetails {
    async fn fetch_description(&self, _vacancy_id: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

#[derive(Default)]
pub struct Pages {
    pub markup: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl Pages {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            markup: entries
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageSource for Pages {
    async fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.markup.get(url).cloned())
    }
}

#[derive(Default)]
pub struct Profiles(pub HashMap<String, f64>);

#[async_trait]
impl EmployerProfileSource for Profiles {
    async fn fetch_profile(&self, employer_id: &str) -> Result<Option<EmployerProfile>> {
        match employer_id {
            "broken" => Err(Error::Upstream { status: 504, url: "https://hh.ru".into() }),
            id => Ok(self.0.get(id).map(|rating| EmployerProfile {
                id: Some(id.to_string()),
                name: None,
                rating: Some(*rating),
            })),
        }
    }
}

pub fn raw(value: JsonValue) -> RawVacancy {
    serde_json::from_value(value).expect("raw vacancy")
}

pub fn app(
    vacancies: Arc<dyn VacancySource>,
    pages: Arc<Pages>,
    profiles: Profiles,
) -> (Router, AppState) {
    let state = AppState::from_sources(
        vacancies,
        Arc::new(NoDetails),
        pages,
        Arc::new(profiles),
        &Config::default(),
    );
    (routes::router(state.clone()), state)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}
