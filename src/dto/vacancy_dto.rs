use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::{NormalizedVacancy, Salary, VacancySearch};
use crate::services::analytics_service::SalaryStats;
use crate::services::enrichment_service::SourcePreference;

fn default_per_page() -> u32 {
    100
}

fn default_area() -> Option<u32> {
    Some(2)
}

fn default_one() -> u32 {
    1
}

fn default_sample_per_page() -> u32 {
    50
}

fn default_marks_per_page() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FetchQuery {
    #[validate(length(min = 1))]
    pub query: String,
    pub area: Option<u32>,
    #[validate(range(min = 1))]
    pub pages: Option<u32>,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
    #[serde(default)]
    pub simplified: bool,
    #[serde(default)]
    pub employer_mark: bool,
    #[serde(default)]
    pub include_description: bool,
    #[serde(default)]
    pub prefer_scrape: bool,
}

impl FetchQuery {
    pub fn search(&self) -> VacancySearch {
        VacancySearch {
            text: self.query.clone(),
            area: self.area,
            pages: self.pages,
            per_page: self.per_page,
        }
    }

    pub fn preference(&self) -> SourcePreference {
        SourcePreference::from_prefer_scrape(self.prefer_scrape)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeQuery {
    #[validate(length(min = 1))]
    pub query: String,
    pub area: Option<u32>,
    #[validate(range(min = 1))]
    pub pages: Option<u32>,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
}

impl AnalyzeQuery {
    pub fn search(&self) -> VacancySearch {
        VacancySearch {
            text: self.query.clone(),
            area: self.area,
            pages: self.pages,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SalaryValidationQuery {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default = "default_area")]
    pub area: Option<u32>,
    #[serde(default = "default_one")]
    #[validate(range(min = 1, max = 5))]
    pub pages: u32,
    #[serde(default = "default_sample_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
}

impl SalaryValidationQuery {
    pub fn search(&self) -> VacancySearch {
        VacancySearch {
            text: self.query.clone(),
            area: self.area,
            pages: Some(self.pages),
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployerMarksQuery {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default = "default_area")]
    pub area: Option<u32>,
    #[serde(default = "default_one")]
    #[validate(range(min = 1, max = 3))]
    pub pages: u32,
    #[serde(default = "default_marks_per_page")]
    #[validate(range(min = 1, max = 50))]
    pub per_page: u32,
}

impl EmployerMarksQuery {
    pub fn search(&self) -> VacancySearch {
        VacancySearch {
            text: self.query.clone(),
            area: self.area,
            pages: Some(self.pages),
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemsResponse<T> {
    pub count: usize,
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ItemsResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub query: String,
    pub area: Option<u32>,
    pub count: usize,
    pub salaries: SalaryStats,
    pub skills: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalarySample {
    pub id: Option<String>,
    pub title: Option<String>,
    pub raw_salary: Option<Salary>,
    pub normalized: Option<f64>,
    pub employer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryValidationResponse {
    pub query: String,
    pub area: Option<u32>,
    pub total_items: usize,
    pub items_with_salary: usize,
    pub salary_coverage: String,
    pub salary_samples: Vec<SalarySample>,
    pub salary_stats: SalaryStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployerDetail {
    pub employer_id: Option<String>,
    pub employer_name: Option<String>,
    pub employer_trusted: Option<bool>,
    pub employer_mark: Option<f64>,
    pub salary_avg: Option<f64>,
    pub title: String,
}

impl From<&NormalizedVacancy> for EmployerDetail {
    fn from(item: &NormalizedVacancy) -> Self {
        Self {
            employer_id: item.employer_id.clone(),
            employer_name: item.employer_name.clone(),
            employer_trusted: item.employer_trusted,
            employer_mark: item.employer_mark,
            salary_avg: item.salary_avg,
            title: item.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployerMarksResponse {
    pub query: String,
    pub area: Option<u32>,
    pub total_items: usize,
    pub processing_time_ms: f64,
    pub employer_details: Vec<EmployerDetail>,
    pub note: String,
}
