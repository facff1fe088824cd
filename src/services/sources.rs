//! Seams to the outside world. The pipeline only talks to these traits;
//! [`crate::services::hh_service::HhService`] implements them over HTTP.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::models::employer::EmployerProfile;
use crate::models::vacancy::{RawVacancy, VacancySearch};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Runs a search. May return fewer records than requested; errors
    /// propagate to the caller.
    async fn fetch_vacancies(&self, search: &VacancySearch) -> Result<Vec<RawVacancy>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait VacancyDetailSource: Send + Sync {
    /// Plain-text description of one vacancy, `None` when the detail
    /// resource is unavailable.
    async fn fetch_description(&self, vacancy_id: &str) -> Result<Option<String>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Raw markup of a public page, `None` on a non-success status.
    async fn fetch_page(&self, url: &str) -> Result<Option<String>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployerProfileSource: Send + Sync {
    async fn fetch_profile(&self, employer_id: &str) -> Result<Option<EmployerProfile>>;
}
