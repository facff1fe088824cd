use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::employer::EmployerProfile;
use crate::models::vacancy::{RawVacancy, VacancySearch};
use crate::services::sources::{
    EmployerProfileSource, PageSource, VacancyDetailSource, VacancySource,
};
use crate::utils::html::html_to_text;

#[derive(Debug, Deserialize)]
struct VacancyPage {
    #[serde(default)]
    items: Vec<RawVacancy>,
    #[serde(default)]
    pages: u32,
}

/// HTTP client for the hh.ru public API and site.
#[derive(Clone)]
pub struct HhService {
    api_client: Client,
    page_client: Client,
    api_base_url: String,
    employer_timeout: Duration,
}

impl HhService {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let mut api_headers = HeaderMap::new();
        api_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let api_client = Client::builder()
            .timeout(timeout)
            .user_agent(config.api_user_agent.as_str())
            .default_headers(api_headers)
            .build()?;

        let mut page_headers = HeaderMap::new();
        page_headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9,ru;q=0.8"),
        );
        let page_client = Client::builder()
            .timeout(timeout)
            .user_agent(config.scrape_user_agent.as_str())
            .default_headers(page_headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            api_client,
            page_client,
            api_base_url: config.hh_api_base_url.trim_end_matches('/').to_string(),
            employer_timeout: Duration::from_secs(config.employer_timeout_secs),
        })
    }
}

#[async_trait]
impl VacancySource for HhService {
    #[instrument(skip(self), fields(query = %search.text))]
    async fn fetch_vacancies(&self, search: &VacancySearch) -> Result<Vec<RawVacancy>> {
        let url = format!("{}/vacancies", self.api_base_url);
        let mut items = Vec::new();
        let mut page: u32 = 0;

        loop {
            let mut request = self
                .api_client
                .get(&url)
                .query(&[("text", search.text.as_str())])
                .query(&[("per_page", search.per_page), ("page", page)]);
            if let Some(area) = search.area {
                request = request.query(&[("area", area)]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(Error::Upstream {
                    status: response.status().as_u16(),
                    url,
                });
            }
            let body = response.json::<VacancyPage>().await?;
            let received = body.items.len();
            items.extend(body.items);
            info!(page, received, total_pages = body.pages, "Fetched vacancy page");

            if received == 0 {
                break;
            }
            if body.pages > 0 && page + 1 >= body.pages {
                break;
            }
            if let Some(limit) = search.pages {
                if page + 1 >= limit {
                    break;
                }
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl VacancyDetailSource for HhService {
    async fn fetch_description(&self, vacancy_id: &str) -> Result<Option<String>> {
        let url = format!("{}/vacancies/{}", self.api_base_url, vacancy_id);
        let response = self.api_client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        let data = response.json::<Value>().await?;
        let markup = data
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");
        Ok(Some(html_to_text(markup)))
    }
}

#[async_trait]
impl PageSource for HhService {
    async fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        let response = self.page_client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl EmployerProfileSource for HhService {
    async fn fetch_profile(&self, employer_id: &str) -> Result<Option<EmployerProfile>> {
        let url = format!("{}/employers/{}", self.api_base_url, employer_id);
        let response = self
            .api_client
            .get(&url)
            .timeout(self.employer_timeout)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        let data = response.json::<Value>().await?;
        Ok(Some(EmployerProfile::from_json(&data)))
    }
}
