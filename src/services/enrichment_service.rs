use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::models::vacancy::RawVacancy;
use crate::services::cache::{Lookup, MemoCache};
use crate::services::sources::{PageSource, VacancyDetailSource};
use crate::utils::html::vacancy_description_text;

/// Upper bound on vacancies being enriched at the same time.
pub const MAX_CONCURRENT_ENRICHMENTS: usize = 8;

/// Which description source is tried first; the other one is the fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePreference {
    #[default]
    ApiFirst,
    ScrapeFirst,
}

impl SourcePreference {
    pub fn from_prefer_scrape(prefer_scrape: bool) -> Self {
        if prefer_scrape {
            Self::ScrapeFirst
        } else {
            Self::ApiFirst
        }
    }
}

/// Attaches description text to vacancies that arrived without one.
///
/// Both sources are memoized: the detail API per vacancy id and the public
/// page per URL. Only answers are cached, text or a confirmed absence; a
/// source error means "no text" for this call and is retried next time.
#[derive(Clone)]
pub struct EnrichmentService {
    detail_source: Arc<dyn VacancyDetailSource>,
    page_source: Arc<dyn PageSource>,
    api_cache: MemoCache<String>,
    page_cache: MemoCache<String>,
    concurrency_limit: usize,
}

impl EnrichmentService {
    pub fn new(
        detail_source: Arc<dyn VacancyDetailSource>,
        page_source: Arc<dyn PageSource>,
    ) -> Self {
        Self {
            detail_source,
            page_source,
            api_cache: MemoCache::new(),
            page_cache: MemoCache::new(),
            concurrency_limit: MAX_CONCURRENT_ENRICHMENTS,
        }
    }

    pub fn with_caches(
        mut self,
        api_cache: MemoCache<String>,
        page_cache: MemoCache<String>,
    ) -> Self {
        self.api_cache = api_cache;
        self.page_cache = page_cache;
        self
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    pub fn api_cache(&self) -> &MemoCache<String> {
        &self.api_cache
    }

    pub fn page_cache(&self) -> &MemoCache<String> {
        &self.page_cache
    }

    /// Fills `description_text` in place for every item that lacks it.
    /// Items for which neither source yields text are left untouched.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn enrich_with_descriptions(
        &self,
        items: &mut [RawVacancy],
        preference: SourcePreference,
    ) {
        let gate = Semaphore::new(self.concurrency_limit);
        let pending: Vec<_> = items
            .iter_mut()
            .filter(|item| !item.has_description())
            .map(|item| self.enrich_one(item, &gate, preference))
            .collect();

        let attempted = pending.len();
        let enriched = join_all(pending).await.into_iter().filter(|done| *done).count();
        info!(attempted, enriched, "Description enrichment finished");
    }

    async fn enrich_one(
        &self,
        item: &mut RawVacancy,
        gate: &Semaphore,
        preference: SourcePreference,
    ) -> bool {
        let Ok(_permit) = gate.acquire().await else {
            return false;
        };

        let id = item.id.as_deref();
        let url = item.alternate_url.as_deref();
        let text = match preference {
            SourcePreference::ApiFirst => match self.api_text(id).await {
                Some(text) => Some(text),
                None => self.page_text(url).await,
            },
            SourcePreference::ScrapeFirst => match self.page_text(url).await {
                Some(text) => Some(text),
                None => self.api_text(id).await,
            },
        };

        match text {
            Some(text) => {
                item.description_text = Some(text);
                true
            }
            None => false,
        }
    }

    async fn api_text(&self, vacancy_id: Option<&str>) -> Option<String> {
        let vacancy_id = vacancy_id.filter(|id| !id.is_empty())?;
        self.description_from_api(vacancy_id).await.found()
    }

    async fn page_text(&self, url: Option<&str>) -> Option<String> {
        let url = url.filter(|url| !url.is_empty())?;
        self.description_from_page(url).await.found()
    }

    pub async fn description_from_api(&self, vacancy_id: &str) -> Lookup<String> {
        if let Some(cached) = self.api_cache.get(vacancy_id) {
            debug!(vacancy_id, "Description served from cache");
            return cached;
        }

        match self.detail_source.fetch_description(vacancy_id).await {
            Ok(text) => {
                let lookup = Lookup::from(text.filter(|text| !text.is_empty()));
                self.api_cache.insert(vacancy_id, lookup)
            }
            Err(err) => {
                warn!(vacancy_id, error = %err, "Vacancy detail lookup failed");
                Lookup::Absent
            }
        }
    }

    pub async fn description_from_page(&self, url: &str) -> Lookup<String> {
        if let Some(cached) = self.page_cache.get(url) {
            debug!(url, "Page description served from cache");
            return cached;
        }

        if Url::parse(url).is_err() {
            warn!(url, "Skipping malformed vacancy page URL");
            return self.page_cache.insert(url, Lookup::Absent);
        }

        match self.page_source.fetch_page(url).await {
            Ok(Some(markup)) => {
                let text = vacancy_description_text(&markup);
                self.page_cache.insert(url, Lookup::from((!text.is_empty()).then_some(text)))
            }
            Ok(None) => self.page_cache.insert(url, Lookup::Absent),
            Err(err) => {
                warn!(url, error = %err, "Vacancy page scrape failed");
                Lookup::Absent
            }
        }
    }
}
