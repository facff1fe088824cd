use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock, OnceLock};

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::services::cache::{Lookup, MemoCache};
use crate::services::sources::{EmployerProfileSource, PageSource};
use crate::utils::html::element_text;

static RATING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Rating|Оценка|Рейтинг)\s*([0-9]+[\.,][0-9]+)").unwrap()
});

/// Best-effort external employer ratings, either from the employer resource
/// of the API or scraped from the public employer page.
#[derive(Clone)]
pub struct RatingService {
    profile_source: Arc<dyn EmployerProfileSource>,
    page_source: Arc<dyn PageSource>,
    site_base_url: String,
    scrape_cache: MemoCache<f64>,
}

impl RatingService {
    pub fn new(
        profile_source: Arc<dyn EmployerProfileSource>,
        page_source: Arc<dyn PageSource>,
        site_base_url: impl Into<String>,
    ) -> Self {
        Self {
            profile_source,
            page_source,
            site_base_url: site_base_url.into(),
            scrape_cache: MemoCache::new(),
        }
    }

    pub fn with_cache(mut self, scrape_cache: MemoCache<f64>) -> Self {
        self.scrape_cache = scrape_cache;
        self
    }

    pub fn scrape_cache(&self) -> &MemoCache<f64> {
        &self.scrape_cache
    }

    pub fn employer_page_url(&self, employer_id: &str) -> String {
        format!(
            "{}/employer/{}",
            self.site_base_url.trim_end_matches('/'),
            employer_id
        )
    }

    /// Looks up every employer one after another. Failures are recorded as
    /// [`Lookup::Absent`]; partial results are normal.
    #[instrument(skip(self, employer_ids), fields(employers = employer_ids.len()))]
    pub async fn fetch_employer_ratings(
        &self,
        employer_ids: &BTreeSet<String>,
    ) -> HashMap<String, Lookup<f64>> {
        let mut results = HashMap::new();
        for employer_id in employer_ids.iter().filter(|id| !id.is_empty()) {
            let lookup = match self.profile_source.fetch_profile(employer_id).await {
                Ok(profile) => Lookup::from(profile.and_then(|p| p.rating)),
                Err(err) => {
                    warn!(%employer_id, error = %err, "Employer profile lookup failed");
                    Lookup::Absent
                }
            };
            results.insert(employer_id.clone(), lookup);
        }
        results
    }

    /// Scrapes the public employer page once per employer; the outcome,
    /// including a miss, is kept for the life of the service.
    pub async fn scrape_employer_mark(&self, employer_id: &str) -> Lookup<f64> {
        if employer_id.is_empty() {
            return Lookup::Absent;
        }
        if let Some(cached) = self.scrape_cache.get(employer_id) {
            debug!(employer_id, "Employer mark served from cache");
            return cached;
        }

        let url = self.employer_page_url(employer_id);
        let lookup = match self.page_source.fetch_page(&url).await {
            Ok(Some(markup)) => Lookup::from(parse_employer_rating(&markup)),
            Ok(None) => Lookup::Absent,
            Err(err) => {
                warn!(employer_id, error = %err, "Employer page scrape failed");
                Lookup::Absent
            }
        };
        self.scrape_cache.insert(employer_id, lookup)
    }
}

/// Tries the rating widget, then JSON-LD `aggregateRating`, then a labelled
/// number anywhere in the page text.
pub fn parse_employer_rating(markup: &str) -> Option<f64> {
    static WIDGET: OnceLock<Selector> = OnceLock::new();
    static LD_JSON: OnceLock<Selector> = OnceLock::new();
    let widget = WIDGET.get_or_init(|| {
        Selector::parse(r#"[data-qa="employer-review-small-widget-total-rating"]"#).unwrap()
    });
    let ld_json =
        LD_JSON.get_or_init(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

    let document = Html::parse_document(markup);

    if let Some(node) = document.select(widget).next() {
        let text = node.text().collect::<String>();
        if let Ok(value) = text.trim().replace(',', ".").parse::<f64>() {
            return Some(value);
        }
    }

    for script in document.select(ld_json) {
        let body = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<Value>(&body) else {
            continue;
        };
        let rating = match data.get("aggregateRating").and_then(|agg| agg.get("ratingValue")) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if rating.is_some() {
            return rating;
        }
    }

    let text = element_text(document.root_element());
    RATING_LABEL
        .captures(&text)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::employer::EmployerProfile;
    use crate::services::sources::{MockEmployerProfileSource, MockPageSource};

    fn service(profiles: MockEmployerProfileSource, pages: MockPageSource) -> RatingService {
        RatingService::new(Arc::new(profiles), Arc::new(pages), "https://hh.ru/")
    }

    #[test]
    fn widget_rating_with_decimal_comma() {
        let page = r#"<div data-qa="employer-review-small-widget-total-rating"> 4,6 </div>"#;
        assert_eq!(parse_employer_rating(page), Some(4.6));
    }

    #[test]
    fn structured_metadata_rating() {
        let page = r#"<html><head>
            <script type="application/ld+json">not json</script>
            <script type="application/ld+json">{"@type": "Organization", "aggregateRating": {"ratingValue": "4.1"}}</script>
            </head><body><div data-qa="employer-review-small-widget-total-rating">n/a</div></body></html>"#;
        assert_eq!(parse_employer_rating(page), Some(4.1));
    }

    #[test]
    fn labelled_rating_in_text() {
        let page = "<p>Отзывы сотрудников</p><p>Рейтинг 3,8 из 5</p>";
        assert_eq!(parse_employer_rating(page), Some(3.8));
        assert_eq!(parse_employer_rating("<p>RATING 4.25</p>"), Some(4.25));
    }

    #[test]
    fn page_without_rating() {
        assert_eq!(parse_employer_rating("<p>Рейтинг скоро появится</p>"), None);
        assert_eq!(parse_employer_rating(""), None);
    }

    #[tokio::test]
    async fn scrape_is_memoized_per_employer() {
        let mut pages = MockPageSource::new();
        pages
            .expect_fetch_page()
            .withf(|url: &str| url == "https://hh.ru/employer/42")
            .times(1)
            .returning(|_| Ok(Some("<p>Оценка 4.7</p>".into())));
        let ratings = service(MockEmployerProfileSource::new(), pages);

        assert_eq!(ratings.scrape_employer_mark("42").await, Lookup::Found(4.7));
        assert_eq!(ratings.scrape_employer_mark("42").await, Lookup::Found(4.7));
    }

    #[tokio::test]
    async fn injected_cache_is_shared_between_services() {
        let mut pages = MockPageSource::new();
        pages
            .expect_fetch_page()
            .times(1)
            .returning(|_| Ok(Some("<p>Rating 4.4</p>".into())));
        let first = service(MockEmployerProfileSource::new(), pages);
        assert_eq!(first.scrape_employer_mark("7").await, Lookup::Found(4.4));

        let mut idle_pages = MockPageSource::new();
        idle_pages.expect_fetch_page().never();
        let second = service(MockEmployerProfileSource::new(), idle_pages)
            .with_cache(first.scrape_cache().clone());
        assert_eq!(second.scrape_employer_mark("7").await, Lookup::Found(4.4));
    }

    #[tokio::test]
    async fn scrape_misses_are_memoized_too() {
        let mut pages = MockPageSource::new();
        pages
            .expect_fetch_page()
            .times(2)
            .returning(|url| {
                if url.ends_with("/1") {
                    Err(Error::Upstream { status: 504, url: "https://hh.ru".into() })
                } else {
                    Ok(None)
                }
            });
        let ratings = service(MockEmployerProfileSource::new(), pages);

        for _ in 0..2 {
            assert_eq!(ratings.scrape_employer_mark("1").await, Lookup::Absent);
            assert_eq!(ratings.scrape_employer_mark("2").await, Lookup::Absent);
        }
        assert_eq!(ratings.scrape_employer_mark("").await, Lookup::Absent);
        assert_eq!(ratings.scrape_cache().len(), 2);
    }

    #[tokio::test]
    async fn batch_fetch_tolerates_partial_failure() {
        let mut profiles = MockEmployerProfileSource::new();
        profiles.expect_fetch_profile().times(4).returning(|id| match id {
            "1" => Ok(Some(EmployerProfile {
                id: Some("1".into()),
                name: Some("Acme".into()),
                rating: Some(4.3),
            })),
            "2" => Ok(Some(EmployerProfile::default())),
            "3" => Ok(None),
            _ => Err(Error::Upstream { status: 504, url: "https://hh.ru".into() }),
        });
        let ratings = service(profiles, MockPageSource::new());

        let ids: BTreeSet<String> = ["1", "2", "3", "4", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = ratings.fetch_employer_ratings(&ids).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results["1"], Lookup::Found(4.3));
        assert_eq!(results["2"], Lookup::Absent);
        assert_eq!(results["3"], Lookup::Absent);
        assert_eq!(results["4"], Lookup::Absent);
    }
}
