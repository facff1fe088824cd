use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::utils::lenient::{lenient, lenient_bool, lenient_id, lenient_vec};

/// A vacancy exactly as the job board returns it.
///
/// Only the fields the pipeline reads are typed; everything else rides along
/// in `extra` so raw responses round-trip without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVacancy {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: Option<Snippet>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary: Option<Salary>,
    #[serde(default, deserialize_with = "lenient")]
    pub employer: Option<EmployerRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub experience: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alternate_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub key_skills: Vec<Value>,
    /// Plain-text description attached by enrichment.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawVacancy {
    pub fn has_description(&self) -> bool {
        self.description_text
            .as_deref()
            .map_or(false, |text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    #[serde(default, deserialize_with = "lenient")]
    pub from: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub to: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub gross: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default, deserialize_with = "lenient")]
    pub requirement: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub responsibility: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployerRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub trusted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{ "id": ..., "name": ... }` dictionary entries such as area or experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A vacancy reduced to the fields analytics work with.
///
/// `salary_avg` only ever comes from the structured salary. The per-shift
/// estimate lives in `salary_estimated_monthly` so shift work does not leak
/// into salary averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedVacancy {
    pub id: Option<String>,
    pub title: String,
    pub area: Option<String>,
    pub published_at: Option<String>,
    pub alternate_url: Option<String>,
    pub salary: Option<Salary>,
    pub salary_avg: Option<f64>,
    pub salary_estimated_monthly: Option<f64>,
    pub salary_per_shift: bool,
    pub experience: Option<String>,
    pub responsibility: String,
    pub requirement: Option<String>,
    pub employer_id: Option<String>,
    pub employer_name: Option<String>,
    pub employer_trusted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_mark: Option<f64>,
}

/// Parameters for one search against the vacancy source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancySearch {
    pub text: String,
    pub area: Option<u32>,
    pub pages: Option<u32>,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_fields_do_not_fail_the_record() {
        let raw: RawVacancy = serde_json::from_value(json!({
            "id": 93211,
            "name": "Бариста",
            "snippet": null,
            "salary": { "from": "много", "to": 60000, "currency": "RUR", "gross": 1 },
            "employer": { "id": "77", "name": "Кофейня", "trusted": "true" },
            "area": "not an object",
            "key_skills": [{ "name": "Latte art" }],
            "type": { "id": "open" }
        }))
        .unwrap();

        assert_eq!(raw.id.as_deref(), Some("93211"));
        assert!(raw.snippet.is_none());
        assert!(raw.area.is_none());
        let salary = raw.salary.as_ref().unwrap();
        assert_eq!(salary.from, None);
        assert_eq!(salary.to.as_ref().and_then(Number::as_f64), Some(60000.0));
        assert_eq!(salary.gross, Some(true));
        assert_eq!(raw.employer.as_ref().unwrap().trusted, Some(true));
        assert_eq!(raw.extra.get("type"), Some(&json!({ "id": "open" })));
    }

    #[test]
    fn unknown_fields_survive_serialization() {
        let raw: RawVacancy = serde_json::from_value(json!({
            "id": "1",
            "salary": { "from": 100000, "to": null, "currency": "RUR", "gross": true, "mode": "month" },
            "schedule": { "id": "shift" }
        }))
        .unwrap();

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value["schedule"], json!({ "id": "shift" }));
        assert_eq!(value["salary"]["from"], json!(100000));
        assert_eq!(value["salary"]["mode"], json!("month"));
        assert!(value.get("description_text").is_none());
    }
}
