use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::vacancy::{NormalizedVacancy, RawVacancy};
use crate::services::salary_service::normalize_salary;

/// Monthly salaries below this are treated as per-shift or hourly noise.
pub const MIN_VALID_MONTHLY: f64 = 10000.0;

pub const DEFAULT_TOP_SKILLS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalaryStats {
    pub count: usize,
    pub avg: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Salary distribution over structured salaries only; per-shift postings
/// are skipped entirely.
pub fn salary_stats(vacancies: &[NormalizedVacancy]) -> SalaryStats {
    summarize(
        vacancies
            .iter()
            .filter(|v| !v.salary_per_shift)
            .filter_map(|v| v.salary_avg.or_else(|| normalize_salary(v.salary.as_ref()))),
    )
}

/// Same distribution straight from the upstream salary objects. Nothing is
/// known about shift work at this point, so every structured salary counts.
pub fn raw_salary_stats(vacancies: &[RawVacancy]) -> SalaryStats {
    summarize(vacancies.iter().filter_map(|v| normalize_salary(v.salary.as_ref())))
}

fn summarize(salaries: impl Iterator<Item = f64>) -> SalaryStats {
    let mut salaries: Vec<f64> = salaries.filter(|s| *s >= MIN_VALID_MONTHLY).collect();

    if salaries.is_empty() {
        return SalaryStats::default();
    }

    salaries.sort_by(f64::total_cmp);
    let n = salaries.len();
    let avg = salaries.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        salaries[n / 2]
    } else {
        (salaries[n / 2 - 1] + salaries[n / 2]) / 2.0
    };

    SalaryStats {
        count: n,
        avg: Some(round2(avg)),
        median: Some(round2(median)),
        min: Some(round2(salaries[0])),
        max: Some(round2(salaries[n - 1])),
    }
}

/// Most frequent `key_skills` names, lowercased. Ties keep first-seen order.
pub fn top_skills(vacancies: &[RawVacancy], top_n: usize) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for skill in vacancies.iter().flat_map(|v| v.key_skills.iter()) {
        let name = match skill {
            Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        };
        let Some(name) = name.map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()) else {
            continue;
        };
        let count = counts.entry(name.clone()).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            (name, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
