use std::sync::LazyLock;

use regex::Regex;

use crate::models::vacancy::Salary;
use crate::utils::number::parse_number;

/// Paid shifts assumed per month when turning a per-shift rate into a
/// monthly figure. A fixed approximation, not a statistic.
pub const DEFAULT_SHIFTS_PER_MONTH: f64 = 15.0;

static SHIFT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(смена|смены|за\s+смену|посменн|shift|shifts|per\s+shift)\b").unwrap()
});

// Each match of each pattern is a separate candidate. One mention can match
// two patterns ("per shift: 4000" also matches "shift: 4000") and is then
// counted twice.
static SHIFT_PAY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"за\s+смену\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
        r"смена\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
        r"оплата\s+за\s+смену\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
        r"per\s+shift\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
        r"shift\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
        r"shift\s+pay\s*[:\-]?\s*([0-9][0-9\s\.,]{2,})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static SHIFT_PAY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9][0-9\s\.,]{2,})\s*[–\-/]\s*([0-9][0-9\s\.,]{2,}).{0,12}(смен|shift)")
        .unwrap()
});

/// Mean of whichever structured bounds are present.
pub fn normalize_salary(salary: Option<&Salary>) -> Option<f64> {
    let salary = salary?;
    let values: Vec<f64> = [salary.from.as_ref(), salary.to.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(|n| n.as_f64())
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Recovers a monthly salary for postings that only quote a per-shift rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPayEstimator {
    shifts_per_month: f64,
}

impl Default for ShiftPayEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFTS_PER_MONTH)
    }
}

impl ShiftPayEstimator {
    pub fn new(shifts_per_month: f64) -> Self {
        Self { shifts_per_month }
    }

    pub fn estimate_monthly(
        &self,
        title: &str,
        responsibility: &str,
        requirement: Option<&str>,
        description: &str,
    ) -> Option<f64> {
        let blob = [title, responsibility, requirement.unwrap_or(""), description]
            .join(" ")
            .to_lowercase();

        if !SHIFT_KEYWORD.is_match(&blob) {
            return None;
        }

        let per_shift = per_shift_candidates(&blob);
        if per_shift.is_empty() {
            return None;
        }

        let mean = per_shift.iter().sum::<f64>() / per_shift.len() as f64;
        Some(mean * self.shifts_per_month)
    }
}

fn per_shift_candidates(blob: &str) -> Vec<f64> {
    let mut candidates = Vec::new();

    for pattern in SHIFT_PAY_PATTERNS.iter() {
        for caps in pattern.captures_iter(blob) {
            if let Some(value) = caps.get(1).and_then(|m| parse_number(m.as_str())) {
                candidates.push(value);
            }
        }
    }

    for caps in SHIFT_PAY_RANGE.captures_iter(blob) {
        let low = caps.get(1).and_then(|m| parse_number(m.as_str()));
        let high = caps.get(2).and_then(|m| parse_number(m.as_str()));
        if let (Some(low), Some(high)) = (low, high) {
            if low != 0.0 && high != 0.0 {
                candidates.push((low + high) / 2.0);
            }
        }
    }

    candidates
}
