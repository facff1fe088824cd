use std::collections::HashMap;

use crate::models::vacancy::NormalizedVacancy;

pub const MARK_MIN: f64 = 1.0;
pub const MARK_MAX: f64 = 5.0;

/// Relative weight of each employer signal. The defaults sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub trusted: f64,
    pub salary_rate: f64,
    pub avg_salary: f64,
    pub vacancy_count: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            trusted: 0.4,
            salary_rate: 0.3,
            avg_salary: 0.2,
            vacancy_count: 0.1,
        }
    }
}

#[derive(Debug, Default)]
struct EmployerAggregate {
    total: usize,
    with_salary: usize,
    salaries: Vec<f64>,
    trusted: bool,
}

/// Rates employers 1..=5 from the vacancies in one batch.
///
/// Marks are relative to the batch: salary level is normalized against the
/// batch's own salary range and vacancy count against its busiest employer.
/// Employers without any listed salary are placed at the batch minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmployerScorer {
    weights: ScoreWeights,
}

impl EmployerScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    pub fn compute_marks(&self, items: &[NormalizedVacancy]) -> HashMap<String, f64> {
        let mut aggregates: HashMap<&str, EmployerAggregate> = HashMap::new();
        let mut all_salaries: Vec<f64> = Vec::new();

        for item in items {
            let Some(employer_id) = item.employer_id.as_deref().filter(|id| !id.is_empty())
            else {
                continue;
            };
            let aggregate = aggregates.entry(employer_id).or_default();
            aggregate.total += 1;
            aggregate.trusted |= item.employer_trusted.unwrap_or(false);
            if let Some(avg) = item.salary_avg {
                aggregate.salaries.push(avg);
                aggregate.with_salary += 1;
                all_salaries.push(avg);
            }
        }

        let salary_min = all_salaries.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let salary_max = all_salaries.iter().copied().reduce(f64::max).unwrap_or(1.0);
        let denom = if salary_max > salary_min {
            salary_max - salary_min
        } else {
            1.0
        };
        let max_count = aggregates.values().map(|a| a.total).max().unwrap_or(1);

        aggregates
            .into_iter()
            .map(|(employer_id, aggregate)| {
                let trusted_score = if aggregate.trusted { 1.0 } else { 0.0 };
                let salary_rate = aggregate.with_salary as f64 / aggregate.total as f64;
                let avg_salary = if aggregate.salaries.is_empty() {
                    salary_min
                } else {
                    aggregate.salaries.iter().sum::<f64>() / aggregate.salaries.len() as f64
                };
                let avg_salary_norm = (avg_salary - salary_min) / denom;
                let count_norm = aggregate.total as f64 / max_count as f64;

                let weighted = self.weights.trusted * trusted_score
                    + self.weights.salary_rate * salary_rate
                    + self.weights.avg_salary * avg_salary_norm
                    + self.weights.vacancy_count * count_norm;

                (employer_id.to_string(), to_mark(weighted))
            })
            .collect()
    }
}

fn to_mark(weighted: f64) -> f64 {
    let mark = MARK_MIN + weighted * (MARK_MAX - MARK_MIN);
    if mark.is_nan() {
        return MARK_MIN;
    }
    mark.clamp(MARK_MIN, MARK_MAX)
}
