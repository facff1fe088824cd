use crate::models::vacancy::{NormalizedVacancy, RawVacancy};
use crate::services::salary_service::{normalize_salary, ShiftPayEstimator};
use crate::services::scoring_service::EmployerScorer;

/// Turns raw vacancies into [`NormalizedVacancy`] records, optionally marking
/// each with its employer's batch score. No I/O happens here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractionService {
    estimator: ShiftPayEstimator,
    scorer: EmployerScorer,
}

impl ExtractionService {
    pub fn new(estimator: ShiftPayEstimator, scorer: EmployerScorer) -> Self {
        Self { estimator, scorer }
    }

    pub fn scorer(&self) -> &EmployerScorer {
        &self.scorer
    }

    pub fn extract(&self, vacancy: &RawVacancy) -> NormalizedVacancy {
        let employer = vacancy.employer.clone().unwrap_or_default();
        let snippet = vacancy.snippet.clone().unwrap_or_default();
        let description = vacancy.description_text.as_deref().unwrap_or("");
        let title = vacancy.name.clone().unwrap_or_default();

        let responsibility = snippet
            .responsibility
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| description.to_string());
        let requirement = snippet.requirement;

        let salary_estimated_monthly = self.estimator.estimate_monthly(
            &title,
            &responsibility,
            requirement.as_deref(),
            description,
        );

        NormalizedVacancy {
            id: vacancy.id.clone(),
            title,
            area: vacancy.area.as_ref().and_then(|a| a.name.clone()),
            published_at: vacancy.published_at.clone(),
            alternate_url: vacancy.alternate_url.clone(),
            salary: vacancy.salary.clone(),
            salary_avg: normalize_salary(vacancy.salary.as_ref()),
            salary_per_shift: salary_estimated_monthly.is_some(),
            salary_estimated_monthly,
            experience: vacancy.experience.as_ref().and_then(|e| e.name.clone()),
            responsibility,
            requirement,
            employer_id: employer.id,
            employer_name: employer.name,
            employer_trusted: employer.trusted,
            employer_mark: None,
        }
    }

    pub fn parse_vacancies(
        &self,
        items: &[RawVacancy],
        with_employer_mark: bool,
    ) -> Vec<NormalizedVacancy> {
        let mut parsed: Vec<NormalizedVacancy> = items.iter().map(|v| self.extract(v)).collect();
        if with_employer_mark {
            let marks = self.scorer.compute_marks(&parsed);
            for item in &mut parsed {
                item.employer_mark = item
                    .employer_id
                    .as_deref()
                    .and_then(|id| marks.get(id).copied());
            }
        }
        parsed
    }
}
