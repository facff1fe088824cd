use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::lenient::is_truthy;

/// Fields consulted, in order, for an employer's rating.
const RATING_FIELDS: [&str; 3] = ["rating", "score", "scores"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
}

impl EmployerProfile {
    /// Builds a profile from the employer resource. The first non-empty
    /// rating field wins; it only counts when it is a number.
    pub fn from_json(data: &Value) -> Self {
        let rating = RATING_FIELDS
            .iter()
            .filter_map(|field| data.get(*field))
            .find(|value| is_truthy(value))
            .and_then(Value::as_f64);

        let id = match data.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            id,
            name: data.get("name").and_then(Value::as_str).map(str::to_string),
            rating,
        }
    }
}
