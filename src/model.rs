//! View models decoded from backend JSON.
//!
//! Every type here is request-scoped: decoded from a single response,
//! validated, handed to a render function, dropped. The `validate` methods
//! enforce the range invariants the backend promises but is not trusted to
//! keep; adapters route a validation failure into the same error channel as
//! a transport failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewStats {
    pub sla_breach_rate: f64,
    pub median_resolution_time: f64,
    pub p95_resolution_time: f64,
    #[serde(default)]
    pub daily_volume: BTreeMap<String, u64>,
    #[serde(default)]
    pub problem_customers: Vec<ProblemCustomer>,
    #[serde(default)]
    pub top_categories: Vec<(String, u64)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemCustomer {
    pub customer_id: String,
    pub breach_rate: f64,
    pub total_tickets: u64,
}

impl OverviewStats {
    /// Sum of the daily volume buckets. Key order is irrelevant.
    pub fn total_tickets(&self) -> u64 {
        self.daily_volume.values().sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        check_rate("sla_breach_rate", self.sla_breach_rate)?;
        check_non_negative("median_resolution_time", self.median_resolution_time)?;
        check_non_negative("p95_resolution_time", self.p95_resolution_time)?;
        for customer in &self.problem_customers {
            check_rate("problem_customers.breach_rate", customer.breach_rate)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Diagnostics {
    pub ticket_count: u64,
    pub dirty_count: u64,
    #[serde(default)]
    pub issues: Vec<String>,
    // The backend also reports the customer table size; older deployments
    // omit it.
    #[serde(default)]
    pub customer_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelMetrics {
    pub auc: f64,
    pub f1: f64,
    #[serde(default)]
    pub confusion_matrix: Option<[[u64; 2]; 2]>,
}

impl ModelMetrics {
    pub fn validate(&self) -> Result<(), String> {
        check_unit("auc", self.auc)?;
        check_unit("f1", self.f1)?;
        Ok(())
    }
}

/// Ticket features submitted for a breach prediction. `tenure_months` and
/// `employees` are the two fields coerced to integers client-side; the
/// categorical fields (category, channel, priority, region, plan) pass
/// through verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub tenure_months: i64,
    pub employees: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub probability: f64,
    pub label: u8,
}

impl Prediction {
    pub fn validate(&self) -> Result<(), String> {
        check_unit("probability", self.probability)?;
        if self.label > 1 {
            return Err(format!("label must be 0 or 1, got {}", self.label));
        }
        Ok(())
    }
}

/// Counters the backend reports after a re-ingestion run.
#[derive(Debug, Clone, Deserialize)]
pub struct ReingestReceipt {
    pub tickets_ingested: u64,
    #[serde(default)]
    pub customers_ingested: Option<u64>,
    #[serde(default)]
    pub dirty_rows: Option<u64>,
}

/// Raw key/value form input for a prediction, before integer coercion.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    pub fields: Vec<(String, String)>,
}

impl PredictionForm {
    pub fn into_request(self) -> Result<PredictionRequest, String> {
        let mut tenure_months = None;
        let mut employees = None;
        let mut extra = BTreeMap::new();

        for (key, value) in self.fields {
            match key.as_str() {
                "tenure_months" => tenure_months = Some(parse_int(&key, &value)?),
                "employees" => employees = Some(parse_int(&key, &value)?),
                _ => {
                    extra.insert(key, value);
                }
            }
        }

        Ok(PredictionRequest {
            tenure_months: tenure_months.ok_or("tenure_months is required")?,
            employees: employees.ok_or("employees is required")?,
            extra,
        })
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{key} must be a whole number, got '{value}'"))
}

fn check_rate(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be a percentage in [0, 100], got {value}"))
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be in [0, 1], got {value}"))
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be non-negative, got {value}"))
    }
}
