//! Canned prediction scenarios, run as a batch against `/predict` and
//! printed as an aligned table. A failed row reports its error and the batch
//! keeps going.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::api::ApiClient;
use crate::model::PredictionRequest;

pub struct Scenario {
    pub name: &'static str,
    pub category: &'static str,
    pub priority: &'static str,
    pub channel: &'static str,
    pub expected: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "High Risk (Security/Urgent/Email)",
        category: "Security",
        priority: "urgent",
        channel: "email",
        expected: "High Probability (>50%)",
    },
    Scenario {
        name: "Moderate Risk (Integration/High/Web)",
        category: "Integration",
        priority: "high",
        channel: "web",
        expected: "Moderate (~30-60%)",
    },
    Scenario {
        name: "Safe (Billing/Low/Chat)",
        category: "Billing",
        priority: "low",
        channel: "chat",
        expected: "Low Probability (<20%)",
    },
    Scenario {
        name: "Safe (Login/Medium/Phone)",
        category: "Login",
        priority: "medium",
        channel: "phone",
        expected: "Low Probability (<20%)",
    },
];

impl Scenario {
    fn request(&self) -> PredictionRequest {
        let mut extra = BTreeMap::new();
        extra.insert("category".to_string(), self.category.to_string());
        extra.insert("priority".to_string(), self.priority.to_string());
        extra.insert("channel".to_string(), self.channel.to_string());
        extra.insert("region".to_string(), "NA".to_string());
        extra.insert("plan".to_string(), "pro".to_string());
        PredictionRequest {
            tenure_months: 12,
            employees: 100,
            extra,
        }
    }
}

pub async fn run_scenarios(api: &ApiClient) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<40} | {:<10} | {:<10} | {}",
        "Scenario", "Prob", "Label", "Expected"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));

    for scenario in SCENARIOS {
        match api.predict(&scenario.request()).await {
            Ok(prediction) => {
                let label = if prediction.label == 1 { "BREACH" } else { "SAFE" };
                let _ = writeln!(
                    out,
                    "{:<40} | {:>5.1}%    | {:<10} | {}",
                    scenario.name,
                    prediction.probability * 100.0,
                    label,
                    scenario.expected
                );
            }
            Err(err) => {
                let _ = writeln!(out, "{:<40} | FAILED: {err}", scenario.name);
            }
        }
    }

    out
}
