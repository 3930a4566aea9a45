//! In-process stub backend: canned JSON on an ephemeral port.

use axum::Router;
use serde_json::{json, Value};

/// Bind an ephemeral port, serve the router in the background, return the
/// base URL. The server task dies with the test runtime.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });
    format!("http://{addr}")
}

pub fn overview_body() -> Value {
    json!({
        "sla_breach_rate": 21.5,
        "median_resolution_time": 4.0,
        "p95_resolution_time": 30.25,
        "daily_volume": {"2024-01-01": 3, "2024-01-02": 5},
        "problem_customers": [
            {"customer_id": "CUST-0042", "breach_rate": 80.0, "total_tickets": 10},
            {"customer_id": "CUST-0007", "breach_rate": 62.5, "total_tickets": 8}
        ],
        "top_categories": [["Security", 40], ["Billing", 12]]
    })
}

pub fn diagnostics_body() -> Value {
    json!({
        "customer_count": 40,
        "ticket_count": 1000,
        "dirty_count": 120,
        "issues": [
            "Ticket T-1: Invalid/Missing created_at",
            "Ticket T-2: Invalid priority 'med'",
            "Ticket T-3: Missing first_response_time_hours",
            "Ticket T-4: Invalid/Missing created_at",
            "Ticket T-5: Missing first_response_time_hours"
        ],
        "status": "success"
    })
}

pub fn metrics_body() -> Value {
    json!({
        "auc": 0.915234,
        "f1": 0.845,
        "confusion_matrix": [[100, 5], [8, 40]]
    })
}
