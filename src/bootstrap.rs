//! Passive fetch-and-render cycles and the page-load orchestration.
//!
//! Each cycle fails in isolation: a failure is logged and its region is left
//! exactly as it was. The three bootstrap cycles run concurrently and race
//! with no defined completion order.

use tracing::{debug, warn};

use crate::api::OverviewFilter;
use crate::render;
use crate::screen::lock;
use crate::state::ConsoleState;

pub async fn refresh_overview(state: &ConsoleState, filter: &OverviewFilter) {
    match state.api.overview(filter).await {
        Ok(stats) => render::render_overview(&mut lock(&state.screen), &stats),
        Err(err) => warn!("overview fetch failed: {err}"),
    }
}

pub async fn refresh_diagnostics(state: &ConsoleState) {
    match state.api.diagnostics().await {
        Ok(diagnostics) => render::render_diagnostics(&mut lock(&state.screen), &diagnostics),
        Err(err) => warn!("diagnostics fetch failed: {err}"),
    }
}

/// The empty outcome (no model trained yet) skips rendering silently; the
/// metrics region keeps whatever it showed before.
pub async fn refresh_metrics(state: &ConsoleState) {
    match state.api.model_metrics().await {
        Ok(Some(metrics)) => render::render_metrics(&mut lock(&state.screen), Some(&metrics)),
        Ok(None) => debug!("model metrics not available yet"),
        Err(err) => warn!("model metrics fetch failed: {err}"),
    }
}

pub async fn bootstrap(state: &ConsoleState) {
    let filter = OverviewFilter::default();
    tokio::join!(
        refresh_overview(state, &filter),
        refresh_diagnostics(state),
        refresh_metrics(state),
    );
}
