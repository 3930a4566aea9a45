//! Action controllers: disable the control, hit the backend once, render the
//! result, restore the control.
//!
//! The lifecycle is Idle → Pending → (Succeeded | Failed) → Idle. The busy
//! state is a scoped guard: engaging it swaps in the busy caption and
//! disables the control, and dropping it restores both on every exit path,
//! including panics. Re-entrancy is prevented at the control itself — a
//! trigger while the control is disabled is a no-op.

use std::sync::Mutex;
use tracing::warn;

use crate::bootstrap;
use crate::config::{PREDICT_BUSY_CAPTION, REINGEST_BUSY_CAPTION, TRAIN_BUSY_CAPTION};
use crate::error::FetchError;
use crate::model::PredictionForm;
use crate::render;
use crate::screen::{lock, ControlId, NoticeLevel, Screen};
use crate::state::ConsoleState;

pub struct BusyGuard<'a> {
    screen: &'a Mutex<Screen>,
    control: ControlId,
    saved_caption: String,
}

impl<'a> BusyGuard<'a> {
    /// Engage the busy state, or `None` when the control is already disabled
    /// and the trigger must be ignored.
    pub fn engage(
        screen: &'a Mutex<Screen>,
        control: ControlId,
        busy_caption: &str,
    ) -> Option<Self> {
        let mut guard = lock(screen);
        if !guard.control(control).enabled {
            return None;
        }
        let ctl = guard.control_mut(control);
        let saved_caption = std::mem::replace(&mut ctl.caption, busy_caption.to_string());
        ctl.enabled = false;
        drop(guard);
        Some(Self {
            screen,
            control,
            saved_caption,
        })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut guard = lock(self.screen);
        let ctl = guard.control_mut(self.control);
        ctl.enabled = true;
        ctl.caption = std::mem::take(&mut self.saved_caption);
    }
}

/// Train the model. On success the returned metrics feed straight into the
/// metrics region; there is no separate metrics fetch.
pub async fn run_train(state: &ConsoleState) {
    let Some(_busy) = BusyGuard::engage(&state.screen, ControlId::Train, TRAIN_BUSY_CAPTION)
    else {
        return;
    };

    match state.api.train().await {
        Ok(metrics) => {
            let mut screen = lock(&state.screen);
            screen.notify(NoticeLevel::Info, "Model trained!");
            render::render_metrics(&mut screen, Some(&metrics));
        }
        Err(err) => {
            warn!("train failed: {err}");
            lock(&state.screen).notify(NoticeLevel::Error, "Training failed.");
        }
    }
}

/// Re-run the ingestion pipeline, then refresh overview and diagnostics.
/// Both refreshes run strictly after the reingest response resolves; they are
/// independent of each other.
pub async fn run_reingest(state: &ConsoleState) {
    let Some(_busy) = BusyGuard::engage(&state.screen, ControlId::Reingest, REINGEST_BUSY_CAPTION)
    else {
        return;
    };

    match state.api.reingest().await {
        Ok(receipt) => {
            lock(&state.screen).notify(
                NoticeLevel::Info,
                format!("Success! Ingested {} tickets.", receipt.tickets_ingested),
            );
            let filter = Default::default();
            tokio::join!(
                bootstrap::refresh_overview(state, &filter),
                bootstrap::refresh_diagnostics(state),
            );
        }
        Err(err) => {
            warn!("reingest failed: {err}");
            // The backend's wording reaches the user verbatim here.
            lock(&state.screen).notify(NoticeLevel::Error, format!("Ingestion failed: {err}"));
        }
    }
}

/// Submit a prediction. The result region becomes visible immediately with
/// the pending placeholder; a response-embedded error is the Failed branch
/// and its text is shown literally.
pub async fn run_predict(state: &ConsoleState, form: PredictionForm) {
    let Some(_busy) = BusyGuard::engage(&state.screen, ControlId::Predict, PREDICT_BUSY_CAPTION)
    else {
        return;
    };

    render::render_prediction_pending(&mut lock(&state.screen));

    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => {
            render::render_prediction_error(&mut lock(&state.screen), &message);
            return;
        }
    };

    match state.api.predict(&request).await {
        Ok(prediction) => {
            render::render_prediction(&mut lock(&state.screen), &prediction);
        }
        Err(FetchError::Backend(message)) => {
            render::render_prediction_error(&mut lock(&state.screen), &message);
        }
        Err(err) => {
            warn!("predict failed: {err}");
            render::render_prediction_unreachable(&mut lock(&state.screen));
        }
    }
}
