//! Seam towards whatever shows results to the user: error toasts and the chart.

use crate::models::PlotImage;
use std::sync::{Arc, Mutex};

pub trait Presenter {
    /// Fire-and-forget error notification, one per distinct problem.
    fn notify_error(&self, message: &str);
    /// Replace the displayed chart. An empty image clears the display.
    fn show_image(&self, image: &PlotImage);
}

/// Routes everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn notify_error(&self, message: &str) {
        log::error!("{message}");
    }

    fn show_image(&self, image: &PlotImage) {
        match image.base64() {
            Some(b64) => log::info!("plot updated ({} base64 chars)", b64.len()),
            None => log::info!("plot cleared"),
        }
    }
}

/// Keeps every notification and image in memory. Clones share the same record.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default, Clone)]
struct Recorded {
    errors: Vec<String>,
    images: Vec<PlotImage>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }

    pub fn images(&self) -> Vec<PlotImage> {
        self.lock().images.clone()
    }

    pub fn last_image(&self) -> Option<PlotImage> {
        self.lock().images.last().cloned()
    }

    pub fn clear(&self) {
        let mut rec = self.lock();
        rec.errors.clear();
        rec.images.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        // a poisoned record is still readable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn notify_error(&self, message: &str) {
        self.lock().errors.push(message.to_string());
    }

    fn show_image(&self, image: &PlotImage) {
        self.lock().images.push(image.clone());
    }
}
