//! Plot orchestration: decides when to ask the plot service for a chart and
//! folds the answer back into the store.
//!
//! The orchestrator subscribes to its [`Store`]. Whenever state changes and a
//! plot is possible (at least one target, date/timezone/site all set) it
//! snapshots a [`PlotRequest`] and sends it from a worker thread. Each request
//! carries a sequence token; only the reply to the most recent request is
//! applied, so a slow stale reply can never overwrite a newer chart.
//!
//! Applying a reply is one synchronous pass: notifications, image update, and
//! removal of every target the service rejected. Removing targets is itself a
//! state change, so the next [`Orchestrator::pump`] re-plots without them.

use crate::error::{PlotFailure, RegistryError, TransportError};
use crate::models::{PlotImage, PlotRequest, Target, TargetNameError};
use crate::present::{LogPresenter, Presenter};
use crate::service::{PlotService, ServiceReply};
use crate::store::{StateChange, Store};
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

pub const NETWORK_ERROR_MESSAGE: &str = "Network Error: Failed to fetch plot data.";

/// A finished service call, tagged with the token of the request that caused it.
struct Completion {
    token: u64,
    result: Result<ServiceReply, TransportError>,
}

/// What applying one reply did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOutcome {
    pub token: u64,
    pub image: PlotImage,
    pub failure: Option<PlotFailure>,
    pub removed: Vec<Target>,
}

pub struct Orchestrator<P: Presenter = LogPresenter> {
    store: Store,
    events: Receiver<StateChange>,
    service: Arc<dyn PlotService>,
    presenter: P,
    image: PlotImage,
    // evaluate the trigger once for the initial state
    primed: bool,
    next_token: u64,
    latest_token: Option<u64>,
    in_flight: usize,
    done_tx: Sender<Completion>,
    done_rx: Receiver<Completion>,
    last_outcome: Option<PlotOutcome>,
}

impl<P: Presenter> Orchestrator<P> {
    pub fn new(mut store: Store, service: Arc<dyn PlotService>, presenter: P) -> Self {
        let events = store.subscribe();
        let (done_tx, done_rx) = channel();
        Self {
            store,
            events,
            service,
            presenter,
            image: PlotImage::empty(),
            primed: true,
            next_token: 1,
            latest_token: None,
            in_flight: 0,
            done_tx,
            done_rx,
            last_outcome: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutate state directly. Changes are picked up by the next [`Self::pump`].
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn current_image(&self) -> &PlotImage {
        &self.image
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn last_outcome(&self) -> Option<&PlotOutcome> {
        self.last_outcome.as_ref()
    }

    /// Add a target with an explicit color, notifying the user on rejection.
    ///
    /// Blank names are refused silently, like an empty form submit.
    pub fn add_target(&mut self, name: &str, color: &str) -> Result<Target, RegistryError> {
        let res = self.store.add_target(name, color);
        self.report_rejection(&res);
        res
    }

    /// Add a target using the registry's suggested color.
    pub fn add_suggested_target(&mut self, name: &str) -> Result<Target, RegistryError> {
        let res = self.store.add_suggested_target(name);
        self.report_rejection(&res);
        res
    }

    pub fn remove_target(&mut self, index: usize) -> Result<Target, RegistryError> {
        self.store.remove_target(index)
    }

    fn report_rejection(&self, res: &Result<Target, RegistryError>) {
        match res {
            Err(RegistryError::EmptyName) | Ok(_) => {}
            Err(e) => self.presenter.notify_error(&e.to_string()),
        }
    }

    /// Drain pending state changes (dispatching at most one request for them)
    /// and apply any replies that have already arrived. Never blocks.
    pub fn pump(&mut self) {
        if self.drain_events() {
            self.evaluate();
        }
        while let Ok(done) = self.done_rx.try_recv() {
            self.complete(done);
        }
    }

    /// Keep pumping and waiting for replies until no request is in flight and
    /// no state change is pending.
    pub fn run_until_idle(&mut self) {
        loop {
            if self.drain_events() {
                self.evaluate();
            }
            if self.in_flight == 0 {
                break;
            }
            // done_tx lives in self, so recv cannot fail while we wait
            match self.done_rx.recv() {
                Ok(done) => self.complete(done),
                Err(_) => break,
            }
        }
    }

    /// Events drained together describe the same current state, so they
    /// collapse into one trigger evaluation.
    fn drain_events(&mut self) -> bool {
        let mut triggered = std::mem::take(&mut self.primed);
        for change in self.events.try_iter() {
            log::debug!("state changed: {:?}", change);
            triggered = true;
        }
        triggered
    }

    fn evaluate(&mut self) {
        match self.store.plot_request() {
            Some(request) => self.dispatch(request),
            None => log::debug!("not plotting: no targets or incomplete observation context"),
        }
    }

    fn dispatch(&mut self, request: PlotRequest) {
        let token = self.next_token;
        self.next_token += 1;
        self.latest_token = Some(token);
        self.in_flight += 1;
        log::debug!(
            "dispatching plot request #{} for {} target(s)",
            token,
            request.targets.len()
        );

        let service = Arc::clone(&self.service);
        let tx = self.done_tx.clone();
        thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| service.generate(&request)))
                .unwrap_or_else(|_| Err(TransportError::Unavailable("plot service panicked".into())));
            // receiver gone means the orchestrator was dropped
            let _ = tx.send(Completion { token, result });
        });
    }

    fn complete(&mut self, done: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.latest_token != Some(done.token) {
            log::debug!(
                "discarding stale reply #{} (latest is #{:?})",
                done.token,
                self.latest_token
            );
            return;
        }
        let outcome = self.apply(done.token, done.result);
        self.last_outcome = Some(outcome);
    }

    /// Fold one reply into notifications, the displayed image and the registry.
    fn apply(&mut self, token: u64, result: Result<ServiceReply, TransportError>) -> PlotOutcome {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("plot request #{} failed: {}", token, e);
                self.set_image(PlotImage::empty());
                self.presenter.notify_error(NETWORK_ERROR_MESSAGE);
                return PlotOutcome {
                    token,
                    image: PlotImage::empty(),
                    failure: Some(PlotFailure::TransportFailure),
                    removed: Vec::new(),
                };
            }
        };

        let status = reply.status;
        let success = reply.is_success();
        let body = reply.body;
        let image = body.image();
        let mut failure = None;

        if success {
            self.set_image(image.clone());
            self.notify_target_errors(&body.errors);
        } else {
            if body.errors.is_empty() {
                let message = body.detail_message();
                log::warn!("plot request #{} failed with HTTP {}: {}", token, status, message);
                self.presenter.notify_error(&message);
                failure = Some(PlotFailure::ServiceFailureGeneric { status, message });
            } else {
                self.notify_target_errors(&body.errors);
            }
            self.set_image(image.clone());
        }

        let mut removed = Vec::new();
        if !body.errors.is_empty() {
            let names: HashSet<String> = body.errors.iter().map(|e| e.name.clone()).collect();
            removed = self.store.reconcile(&names);
            log::warn!(
                "plot request #{} (HTTP {}): {} target error(s), removed {}",
                token,
                status,
                body.errors.len(),
                removed.len()
            );
            failure = Some(PlotFailure::PerTargetFailure {
                names: body.errors.iter().map(|e| e.name.clone()).collect(),
            });
        } else if failure.is_none() {
            log::info!("plot request #{} succeeded", token);
        }

        PlotOutcome {
            token,
            image,
            failure,
            removed,
        }
    }

    fn notify_target_errors(&self, errors: &[TargetNameError]) {
        for err in errors {
            self.presenter
                .notify_error(&format!("Error for {}: {}", err.name, err.error));
        }
    }

    fn set_image(&mut self, image: PlotImage) {
        self.presenter.show_image(&image);
        self.image = image;
    }
}
