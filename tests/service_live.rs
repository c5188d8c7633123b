// Live tests against a running plot service. Opt-in:
//   AZEL_API_URL=http://localhost:8000 cargo test --features online
#![cfg(feature = "online")]

use azel_rs::config::Config;
use azel_rs::present::RecordingPresenter;
use azel_rs::{HttpPlotService, Orchestrator, Store};
use std::sync::Arc;

fn service() -> HttpPlotService {
    let cfg = Config::from_env().unwrap();
    HttpPlotService::with_timeout(&cfg.api_url, cfg.timeout).unwrap()
}

#[test]
fn live_default_plot_has_image() {
    let presenter = RecordingPresenter::new();
    let mut orch = Orchestrator::new(Store::default(), Arc::new(service()), presenter.clone());
    orch.run_until_idle();
    assert!(presenter.errors().is_empty(), "{:?}", presenter.errors());
    assert!(!orch.current_image().is_empty());
}

#[test]
fn live_unknown_target_is_dropped() {
    let presenter = RecordingPresenter::new();
    let mut orch = Orchestrator::new(Store::default(), Arc::new(service()), presenter.clone());
    orch.add_suggested_target("Definitely Not A Star 123").unwrap();
    orch.run_until_idle();
    let names: Vec<&str> = orch.store().registry().names().collect();
    assert_eq!(names, vec!["Sun"]);
    assert!(presenter.errors().iter().any(|e| e.contains("Definitely Not A Star 123")));
}
