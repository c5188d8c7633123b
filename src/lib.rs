//! azel_rs
//!
//! Client-side coordinator for an Az/El (azimuth/elevation) plotting service.
//! Keeps an observation context (date, timezone, site) and a list of colored
//! targets consistent, asks the remote service for a chart whenever they change,
//! and folds per-target failures back into the target list. Pairs with the
//! `azel` CLI.
//!
//! ### Features
//! - Target registry with case-insensitive unique names and palette-based colors
//! - Explicit state store with change subscriptions
//! - Sequenced plot requests: a stale reply never overwrites a newer chart
//! - Blocking HTTP client for `POST {base}/generate`
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use azel_rs::{HttpPlotService, Orchestrator, Store};
//! use azel_rs::present::LogPresenter;
//!
//! let service = HttpPlotService::new("http://localhost:8000")?;
//! let mut orch = Orchestrator::new(Store::default(), Arc::new(service), LogPresenter);
//! orch.add_suggested_target("Moon")?;
//! orch.run_until_idle();
//! std::fs::write("azel.png", orch.current_image().decode()?)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod palette;
pub mod present;
pub mod registry;
pub mod service;
pub mod store;

pub use context::{ObservationContext, Site};
pub use models::{PlotImage, PlotRequest, PlotResponse, Target, TargetNameError};
pub use orchestrator::Orchestrator;
pub use palette::Palette;
pub use registry::TargetRegistry;
pub use service::{HttpPlotService, PlotService, ServiceReply};
pub use store::{StateChange, Store};
