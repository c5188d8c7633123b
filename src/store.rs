//! Explicit state store for the observation context and the target registry.
//!
//! Every named mutation that actually changes state publishes one
//! [`StateChange`] to all subscribers. No-op mutations publish nothing.

use crate::context::{ObservationContext, Site};
use crate::error::RegistryError;
use crate::models::{PlotRequest, Target};
use crate::registry::TargetRegistry;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Which part of the state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Date,
    Timezone,
    Site,
    Targets,
}

#[derive(Debug, Default)]
pub struct Store {
    context: ObservationContext,
    registry: TargetRegistry,
    subscribers: Vec<Sender<StateChange>>,
}

impl Store {
    pub fn new(context: ObservationContext, registry: TargetRegistry) -> Self {
        Self {
            context,
            registry,
            subscribers: Vec::new(),
        }
    }

    pub fn context(&self) -> &ObservationContext {
        &self.context
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Receive a [`StateChange`] for every subsequent mutation.
    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, change: StateChange) {
        // drop subscribers that went away
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        if self.context.date != date {
            self.context.date = date;
            self.publish(StateChange::Date);
        }
    }

    /// Blank strings unset the timezone.
    pub fn set_timezone(&mut self, timezone: Option<&str>) {
        let tz = timezone
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if self.context.timezone != tz {
            self.context.timezone = tz;
            self.publish(StateChange::Timezone);
        }
    }

    pub fn set_site(&mut self, site: Option<Site>) {
        if self.context.site != site {
            self.context.site = site;
            self.publish(StateChange::Site);
        }
    }

    pub fn add_target(&mut self, name: &str, color: &str) -> Result<Target, RegistryError> {
        let added = self.registry.add(name, color)?.clone();
        self.publish(StateChange::Targets);
        Ok(added)
    }

    pub fn add_suggested_target(&mut self, name: &str) -> Result<Target, RegistryError> {
        let added = self.registry.add_suggested(name)?.clone();
        self.publish(StateChange::Targets);
        Ok(added)
    }

    pub fn remove_target(&mut self, index: usize) -> Result<Target, RegistryError> {
        let removed = self.registry.remove(index)?;
        self.publish(StateChange::Targets);
        Ok(removed)
    }

    pub fn reconcile(&mut self, error_names: &HashSet<String>) -> Vec<Target> {
        let removed = self.registry.reconcile(error_names);
        if !removed.is_empty() {
            self.publish(StateChange::Targets);
        }
        removed
    }

    /// Snapshot of context and targets, or `None` if the registry is empty or
    /// any context field is unset.
    pub fn plot_request(&self) -> Option<PlotRequest> {
        if self.registry.is_empty() {
            return None;
        }
        let (date, timezone, site) = self.context.complete()?;
        Some(PlotRequest {
            date,
            timezone: timezone.to_string(),
            site,
            targets: self.registry.targets().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &Receiver<StateChange>) -> Vec<StateChange> {
        rx.try_iter().collect()
    }

    #[test]
    fn only_real_changes_are_published() {
        let mut store = Store::default();
        let rx = store.subscribe();

        store.set_timezone(Some("Asia/Tokyo"));
        store.set_site(Some(Site::Omu1p85m));
        assert!(drain(&rx).is_empty());

        store.set_timezone(Some("Europe/London"));
        store.set_site(Some(Site::Nro45));
        store.set_date(None);
        assert_eq!(
            drain(&rx),
            vec![StateChange::Timezone, StateChange::Site, StateChange::Date]
        );
    }

    #[test]
    fn rejected_mutations_publish_nothing() {
        let mut store = Store::default();
        let rx = store.subscribe();
        assert!(store.add_target("sun", "#1e90ff").is_err());
        assert!(store.remove_target(9).is_err());
        assert!(store.reconcile(&HashSet::from(["Pluto".to_string()])).is_empty());
        assert!(drain(&rx).is_empty());

        store.add_target("Moon", "#1e90ff").unwrap();
        assert_eq!(drain(&rx), vec![StateChange::Targets]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut store = Store::default();
        let rx = store.subscribe();
        drop(rx);
        let keep = store.subscribe();
        store.set_date(None);
        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(drain(&keep), vec![StateChange::Date]);
    }

    #[test]
    fn request_needs_targets_and_full_context() {
        let mut store = Store::default();
        assert!(store.plot_request().is_some());
        store.set_timezone(Some(""));
        assert!(store.plot_request().is_none());
        store.set_timezone(Some("Asia/Tokyo"));
        store.remove_target(0).unwrap();
        assert!(store.plot_request().is_none());
    }
}
