//! Ordered list of plot targets with case-insensitive unique names.
//!
//! Targets are never edited in place: they are appended by [`TargetRegistry::add`],
//! removed by the user ([`TargetRegistry::remove`]) or dropped when the plot
//! service rejects them ([`TargetRegistry::reconcile`]).

use crate::error::RegistryError;
use crate::models::Target;
use crate::palette::{Palette, normalize_hex};
use std::collections::HashSet;

pub const DEFAULT_TARGET_NAME: &str = "Sun";
pub const DEFAULT_TARGET_COLOR: &str = "#dc143c";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    palette: Palette,
}

impl Default for TargetRegistry {
    /// Pre-populated with the Sun, using the default palette.
    fn default() -> Self {
        Self {
            targets: vec![Target::new(DEFAULT_TARGET_NAME, DEFAULT_TARGET_COLOR)],
            palette: Palette::default(),
        }
    }
}

impl TargetRegistry {
    pub fn empty(palette: Palette) -> Self {
        Self {
            targets: Vec::new(),
            palette,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }

    /// True if a target with this (trimmed, case-insensitive) name exists.
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.targets.iter().any(|t| t.name.to_lowercase() == needle)
    }

    /// Append a target. The name is trimmed and the color normalised to lowercase hex.
    ///
    /// ### Errors
    /// - `EmptyName` for a blank name
    /// - `DuplicateName` if a target with the same name exists, ignoring case
    /// - `InvalidColor` if `color` is not `#rrggbb`
    ///
    /// The registry is left untouched on error.
    pub fn add(&mut self, name: &str, color: &str) -> Result<&Target, RegistryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(trimmed) {
            return Err(RegistryError::DuplicateName(trimmed.to_string()));
        }
        let color = normalize_hex(color).ok_or_else(|| RegistryError::InvalidColor(color.to_string()))?;
        self.targets.push(Target::new(trimmed, color));
        Ok(&self.targets[self.targets.len() - 1])
    }

    /// Append a target using [`Self::next_suggested_color`].
    pub fn add_suggested(&mut self, name: &str) -> Result<&Target, RegistryError> {
        let color = self.next_suggested_color();
        self.add(name, color)
    }

    pub fn remove(&mut self, index: usize) -> Result<Target, RegistryError> {
        if index >= self.targets.len() {
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.targets.len(),
            });
        }
        Ok(self.targets.remove(index))
    }

    /// Drop every target whose name is in `error_names`, keeping survivors in order.
    /// Returns what was removed; an empty result means nothing changed.
    pub fn reconcile(&mut self, error_names: &HashSet<String>) -> Vec<Target> {
        if error_names.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<Target>, Vec<Target>) = std::mem::take(&mut self.targets)
            .into_iter()
            .partition(|t| error_names.contains(&t.name));
        self.targets = kept;
        removed
    }

    /// Color pre-selected for the next new target. Pure function of the current targets.
    pub fn next_suggested_color(&self) -> &'static str {
        self.palette
            .next_available(self.targets.iter().map(|t| t.color.as_str()))
    }
}
