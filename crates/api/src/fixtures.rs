// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static collaborator implementations backed by JSON fixtures.
//!
//! The fleet directory and the rule store are external systems; in the
//! server binary (and in tests) they are satisfied by immutable
//! snapshots loaded from JSON files at startup. Loading is strict:
//! unknown fields or unknown rule kinds fail the load, they are never
//! ignored.

use std::path::Path;
use thiserror::Error;
use time::Date;
use tour_book::{ResourceDirectory, RuleStore};
use tour_book_domain::{AvailabilityRule, PricingRule, Resource, RuleSnapshot};

/// Errors that can occur while loading fixture files.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// The offending path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The fixture file is not valid JSON for the expected shape.
    #[error("Failed to parse fixture file {path}: {source}")]
    Parse {
        /// The offending path.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The fixture parsed but violates a domain invariant.
    #[error("Invalid fixture: {0}")]
    Invalid(String),
}

/// An immutable resource directory loaded at startup.
#[derive(Debug, Clone)]
pub struct StaticResourceDirectory {
    resources: Vec<Resource>,
}

impl StaticResourceDirectory {
    /// Creates a directory from resources, validating each entry.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Invalid` if any resource violates the
    /// kind/attribute invariants or an id is duplicated.
    pub fn new(resources: Vec<Resource>) -> Result<Self, FixtureError> {
        let mut seen = std::collections::BTreeSet::new();
        for resource in &resources {
            resource
                .validate()
                .map_err(|e| FixtureError::Invalid(e.to_string()))?;
            if !seen.insert(resource.resource_id) {
                return Err(FixtureError::Invalid(format!(
                    "Duplicate resource id {}",
                    resource.resource_id
                )));
            }
        }
        Ok(Self { resources })
    }

    /// Loads a directory from a JSON array of resources.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the text is unreadable as resources.
    pub fn from_json_str(raw: &str) -> Result<Self, FixtureError> {
        let resources: Vec<Resource> =
            serde_json::from_str(raw).map_err(|source| FixtureError::Parse {
                path: String::from("<inline>"),
                source,
            })?;
        Self::new(resources)
    }

    /// Loads a directory from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the file is unreadable or invalid.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let path_display = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path_display.clone(),
            source,
        })?;
        let resources: Vec<Resource> =
            serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
                path: path_display,
                source,
            })?;
        Self::new(resources)
    }
}

impl ResourceDirectory for StaticResourceDirectory {
    fn list_active_resources(&self, _date: Date) -> Vec<Resource> {
        self.resources
            .iter()
            .filter(|resource| resource.active)
            .cloned()
            .collect()
    }
}

/// An immutable rule store loaded at startup.
#[derive(Debug, Clone)]
pub struct StaticRuleStore {
    snapshot: RuleSnapshot,
}

impl StaticRuleStore {
    /// Creates a rule store from a snapshot, validating every rule.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Invalid` if any rule is internally
    /// inconsistent.
    pub fn new(snapshot: RuleSnapshot) -> Result<Self, FixtureError> {
        snapshot
            .validate()
            .map_err(|e| FixtureError::Invalid(e.to_string()))?;
        Ok(Self { snapshot })
    }

    /// Loads a rule store from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the text is unreadable as a rule
    /// snapshot or any rule is invalid.
    pub fn from_json_str(raw: &str) -> Result<Self, FixtureError> {
        let snapshot: RuleSnapshot =
            serde_json::from_str(raw).map_err(|source| FixtureError::Parse {
                path: String::from("<inline>"),
                source,
            })?;
        Self::new(snapshot)
    }

    /// Loads a rule store from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the file is unreadable or invalid.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let path_display = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path_display.clone(),
            source,
        })?;
        let snapshot: RuleSnapshot =
            serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
                path: path_display,
                source,
            })?;
        Self::new(snapshot)
    }
}

impl RuleStore for StaticRuleStore {
    fn list_availability_rules(&self) -> Vec<AvailabilityRule> {
        self.snapshot.availability_rules.clone()
    }

    fn list_pricing_rules(&self) -> Vec<PricingRule> {
        self.snapshot.pricing_rules.clone()
    }

    fn list_holidays(&self) -> Vec<Date> {
        self.snapshot.holidays.clone()
    }

    fn version(&self) -> u64 {
        self.snapshot.version
    }
}
