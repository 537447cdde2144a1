// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The canonical numeric identifier of a schedulable resource.
///
/// Resource identifiers are assigned by the fleet/roster system and are
/// globally unique across both resource kinds. The ordering of this type
/// is load-bearing: lock acquisition and assignment tie-breaks both use
/// ascending resource id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
    /// Creates a new `ResourceId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two kinds of resources scheduled jointly by the booking core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A vehicle with a passenger capacity.
    Vehicle,
    /// A driver.
    Driver,
}

impl ResourceKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Driver => "driver",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The commercial classification of a vehicle.
///
/// Classes are fixed domain constants. Pricing rules and booking requests
/// may target a specific class; drivers never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Sedan, up to 4 passengers.
    Sedan,
    /// Van, typically up to 8 passengers.
    Van,
    /// Minibus, typically up to 16 passengers.
    Minibus,
    /// Full-size coach.
    Coach,
}

impl VehicleClass {
    /// Converts this class to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Van => "van",
            Self::Minibus => "minibus",
            Self::Coach => "coach",
        }
    }
}

impl FromStr for VehicleClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedan" => Ok(Self::Sedan),
            "van" => Ok(Self::Van),
            "minibus" => Ok(Self::Minibus),
            "coach" => Ok(Self::Coach),
            _ => Err(DomainError::InvalidVehicleClass(s.to_string())),
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A point-in-time snapshot of a vehicle or driver.
///
/// Resources are owned by the external fleet/roster directory; the booking
/// core only reads them. A snapshot is taken once per request and is not
/// refreshed mid-computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    /// The canonical numeric identifier.
    pub resource_id: ResourceId,
    /// Whether this is a vehicle or a driver.
    pub kind: ResourceKind,
    /// Display name (e.g., registration plate or driver name).
    pub name: String,
    /// Commercial class. Vehicles only.
    #[serde(default)]
    pub vehicle_class: Option<VehicleClass>,
    /// Passenger capacity. Vehicles only.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Whether this resource is currently operational.
    pub active: bool,
}

impl Resource {
    /// Creates a vehicle resource.
    ///
    /// # Arguments
    ///
    /// * `resource_id` - The canonical identifier
    /// * `name` - Display name
    /// * `vehicle_class` - The commercial class
    /// * `capacity` - Passenger capacity (must be at least 1)
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero.
    pub fn vehicle(
        resource_id: ResourceId,
        name: String,
        vehicle_class: VehicleClass,
        capacity: u32,
    ) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::InvalidResource {
                reason: format!("Vehicle '{name}' must have a capacity of at least 1"),
            });
        }
        Ok(Self {
            resource_id,
            kind: ResourceKind::Vehicle,
            name,
            vehicle_class: Some(vehicle_class),
            capacity: Some(capacity),
            active: true,
        })
    }

    /// Creates a driver resource.
    #[must_use]
    pub const fn driver(resource_id: ResourceId, name: String) -> Self {
        Self {
            resource_id,
            kind: ResourceKind::Driver,
            name,
            vehicle_class: None,
            capacity: None,
            active: true,
        }
    }

    /// Marks this resource as out of service.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Validates the kind/attribute invariants for this resource.
    ///
    /// Vehicles must carry a positive capacity; drivers must carry neither
    /// a capacity nor a vehicle class.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResource` if the invariants do not hold.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.kind {
            ResourceKind::Vehicle => {
                if self.capacity.is_none_or(|c| c == 0) {
                    return Err(DomainError::InvalidResource {
                        reason: format!(
                            "Vehicle '{}' must have a capacity of at least 1",
                            self.name
                        ),
                    });
                }
            }
            ResourceKind::Driver => {
                if self.capacity.is_some() || self.vehicle_class.is_some() {
                    return Err(DomainError::InvalidResource {
                        reason: format!(
                            "Driver '{}' must not carry a capacity or vehicle class",
                            self.name
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
