//! Value types for the fare subsystem.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Vehicle category offered to the rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Auto,
    Mini,
    Sedan,
    Suv,
    Prime,
}

/// Static pricing and display data for a vehicle class.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleProfile {
    pub display_name: &'static str,
    /// Flag-down charge in rupees.
    pub base_rate: f64,
    /// Rupees per kilometre before distance discounts.
    pub per_km_rate: f64,
    pub capacity: u32,
    pub description: &'static str,
}

const AUTO: VehicleProfile = VehicleProfile {
    display_name: "Auto Rickshaw",
    base_rate: 35.0,
    per_km_rate: 11.0,
    capacity: 3,
    description: "3-wheeler auto rickshaw, ideal for short trips",
};

const MINI: VehicleProfile = VehicleProfile {
    display_name: "Mini Cab",
    base_rate: 50.0,
    per_km_rate: 12.0,
    capacity: 4,
    description: "Compact car like Wagon R, Alto, etc.",
};

const SEDAN: VehicleProfile = VehicleProfile {
    display_name: "Sedan",
    base_rate: 80.0,
    per_km_rate: 14.0,
    capacity: 4,
    description: "Sedan like Swift Dzire, Honda Amaze, etc.",
};

const SUV: VehicleProfile = VehicleProfile {
    display_name: "SUV",
    base_rate: 180.0,
    per_km_rate: 22.0,
    capacity: 6,
    description: "SUV like Ertiga, Innova, etc.",
};

const PRIME: VehicleProfile = VehicleProfile {
    display_name: "Prime Sedan",
    base_rate: 150.0,
    per_km_rate: 20.0,
    capacity: 4,
    description: "Premium sedans like Honda City, Hyundai Verna, etc.",
};

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Auto,
        VehicleClass::Mini,
        VehicleClass::Sedan,
        VehicleClass::Suv,
        VehicleClass::Prime,
    ];

    pub fn profile(self) -> &'static VehicleProfile {
        match self {
            Self::Auto => &AUTO,
            Self::Mini => &MINI,
            Self::Sedan => &SEDAN,
            Self::Suv => &SUV,
            Self::Prime => &PRIME,
        }
    }

    /// Demand multiplier applied on top of time and passenger surcharges.
    pub fn demand_factor(self) -> f64 {
        match self {
            Self::Auto => 0.95,
            Self::Mini => 1.00,
            Self::Sedan => 1.05,
            Self::Suv => 1.20,
            Self::Prime => 1.15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Mini => "mini",
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Prime => "prime",
        }
    }
}

impl VehicleProfile {
    pub fn fits(&self, passengers: u32) -> bool {
        passengers <= self.capacity
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "mini" => Ok(Self::Mini),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            "prime" => Ok(Self::Prime),
            _ => Err(FareError::UnknownVehicle(s.to_string())),
        }
    }
}

/// Time-of-day pricing bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Night tariff starts at this hour and runs past midnight.
const NIGHT_STARTS: u32 = 22;
const NIGHT_ENDS: u32 = 6;

impl TimeOfDay {
    /// Bucket a wall-clock time. Night is 22:00 through 05:59.
    pub fn at(time: NaiveTime) -> Self {
        let hour = time.hour();
        if hour >= NIGHT_STARTS || hour < NIGHT_ENDS {
            Self::Night
        } else {
            Self::Day
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::Night => 1.25,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(FareError::UnknownTimeOfDay(s.to_string())),
        }
    }
}

/// A validated fare request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareRequest {
    pub vehicle: VehicleClass,
    pub distance_km: f64,
    pub time_of_day: TimeOfDay,
    pub passengers: u32,
}

impl FareRequest {
    pub fn new(
        vehicle: VehicleClass,
        distance_km: f64,
        time_of_day: TimeOfDay,
        passengers: u32,
    ) -> Result<Self, FareError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(FareError::InvalidDistance(distance_km));
        }
        if passengers == 0 {
            return Err(FareError::NoPassengers);
        }
        Ok(Self {
            vehicle,
            distance_km,
            time_of_day,
            passengers,
        })
    }
}

/// Intermediate values of a fare computation, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareBreakdown {
    pub base_rate: f64,
    /// Per-km rate after the distance tier discount.
    pub per_km_rate: f64,
    pub base_fare: f64,
    pub time_multiplier: f64,
    pub passenger_factor: f64,
    pub demand_factor: f64,
    pub with_surge: f64,
    pub with_tax: f64,
}

/// A computed fare in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareQuote {
    pub amount: u32,
    pub breakdown: FareBreakdown,
}

/// Invalid fare input, or a fare too large to represent.
#[derive(Debug, Error, PartialEq)]
pub enum FareError {
    #[error("unknown vehicle class '{0}' (expected auto, mini, sedan, suv or prime)")]
    UnknownVehicle(String),

    #[error("unknown time of day '{0}' (expected day or night)")]
    UnknownTimeOfDay(String),

    #[error("distance must be a non-negative number of km, got {0}")]
    InvalidDistance(f64),

    #[error("passenger count must be at least 1")]
    NoPassengers,

    #[error("both pickup and dropoff locations are required")]
    MissingLocation,

    #[error("fare of {0:.0} rupees is out of range; check the trip distance")]
    FareTooLarge(f64),
}
