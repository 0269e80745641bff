//! Fare subsystem: vehicle profiles and the fare formula.

pub mod calculator;
pub mod types;

pub use calculator::{calculate_fare, quote, suggest_vehicle};
pub use types::{FareBreakdown, FareError, FareQuote, FareRequest, TimeOfDay, VehicleClass, VehicleProfile};
