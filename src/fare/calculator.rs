//! Fare calculation.
//!
//! base + distance × tiered per-km rate, then time, passenger and demand
//! multipliers, 5% GST, rounded up to the next ₹5.

use super::types::{FareBreakdown, FareError, FareQuote, FareRequest, TimeOfDay, VehicleClass};

const TAX_RATE: f64 = 0.05;
const ROUNDING_STEP: f64 = 5.0;

/// Passenger counts above this pay the group surcharge.
const GROUP_THRESHOLD: u32 = 3;
const GROUP_FACTOR: f64 = 1.05;

/// Distance tiers, longest first: (strictly above km, per-km multiplier).
const DISTANCE_TIERS: [(f64, f64); 3] = [(50.0, 0.75), (25.0, 0.85), (10.0, 0.95)];

/// Per-km rate after the long-distance discount for `distance_km`.
fn tiered_rate(per_km_rate: f64, distance_km: f64) -> f64 {
    DISTANCE_TIERS
        .iter()
        .find(|(above, _)| distance_km > *above)
        .map(|(_, factor)| per_km_rate * factor)
        .unwrap_or(per_km_rate)
}

fn passenger_factor(passengers: u32) -> f64 {
    if passengers > GROUP_THRESHOLD {
        GROUP_FACTOR
    } else {
        1.0
    }
}

/// Compute the fare and every intermediate value for a validated request.
///
/// Fails with [`FareError::FareTooLarge`] when the rounded fare does not fit
/// in a `u32`.
pub fn quote(request: &FareRequest) -> Result<FareQuote, FareError> {
    let profile = request.vehicle.profile();
    let per_km_rate = tiered_rate(profile.per_km_rate, request.distance_km);
    let base_fare = profile.base_rate + request.distance_km * per_km_rate;

    let time_multiplier = request.time_of_day.multiplier();
    let passenger_factor = passenger_factor(request.passengers);
    let demand_factor = request.vehicle.demand_factor();

    let with_surge = base_fare * time_multiplier * passenger_factor * demand_factor;
    let with_tax = with_surge * (1.0 + TAX_RATE);
    let rounded = (with_tax / ROUNDING_STEP).ceil() * ROUNDING_STEP;
    if rounded > u32::MAX as f64 {
        return Err(FareError::FareTooLarge(rounded));
    }
    let amount = rounded as u32;

    Ok(FareQuote {
        amount,
        breakdown: FareBreakdown {
            base_rate: profile.base_rate,
            per_km_rate,
            base_fare,
            time_multiplier,
            passenger_factor,
            demand_factor,
            with_surge,
            with_tax,
        },
    })
}

/// Fare in rupees, always a multiple of 5.
///
/// Fails on invalid input (negative or non-finite distance, zero passengers)
/// and on distances whose fare overflows a `u32`. Unknown vehicle tags are rejected earlier, when parsing a
/// [`VehicleClass`].
pub fn calculate_fare(
    vehicle: VehicleClass,
    distance_km: f64,
    time_of_day: TimeOfDay,
    passengers: u32,
) -> Result<u32, FareError> {
    let request = FareRequest::new(vehicle, distance_km, time_of_day, passengers)?;
    Ok(quote(&request)?.amount)
}

/// Vehicle to pre-select for a party size.
pub fn suggest_vehicle(passengers: u32) -> VehicleClass {
    if passengers > 4 {
        VehicleClass::Suv
    } else if passengers > 3 {
        VehicleClass::Sedan
    } else {
        VehicleClass::Mini
    }
}
