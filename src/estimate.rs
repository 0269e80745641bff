//! Trip estimate: resolve the distance, price it, and point at other
//! platforms for comparison.

use crate::distance::{DistanceEstimate, DistanceResolver};
use crate::fare::{self, FareError, FareQuote, FareRequest, TimeOfDay, VehicleClass};
use serde::Serialize;
use tracing::{info, warn};

/// A ride-hailing platform the rider can compare against.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComparisonPlatform {
    pub name: &'static str,
    pub url: &'static str,
}

pub const COMPARISON_PLATFORMS: &[ComparisonPlatform] = &[
    ComparisonPlatform { name: "Rapido", url: "https://www.rapido.bike/" },
    ComparisonPlatform { name: "Ola", url: "https://www.olacabs.com/" },
    ComparisonPlatform { name: "Uber", url: "https://www.uber.com/" },
];

#[derive(Debug, Clone)]
pub struct TripRequest {
    pub pickup: String,
    pub dropoff: String,
    pub vehicle: VehicleClass,
    pub time_of_day: TimeOfDay,
    pub passengers: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripEstimate {
    pub pickup: String,
    pub dropoff: String,
    pub vehicle: VehicleClass,
    pub vehicle_name: &'static str,
    pub time_of_day: TimeOfDay,
    pub passengers: u32,
    pub distance: DistanceEstimate,
    pub fare: FareQuote,
    /// Vehicle the party size would normally be offered.
    pub suggested_vehicle: VehicleClass,
    /// Party is larger than the vehicle's seating.
    pub over_capacity: bool,
    pub compare: &'static [ComparisonPlatform],
}

impl TripEstimate {
    pub fn summary(&self) -> String {
        let mut out = format!(
            "\u{1F695} {} \u{2192} {}\n  {} · {} · {} passenger(s)\n  {:.1} km ({})\n  Estimated fare: \u{20B9}{} (incl. 5% GST)",
            self.pickup,
            self.dropoff,
            self.vehicle_name,
            self.time_of_day,
            self.passengers,
            self.distance.distance_km,
            self.distance.source,
            self.fare.amount,
        );
        if self.over_capacity {
            out.push_str(&format!(
                "\n  Note: {} seats {}; consider {}",
                self.vehicle_name,
                self.vehicle.profile().capacity,
                self.suggested_vehicle.profile().display_name,
            ));
        }
        let names: Vec<&str> = self.compare.iter().map(|p| p.name).collect();
        out.push_str(&format!("\n  Compare on: {}", names.join(", ")));
        out
    }
}

/// Resolve the distance for `request` and price it.
pub fn estimate_trip(resolver: &mut DistanceResolver, request: &TripRequest) -> Result<TripEstimate, FareError> {
    let pickup = request.pickup.trim();
    let dropoff = request.dropoff.trim();
    if pickup.is_empty() || dropoff.is_empty() {
        return Err(FareError::MissingLocation);
    }
    if request.passengers == 0 {
        return Err(FareError::NoPassengers);
    }

    let distance = resolver.resolve(pickup, dropoff);
    let fare_request = FareRequest::new(request.vehicle, distance.distance_km, request.time_of_day, request.passengers)?;
    let quote = fare::quote(&fare_request)?;

    let profile = request.vehicle.profile();
    let over_capacity = !profile.fits(request.passengers);
    if over_capacity {
        warn!(
            vehicle = %request.vehicle,
            capacity = profile.capacity,
            passengers = request.passengers,
            "Party exceeds vehicle capacity"
        );
    }

    info!(
        pickup,
        dropoff,
        distance_km = distance.distance_km,
        source = %distance.source,
        fare = quote.amount,
        "Trip estimated"
    );

    Ok(TripEstimate {
        pickup: pickup.to_string(),
        dropoff: dropoff.to_string(),
        vehicle: request.vehicle,
        vehicle_name: profile.display_name,
        time_of_day: request.time_of_day,
        passengers: request.passengers,
        distance,
        fare: quote,
        suggested_vehicle: fare::suggest_vehicle(request.passengers),
        over_capacity,
        compare: COMPARISON_PLATFORMS,
    })
}
