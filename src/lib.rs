//! Taxi fare estimation for Indian cities.
//!
//! [`distance`] turns two free-text locations into kilometres, [`fare`]
//! turns a distance into a rupee amount, and [`estimate`] runs both.

pub mod config;
pub mod distance;
pub mod estimate;
pub mod fare;
