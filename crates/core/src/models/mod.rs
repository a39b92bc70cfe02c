pub mod asset;
pub mod city;
pub mod indicators;
pub mod portfolio;
pub mod source;
pub mod state;

/// Round a monetary value to 2 decimal places.
/// All prices, costs, and balances in the game are cookie-cent precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
