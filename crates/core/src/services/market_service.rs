use crate::errors::CoreError;
use crate::models::asset::{Asset, PRICE_FLOOR};
use crate::models::round2;

/// Fraction of the current price a single tick may move it by, total
/// span. 0.1 means each tick draws from [-5%, +5%].
const FLUCTUATION_SPAN: f64 = 0.1;

/// The market price engine.
///
/// On every tick each asset's price takes a uniform perturbation within
/// ±5% of its current value, is rounded to 2 decimals, and floored at 1.
/// The whole catalog mutates before the caller publishes one atomic
/// snapshot, so observers never see a half-ticked list.
pub struct MarketService;

impl MarketService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one fluctuation tick to every asset. `now_ms` stamps the
    /// history entries.
    pub fn tick(&self, assets: &mut [Asset], now_ms: i64) -> Result<(), CoreError> {
        for asset in assets.iter_mut() {
            let old_price = asset.price;
            let swing = (random_unit()? - 0.5) * (old_price * FLUCTUATION_SPAN);
            let new_price = round2(old_price + swing).max(PRICE_FLOOR);

            asset.change = new_price - old_price;
            asset.price = new_price;
            asset.record_price(now_ms, new_price);
        }
        Ok(())
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform draw in [0, 1) from the system entropy source.
/// Uses the top 53 bits of a random u64 — the full mantissa of an f64.
fn random_unit() -> Result<f64, CoreError> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Randomness(e.to_string()))?;
    let bits = u64::from_le_bytes(buf);
    Ok((bits >> 11) as f64 / (1u64 << 53) as f64)
}
