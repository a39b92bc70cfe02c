use crate::errors::CoreError;
use crate::models::portfolio::Holding;
use crate::models::round2;
use crate::models::state::GameState;

use super::currency_service::CurrencyService;

/// Buy/sell logic over the portfolio ledger, plus its derived queries.
///
/// Trades execute at the live market price. Sales intentionally carry no
/// fee or slippage and settle at market, not at cost basis.
pub struct TradingService;

impl TradingService {
    pub fn new() -> Self {
        Self
    }

    /// Buy `quantity` units of an asset at the current market price.
    ///
    /// The currency debit runs first; the holding is only touched once
    /// the debit succeeds, so a failed purchase changes nothing. The cost
    /// basis is the quantity-weighted average across all buys.
    pub fn buy(
        &self,
        currency: &CurrencyService,
        state: &mut GameState,
        asset_id: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::ValidationError(
                "purchase quantity must be positive".into(),
            ));
        }
        let price = state
            .asset(asset_id)
            .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?
            .price;
        let cost = round2(price * f64::from(quantity));

        currency.remove(state, cost)?;

        let entry = state
            .portfolio
            .holdings
            .entry(asset_id.to_string())
            .or_insert(Holding {
                quantity: 0,
                average_price: 0.0,
            });
        let value_before = f64::from(entry.quantity) * entry.average_price;
        let quantity_after = entry.quantity + quantity;
        entry.average_price = round2((value_before + cost) / f64::from(quantity_after));
        entry.quantity = quantity_after;

        Ok(())
    }

    /// Sell `quantity` units at the current market price. The proceeds
    /// are credited to the balance; the entry is removed when the last
    /// unit goes.
    pub fn sell(
        &self,
        currency: &CurrencyService,
        state: &mut GameState,
        asset_id: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::ValidationError(
                "sale quantity must be positive".into(),
            ));
        }
        let price = state
            .asset(asset_id)
            .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?
            .price;
        let held = state
            .portfolio
            .get(asset_id)
            .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?
            .quantity;
        if quantity > held {
            return Err(CoreError::InsufficientHoldings {
                asset: asset_id.to_string(),
                requested: quantity,
                held,
            });
        }

        let revenue = round2(price * f64::from(quantity));
        currency.add(state, revenue)?;

        let remaining = held - quantity;
        if remaining == 0 {
            state.portfolio.holdings.remove(asset_id);
        } else if let Some(entry) = state.portfolio.holdings.get_mut(asset_id) {
            entry.quantity = remaining;
        }

        Ok(())
    }

    /// Total market value of the portfolio: Σ(quantity × current price),
    /// 2-decimal.
    pub fn portfolio_value(&self, state: &GameState) -> f64 {
        let total: f64 = state
            .portfolio
            .holdings
            .iter()
            .filter_map(|(id, holding)| {
                state
                    .asset(id)
                    .map(|asset| f64::from(holding.quantity) * asset.price)
            })
            .sum();
        round2(total)
    }

    /// Unrealized profit/loss for one held asset:
    /// `(current price − average cost) × quantity`, 2-decimal.
    pub fn unrealized_gain(&self, state: &GameState, asset_id: &str) -> Result<f64, CoreError> {
        let price = state
            .asset(asset_id)
            .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?
            .price;
        let holding = state
            .portfolio
            .get(asset_id)
            .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?;
        Ok(round2(
            (price - holding.average_price) * f64::from(holding.quantity),
        ))
    }
}

impl Default for TradingService {
    fn default() -> Self {
        Self::new()
    }
}
