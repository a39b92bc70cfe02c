use crate::errors::CoreError;
use crate::models::city::{AreaInvestment, CategoryEffect, PointCategory, SplashKind};
use crate::models::indicators::Indicators;
use crate::models::state::GameState;

use super::currency_service::CurrencyService;

/// Resolves upgrades and area investments: a currency debit coupled to
/// indicator deltas and city-point mutation.
///
/// Resolution order is precondition-first — every check that can fail
/// runs before the first mutation, so a failed investment leaves the
/// game untouched.
pub struct InvestmentService {
    area_investments: Vec<AreaInvestment>,
}

impl InvestmentService {
    pub fn new() -> Self {
        Self {
            area_investments: AreaInvestment::seed_list(),
        }
    }

    /// The static list of city-wide investments.
    pub fn area_investments(&self) -> &[AreaInvestment] {
        &self.area_investments
    }

    /// Buy one upgrade of one city point.
    ///
    /// Sequence: validate point/upgrade and the level gate, debit the
    /// cost, bump the level, route the delta through the category effect
    /// table, regenerate the status text.
    pub fn apply_upgrade(
        &self,
        currency: &CurrencyService,
        state: &mut GameState,
        point_id: u32,
        upgrade_index: usize,
    ) -> Result<(), CoreError> {
        let idx = state
            .city_points
            .iter()
            .position(|p| p.id == point_id)
            .ok_or(CoreError::UnknownPoint(point_id))?;

        let (cost, delta, category) = {
            let point = &state.city_points[idx];
            let upgrade = point
                .upgrades
                .get(upgrade_index)
                .ok_or(CoreError::UnknownUpgrade {
                    point: point_id,
                    index: upgrade_index,
                })?;
            if point.level < upgrade.required_level {
                return Err(CoreError::UpgradeLocked {
                    required: upgrade.required_level,
                    current: point.level,
                });
            }
            (upgrade.cost, upgrade.delta, point.category)
        };

        currency.remove(state, cost)?;

        let point = &mut state.city_points[idx];
        point.level += 1;
        point.refresh_status();

        apply_effect(&mut state.indicators, category, delta);

        Ok(())
    }

    /// City-wide investment in one area: a smaller bump to the matching
    /// indicator, and every point in the category levels up.
    pub fn invest_area(
        &self,
        currency: &CurrencyService,
        state: &mut GameState,
        category: PointCategory,
    ) -> Result<(), CoreError> {
        let investment = self
            .area_investments
            .iter()
            .find(|inv| inv.category == category)
            .ok_or_else(|| CoreError::UnknownArea(category.to_string()))?;
        let (cost, delta) = (investment.cost, investment.delta);

        currency.remove(state, cost)?;

        // Area money goes straight to the matching indicator — no splash.
        match category.effect() {
            CategoryEffect::Uniform => state.indicators.apply_all(delta),
            CategoryEffect::Focused { primary, .. } => state.indicators.apply(primary, delta),
        }

        for point in state
            .city_points
            .iter_mut()
            .filter(|p| p.category == category)
        {
            point.level += 1;
            point.refresh_status();
        }

        Ok(())
    }
}

impl Default for InvestmentService {
    fn default() -> Self {
        Self::new()
    }
}

/// Route an upgrade delta through the category effect table, clamping
/// every touched indicator.
fn apply_effect(indicators: &mut Indicators, category: PointCategory, delta: i32) {
    match category.effect() {
        CategoryEffect::Uniform => indicators.apply_all(delta),
        CategoryEffect::Focused { primary, splash } => {
            indicators.apply(primary, delta);
            if let Some(splash) = splash {
                let splash_delta = match splash.kind {
                    SplashKind::Offset(offset) => offset,
                    SplashKind::Fraction(fraction) => {
                        (f64::from(delta) * fraction).round() as i32
                    }
                };
                indicators.apply(splash.indicator, splash_delta);
            }
        }
    }
}
