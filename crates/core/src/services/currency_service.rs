use crate::errors::CoreError;
use crate::models::round2;
use crate::models::state::GameState;

/// The cookie ledger. Owns the two balance mutations and their
/// preconditions.
///
/// Pure business logic — no I/O. Persistence and publication happen in
/// the facade after a successful mutation.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Credit the balance. Never fails on funds; the amount must still be
    /// positive and finite.
    pub fn add(&self, state: &mut GameState, amount: f64) -> Result<(), CoreError> {
        Self::validate_amount(amount)?;
        state.balance = round2(state.balance + amount);
        Ok(())
    }

    /// Debit the balance. Atomic: fails with no mutation when the balance
    /// cannot cover the amount.
    pub fn remove(&self, state: &mut GameState, amount: f64) -> Result<(), CoreError> {
        Self::validate_amount(amount)?;
        if state.balance < amount {
            return Err(CoreError::InsufficientFunds {
                needed: amount,
                available: state.balance,
            });
        }
        state.balance = round2(state.balance - amount);
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "cookie amount must be positive and finite, got {amount}"
            )));
        }
        Ok(())
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
