pub mod backend;
pub mod bus;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
#[cfg(not(target_arch = "wasm32"))]
pub mod ticker;

use chrono::Utc;
use tracing::{debug, warn};

use backend::stub::StubBackend;
use backend::traits::{BackendClient, ServiceStatus};
use bus::{StateBus, SubscriberId};
use errors::CoreError;
use models::asset::Asset;
use models::city::{AreaInvestment, CityPoint, PointCategory};
use models::indicators::Indicators;
use models::portfolio::Portfolio;
use models::source::CollectionSource;
use models::state::{GameSnapshot, GameState};
use services::collection_service::{CollectOutcome, CollectionService};
use services::currency_service::CurrencyService;
use services::investment_service::InvestmentService;
use services::market_service::MarketService;
use services::trading_service::TradingService;
use storage::records;
use storage::store::KeyValueStore;

/// Main entry point for the Gridline core library.
///
/// Owns the game state and all services needed to operate on it. Every
/// mutating operation follows the same control flow: mutate in-memory
/// state, persist the affected record(s), publish the updated snapshot
/// to subscribers. Persistence failures degrade to in-memory play and
/// are logged, never fatal.
///
/// All mutations run under `&mut self` — one logical thread, no internal
/// locking. The only spontaneous mutator is the price ticker, which
/// reaches the core through the embedder's own synchronization (see
/// [`ticker::PriceTicker`]).
#[must_use]
pub struct Gridline {
    state: GameState,
    bus: StateBus,
    store: Box<dyn KeyValueStore>,
    backend: Box<dyn BackendClient>,
    currency_service: CurrencyService,
    market_service: MarketService,
    trading_service: TradingService,
    investment_service: InvestmentService,
    collection_service: CollectionService,
}

impl std::fmt::Debug for Gridline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gridline")
            .field("balance", &self.state.balance)
            .field("assets", &self.state.assets.len())
            .field("holdings", &self.state.portfolio.len())
            .field("city_points", &self.state.city_points.len())
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Gridline {
    /// Build the core over a persistence adapter, restoring whatever the
    /// store holds and seeding defaults for the rest. Uses the stub
    /// backend — gameplay is fully offline.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_backend(store, Box::new(StubBackend::new()))
    }

    /// Build the core with an explicit backend client.
    pub fn with_backend(mut store: Box<dyn KeyValueStore>, backend: Box<dyn BackendClient>) -> Self {
        let state = records::load_state(store.as_mut(), Utc::now().timestamp_millis());
        let bus = StateBus::new(&state);
        Self {
            state,
            bus,
            store,
            backend,
            currency_service: CurrencyService::new(),
            market_service: MarketService::new(),
            trading_service: TradingService::new(),
            investment_service: InvestmentService::new(),
            collection_service: CollectionService::new(),
        }
    }

    // ── Currency Ledger ─────────────────────────────────────────────

    /// The current cookie balance.
    #[must_use]
    pub fn cookies(&self) -> f64 {
        self.state.balance
    }

    /// Seed the published balance without touching the store. The load
    /// path already owns persistence; this only aligns subscribers.
    pub fn set_initial_cookies(&mut self, amount: f64) {
        self.state.balance = amount;
        self.publish_cookies();
    }

    /// Credit cookies (collection rewards, sale proceeds, bonuses).
    pub fn add_cookies(&mut self, amount: f64) -> Result<(), CoreError> {
        self.currency_service.add(&mut self.state, amount)?;
        self.persist_balance();
        self.publish_cookies();
        Ok(())
    }

    /// Debit cookies. Fails atomically when the balance cannot cover the
    /// amount — no partial debit, no persistence, no publication.
    pub fn remove_cookies(&mut self, amount: f64) -> Result<(), CoreError> {
        self.currency_service.remove(&mut self.state, amount)?;
        self.persist_balance();
        self.publish_cookies();
        Ok(())
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy `quantity` units of an asset at the current market price.
    pub fn buy_asset(&mut self, asset_id: &str, quantity: u32) -> Result<(), CoreError> {
        self.trading_service
            .buy(&self.currency_service, &mut self.state, asset_id, quantity)?;
        debug!(asset = asset_id, quantity, "asset purchased");
        self.persist_balance();
        self.persist_portfolio();
        self.publish_cookies();
        self.publish_portfolio();
        Ok(())
    }

    /// Sell `quantity` units of a held asset at the current market price.
    pub fn sell_asset(&mut self, asset_id: &str, quantity: u32) -> Result<(), CoreError> {
        self.trading_service
            .sell(&self.currency_service, &mut self.state, asset_id, quantity)?;
        debug!(asset = asset_id, quantity, "asset sold");
        self.persist_balance();
        self.persist_portfolio();
        self.publish_cookies();
        self.publish_portfolio();
        Ok(())
    }

    /// Total market value of all holdings, 2-decimal.
    #[must_use]
    pub fn portfolio_value(&self) -> f64 {
        self.trading_service.portfolio_value(&self.state)
    }

    /// Unrealized profit/loss of one held asset, 2-decimal.
    pub fn unrealized_gain(&self, asset_id: &str) -> Result<f64, CoreError> {
        self.trading_service.unrealized_gain(&self.state, asset_id)
    }

    // ── Market ──────────────────────────────────────────────────────

    /// Apply one price-fluctuation tick to the whole catalog, then
    /// publish the asset list as one atomic snapshot. Nothing persists —
    /// prices and history are ephemeral.
    pub fn tick_prices(&mut self) -> Result<(), CoreError> {
        self.market_service
            .tick(&mut self.state.assets, Utc::now().timestamp_millis())?;
        self.publish_assets();
        Ok(())
    }

    // ── Investment ──────────────────────────────────────────────────

    /// Buy one upgrade of one city point: debit, level up, move the
    /// category's indicators, regenerate the status line.
    pub fn apply_upgrade(&mut self, point_id: u32, upgrade_index: usize) -> Result<(), CoreError> {
        self.investment_service.apply_upgrade(
            &self.currency_service,
            &mut self.state,
            point_id,
            upgrade_index,
        )?;
        self.persist_balance();
        self.persist_indicators();
        self.persist_city_points();
        self.publish_cookies();
        Ok(())
    }

    /// City-wide investment in one area: a smaller indicator bump, and
    /// every point in the category levels up.
    pub fn invest_area(&mut self, category: PointCategory) -> Result<(), CoreError> {
        self.investment_service
            .invest_area(&self.currency_service, &mut self.state, category)?;
        self.persist_balance();
        self.persist_indicators();
        self.persist_city_points();
        self.publish_cookies();
        Ok(())
    }

    /// The static list of area investments.
    #[must_use]
    pub fn area_investments(&self) -> &[AreaInvestment] {
        self.investment_service.area_investments()
    }

    // ── Collection ──────────────────────────────────────────────────

    /// Attempt to collect from a cookie source. An unelapsed cooldown is
    /// a normal [`CollectOutcome::OnCooldown`] with the remaining wait.
    pub fn collect(&mut self, source_name: &str) -> Result<CollectOutcome, CoreError> {
        let outcome = self.collection_service.collect(
            &self.currency_service,
            &mut self.state,
            source_name,
            Utc::now(),
        )?;
        if let CollectOutcome::Granted { reward } = outcome {
            debug!(source = source_name, reward, "cookies collected");
            self.persist_balance();
            self.persist_sources();
            self.publish_cookies();
        }
        Ok(outcome)
    }

    /// Cooldown progress of a source as a percentage in [0, 100].
    pub fn collection_progress(&self, source_name: &str) -> Result<f64, CoreError> {
        self.collection_service
            .progress(&self.state, source_name, Utc::now())
    }

    /// Human-readable remaining wait for a source.
    pub fn remaining_label(&self, source_name: &str) -> Result<String, CoreError> {
        self.collection_service
            .remaining_label(&self.state, source_name, Utc::now())
    }

    // ── State access ────────────────────────────────────────────────

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.state.assets
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.state.portfolio
    }

    #[must_use]
    pub fn indicators(&self) -> &Indicators {
        &self.state.indicators
    }

    #[must_use]
    pub fn city_points(&self) -> &[CityPoint] {
        &self.state.city_points
    }

    #[must_use]
    pub fn collection_sources(&self) -> &[CollectionSource] {
        &self.state.sources
    }

    /// Point-in-time view of the whole game (backend payload, exports).
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// The full snapshot as pretty JSON (debugging, manual export).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state.snapshot())
            .map_err(|e| CoreError::Serialization(e.to_string()))
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Observe the cookie balance. The current value is replayed
    /// immediately, then every change.
    pub fn subscribe_cookies(
        &mut self,
        callback: impl FnMut(&f64) + Send + 'static,
    ) -> SubscriberId {
        self.bus.cookies.subscribe(callback)
    }

    pub fn unsubscribe_cookies(&mut self, id: SubscriberId) -> bool {
        self.bus.cookies.unsubscribe(id)
    }

    /// Observe the asset list. Snapshots are atomic per tick.
    pub fn subscribe_assets(
        &mut self,
        callback: impl FnMut(&Vec<Asset>) + Send + 'static,
    ) -> SubscriberId {
        self.bus.assets.subscribe(callback)
    }

    pub fn unsubscribe_assets(&mut self, id: SubscriberId) -> bool {
        self.bus.assets.unsubscribe(id)
    }

    /// Observe the portfolio.
    pub fn subscribe_portfolio(
        &mut self,
        callback: impl FnMut(&Portfolio) + Send + 'static,
    ) -> SubscriberId {
        self.bus.portfolio.subscribe(callback)
    }

    pub fn unsubscribe_portfolio(&mut self, id: SubscriberId) -> bool {
        self.bus.portfolio.unsubscribe(id)
    }

    // ── Backend mirror ──────────────────────────────────────────────
    //
    // The backend is a non-authoritative mirror; every failure here is
    // logged and swallowed so it can never block local gameplay.

    /// Mirror the current balance to the backend.
    pub async fn sync_cookies_remote(&self) {
        if let Err(err) = self.backend.update_cookies(self.state.balance).await {
            warn!(backend = self.backend.name(), %err, "cookie sync failed; local state unaffected");
        }
    }

    /// Mirror the full game snapshot to the backend under a save name.
    pub async fn save_game_remote(&self, save_name: &str) {
        let snapshot = self.state.snapshot();
        if let Err(err) = self.backend.save_game(save_name, &snapshot).await {
            warn!(backend = self.backend.name(), %err, "remote save failed; local state unaffected");
        }
    }

    /// Probe the backend's liveness. `None` when unreachable.
    pub async fn backend_health(&self) -> Option<ServiceStatus> {
        match self.backend.health().await {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(backend = self.backend.name(), %err, "health probe failed");
                None
            }
        }
    }

    /// Probe the backend's database. `None` when unreachable.
    pub async fn backend_database_status(&self) -> Option<ServiceStatus> {
        match self.backend.database_status().await {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(backend = self.backend.name(), %err, "database probe failed");
                None
            }
        }
    }

    // ── Internal: persistence & publication ─────────────────────────

    fn persist_balance(&mut self) {
        if let Err(err) = records::save_balance(self.store.as_mut(), self.state.balance) {
            warn!(%err, "could not persist cookie balance; continuing in memory");
        }
    }

    fn persist_portfolio(&mut self) {
        if let Err(err) = records::save_portfolio(self.store.as_mut(), &self.state.portfolio) {
            warn!(%err, "could not persist portfolio; continuing in memory");
        }
    }

    fn persist_indicators(&mut self) {
        if let Err(err) = records::save_indicators(self.store.as_mut(), &self.state.indicators) {
            warn!(%err, "could not persist indicators; continuing in memory");
        }
    }

    fn persist_city_points(&mut self) {
        if let Err(err) = records::save_city_points(self.store.as_mut(), &self.state.city_points) {
            warn!(%err, "could not persist city points; continuing in memory");
        }
    }

    fn persist_sources(&mut self) {
        if let Err(err) = records::save_sources(self.store.as_mut(), &self.state.sources) {
            warn!(%err, "could not persist cookie sources; continuing in memory");
        }
    }

    fn publish_cookies(&mut self) {
        self.bus.cookies.publish(self.state.balance);
    }

    fn publish_assets(&mut self) {
        self.bus.assets.publish(self.state.assets.clone());
    }

    fn publish_portfolio(&mut self) {
        self.bus.portfolio.publish(self.state.portfolio.clone());
    }
}
