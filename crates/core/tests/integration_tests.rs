// ═══════════════════════════════════════════════════════════════════
// Integration Tests — the Gridline facade end to end: load, mutate,
// persist, reload, publish, tick, and mirror to the backend
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gridline_core::backend::stub::StubBackend;
use gridline_core::backend::traits::{BackendAck, BackendClient, ServiceStatus};
use gridline_core::errors::CoreError;
use gridline_core::models::city::PointCategory;
use gridline_core::models::indicators::IndicatorKind;
use gridline_core::models::state::GameSnapshot;
use gridline_core::services::collection_service::CollectOutcome;
use gridline_core::storage::store::{KeyValueStore, MemoryStore};
use gridline_core::Gridline;

// ═══════════════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════════════

/// A store whose every operation fails — the adapter is unreachable.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::StoreUnavailable("simulated outage".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::StoreUnavailable("simulated outage".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::StoreUnavailable("simulated outage".into()))
    }
}

/// A backend that is always down.
struct DeadBackend;

#[async_trait]
impl BackendClient for DeadBackend {
    fn name(&self) -> &str {
        "DeadBackend"
    }

    async fn health(&self) -> Result<ServiceStatus, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn database_status(&self) -> Result<ServiceStatus, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn config(&self) -> Result<HashMap<String, String>, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn save_game(
        &self,
        _save_name: &str,
        _snapshot: &GameSnapshot,
    ) -> Result<BackendAck, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn update_cookies(&self, _cookies: f64) -> Result<BackendAck, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

fn fresh_game() -> Gridline {
    Gridline::new(Box::new(MemoryStore::new()))
}

// ═══════════════════════════════════════════════════════════════════
// Facade flows
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    #[test]
    fn fresh_game_has_seed_state() {
        let game = fresh_game();
        assert_eq!(game.cookies(), 1000.0);
        assert_eq!(game.assets().len(), 12);
        assert!(game.portfolio().is_empty());
        assert_eq!(game.city_points().len(), 13);
        assert_eq!(game.collection_sources().len(), 4);
        assert_eq!(game.area_investments().len(), 5);
    }

    #[test]
    fn add_and_remove_cookies() {
        let mut game = fresh_game();
        game.add_cookies(500.0).unwrap();
        assert_eq!(game.cookies(), 1500.0);

        game.remove_cookies(250.0).unwrap();
        assert_eq!(game.cookies(), 1250.0);

        let err = game.remove_cookies(99_999.0).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
        assert_eq!(game.cookies(), 1250.0);
    }

    #[test]
    fn set_initial_cookies_publishes_without_persisting() {
        let mut game = fresh_game();
        let (log, callback) = cookie_recorder();
        game.subscribe_cookies(callback);

        game.set_initial_cookies(777.0);

        assert_eq!(game.cookies(), 777.0);
        assert_eq!(*log.lock().unwrap(), vec![1000.0, 777.0]);
    }

    #[test]
    fn buy_and_sell_through_the_facade() {
        let mut game = fresh_game();
        let flour_price = game.assets()[0].price;

        game.buy_asset("flour", 3).unwrap();
        assert_eq!(game.portfolio().quantity_of("flour"), 3);
        assert_eq!(game.cookies(), 1000.0 - 3.0 * flour_price);
        assert!(game.portfolio_value() > 0.0);
        // Bought at the current price, so no gain yet.
        assert_eq!(game.unrealized_gain("flour").unwrap(), 0.0);

        game.sell_asset("flour", 3).unwrap();
        assert!(game.portfolio().is_empty());
        assert_eq!(game.cookies(), 1000.0);
    }

    #[test]
    fn upgrade_and_area_investment_through_the_facade() {
        let mut game = fresh_game();

        game.apply_upgrade(1, 0).unwrap();
        assert_eq!(game.cookies(), 700.0);
        assert_eq!(game.indicators().get(IndicatorKind::Health), 90);

        game.invest_area(PointCategory::Energy).unwrap();
        assert_eq!(game.cookies(), 500.0);
        assert_eq!(game.indicators().get(IndicatorKind::Energy), 75);
    }

    #[test]
    fn collect_grants_and_gates() {
        let mut game = fresh_game();

        let first = game.collect("💼 Urban Taxes").unwrap();
        assert_eq!(first, CollectOutcome::Granted { reward: 50.0 });
        assert_eq!(game.cookies(), 1050.0);

        // Immediately again: the 30 s cooldown has not elapsed.
        let second = game.collect("💼 Urban Taxes").unwrap();
        match second {
            CollectOutcome::OnCooldown { remaining_secs } => {
                assert!(remaining_secs >= 29 && remaining_secs <= 30);
            }
            other => panic!("expected cooldown, got {other:?}"),
        }
        assert_eq!(game.cookies(), 1050.0);

        assert!(game.collection_progress("💼 Urban Taxes").unwrap() < 100.0);
        assert_ne!(game.remaining_label("💼 Urban Taxes").unwrap(), "Ready!");
    }

    #[test]
    fn tick_prices_publishes_one_atomic_snapshot() {
        let mut game = fresh_game();
        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let writer = snapshots.clone();
        game.subscribe_assets(move |assets| {
            writer
                .lock()
                .unwrap()
                .push(assets.iter().map(|a| a.history.len()).collect::<Vec<_>>());
        });

        game.tick_prices().unwrap();

        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 2, "replay + one tick");
        // Every asset in the ticked snapshot has the same history depth:
        // the list was fully mutated before publication.
        assert!(snapshots[1].iter().all(|&len| len == 2));
    }

    #[test]
    fn snapshot_and_json_export() {
        let mut game = fresh_game();
        game.buy_asset("milk", 2).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cookies, game.cookies());
        assert_eq!(snapshot.portfolio.quantity_of("milk"), 2);

        let json = game.to_json().unwrap();
        assert!(json.contains("\"cityPoints\""));
    }

    fn cookie_recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(&f64) + Send + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let writer = log.clone();
        (log, move |value: &f64| writer.lock().unwrap().push(*value))
    }

    #[test]
    fn cookie_subscribers_track_every_mutation() {
        let mut game = fresh_game();
        let (log, callback) = cookie_recorder();
        let id = game.subscribe_cookies(callback);

        game.add_cookies(100.0).unwrap();
        game.buy_asset("flour", 1).unwrap();
        let flour_price = game.assets()[0].price;

        assert_eq!(
            *log.lock().unwrap(),
            vec![1000.0, 1100.0, 1100.0 - flour_price]
        );

        assert!(game.unsubscribe_cookies(id));
        game.add_cookies(1.0).unwrap();
        assert_eq!(log.lock().unwrap().len(), 3, "no notifications after unsubscribe");
    }

    #[test]
    fn portfolio_subscribers_see_trades() {
        let mut game = fresh_game();
        let counts = Arc::new(Mutex::new(Vec::new()));
        let writer = counts.clone();
        game.subscribe_portfolio(move |portfolio| {
            writer.lock().unwrap().push(portfolio.quantity_of("flour"));
        });

        game.buy_asset("flour", 4).unwrap();
        game.sell_asset("flour", 1).unwrap();

        assert_eq!(*counts.lock().unwrap(), vec![0, 4, 3]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Persist → reload
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod persistence {
    use gridline_core::storage::store::FileStore;

    use super::*;

    #[test]
    fn full_session_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gridline.json");

        let before = {
            let mut game = Gridline::new(Box::new(FileStore::open(&path).unwrap()));
            game.buy_asset("flour", 10).unwrap();
            game.apply_upgrade(1, 0).unwrap();
            game.collect("🏭 Industrial Output").unwrap();
            game.snapshot()
        };

        let game = Gridline::new(Box::new(FileStore::open(&path).unwrap()));
        let after = game.snapshot();

        assert_eq!(after.cookies, before.cookies);
        assert_eq!(after.portfolio, before.portfolio);
        assert_eq!(after.indicators, before.indicators);
        assert_eq!(after.city_points, before.city_points);
        assert_eq!(after.sources, before.sources);
    }

    #[test]
    fn asset_prices_reset_each_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gridline.json");

        {
            let mut game = Gridline::new(Box::new(FileStore::open(&path).unwrap()));
            for _ in 0..5 {
                game.tick_prices().unwrap();
            }
        }

        let game = Gridline::new(Box::new(FileStore::open(&path).unwrap()));
        for asset in game.assets() {
            assert_eq!(asset.history.len(), 1, "history is ephemeral");
            assert_eq!(asset.change, 0.0);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Degradation — unreachable store, dead backend
// ═══════════════════════════════════════════════════════════════════

mod degradation {
    use super::*;

    #[test]
    fn unreachable_store_still_plays_in_memory() {
        let mut game = Gridline::new(Box::new(FailingStore));

        assert_eq!(game.cookies(), 1000.0, "defaults despite store outage");
        game.add_cookies(100.0).unwrap();
        assert_eq!(game.cookies(), 1100.0);
        game.buy_asset("flour", 2).unwrap();
        assert_eq!(game.portfolio().quantity_of("flour"), 2);
        game.apply_upgrade(1, 0).unwrap();
        assert_eq!(game.city_points()[0].level, 3);
    }

    #[tokio::test]
    async fn dead_backend_never_blocks_gameplay() {
        let mut game =
            Gridline::with_backend(Box::new(MemoryStore::new()), Box::new(DeadBackend));

        game.add_cookies(10.0).unwrap();
        game.sync_cookies_remote().await;
        game.save_game_remote("AutoSave").await;
        assert!(game.backend_health().await.is_none());
        assert!(game.backend_database_status().await.is_none());

        // Local state is untouched by the failures above.
        assert_eq!(game.cookies(), 1010.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Backend clients
// ═══════════════════════════════════════════════════════════════════

mod backend {
    use gridline_core::backend::http::HttpBackend;

    use super::*;

    #[tokio::test]
    async fn stub_backend_succeeds_on_every_endpoint() {
        let stub = StubBackend::new();
        assert_eq!(stub.name(), "StubBackend");

        let health = stub.health().await.unwrap();
        assert_eq!(health.status, "success");

        let db = stub.database_status().await.unwrap();
        assert_eq!(db.status, "success");

        let config = stub.config().await.unwrap();
        assert_eq!(config.get("mode").map(String::as_str), Some("stub"));

        let snapshot = fresh_game().snapshot();
        let ack = stub.save_game("slot-1", &snapshot).await.unwrap();
        assert!(ack.success);
        assert!(ack.timestamp.is_some());

        let ack = stub.update_cookies(1234.5).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn stub_backed_facade_mirrors_silently() {
        let mut game =
            Gridline::with_backend(Box::new(MemoryStore::new()), Box::new(StubBackend::new()));
        game.add_cookies(5.0).unwrap();
        game.sync_cookies_remote().await;
        game.save_game_remote("AutoSave").await;
        assert!(game.backend_health().await.is_some());
    }

    #[test]
    fn http_backend_has_a_name() {
        assert_eq!(HttpBackend::new().name(), "HttpBackend");
        assert_eq!(
            HttpBackend::with_base_url("http://example.test/api").name(),
            "HttpBackend"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Price ticker lifecycle
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod ticker {
    use std::time::Duration;

    use gridline_core::ticker::{PriceTicker, DEFAULT_TICK_PERIOD};

    use super::*;

    #[test]
    fn default_period_is_ten_seconds() {
        assert_eq!(DEFAULT_TICK_PERIOD, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn ticker_mutates_until_stopped_and_then_goes_quiet() {
        let core = Arc::new(Mutex::new(fresh_game()));
        let ticker = PriceTicker::start(core.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(150)).await;
        ticker.stop();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(ticker.is_stopped());

        let depth_after_stop = core.lock().unwrap().assets()[0].history.len();
        assert!(depth_after_stop > 1, "ticker never ticked");

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(
            core.lock().unwrap().assets()[0].history.len(),
            depth_after_stop,
            "ticks after stop"
        );
    }

    #[tokio::test]
    async fn dropping_the_ticker_cancels_the_schedule() {
        let core = Arc::new(Mutex::new(fresh_game()));
        {
            let _ticker = PriceTicker::start(core.clone(), Duration::from_millis(20));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;

        let depth = core.lock().unwrap().assets()[0].history.len();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(core.lock().unwrap().assets()[0].history.len(), depth);
    }
}
