pub mod collection_service;
pub mod currency_service;
pub mod investment_service;
pub mod market_service;
pub mod trading_service;
