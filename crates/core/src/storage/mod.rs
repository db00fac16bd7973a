pub mod currency_cache;
pub mod kv;
pub mod manager;
pub mod migration;
pub mod sample;
