pub mod budget_service;
pub mod exchange_rate_service;
pub mod trip_service;
