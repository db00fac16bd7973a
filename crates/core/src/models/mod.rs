pub mod budget;
pub mod exchange_rate;
pub mod itinerary;
pub mod money;
pub mod settings;
pub mod trip;
pub mod wire;
