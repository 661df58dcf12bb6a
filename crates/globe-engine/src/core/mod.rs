pub mod params;
pub mod rotation;
pub mod schedule;
pub mod store;
pub mod time;
