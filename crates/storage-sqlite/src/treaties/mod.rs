//! SQLite storage implementation for treaty-covered destinations.

mod model;
mod repository;

pub use model::{NewTreatyDestinationDB, TreatyDestinationDB};
pub use repository::TreatyDestinationRepository;
