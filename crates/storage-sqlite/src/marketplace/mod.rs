//! SQLite storage implementation for marketplace listings.

mod model;
mod repository;

pub use model::MarketplaceListingDB;
pub use repository::MarketplaceListingRepository;
