//! SQLite storage implementation for historical trade flows.

mod model;
mod repository;

pub use model::{NewTradeFlowDB, TradeFlowDB};
pub use repository::TradeFlowRepository;
