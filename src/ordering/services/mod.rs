//! Application services for persisted ordering state.

mod order_store;
mod view_mode;

pub use order_store::{TaskOrderStore, load_order, persist_order};
pub use view_mode::ViewModeStore;
