mod item;
mod store;

pub use item::ItemRepository;
pub use store::{KeyValueStore, SqliteStore};
