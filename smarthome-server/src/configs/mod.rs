mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Admin, Auth, Cors, Database, Logger, Server, Settings, Store};
pub use storage::Storage;
