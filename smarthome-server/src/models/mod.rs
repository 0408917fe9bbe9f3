mod credential;
mod item;
mod room;

pub use credential::Credential;
pub use item::{Item, ItemTable};
pub use room::{Room, RoomOptions, RoomTarget, WILDCARD};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
