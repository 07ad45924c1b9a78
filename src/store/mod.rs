mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::User;

/// Store defines the credential database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    fn create_user(&self, user: &User) -> Result<()>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn has_users(&self) -> Result<bool>;

    fn close(&self) -> Result<()>;
}
