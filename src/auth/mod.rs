mod middleware;
mod password;
pub mod session;

pub use middleware::{AuthError, RequireAdmin};
pub use password::PasswordHasher;

use crate::error::Result;
use crate::store::Store;
use crate::types::User;

/// Verifies a username/password pair against the credential store.
///
/// Fails closed: an unknown username and a wrong password both come back as
/// `None`, so the caller cannot tell which check failed.
pub fn authenticate(store: &dyn Store, username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = store.get_user_by_username(username)? else {
        return Ok(None);
    };

    let hasher = PasswordHasher::new();
    if hasher.verify(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
