//! User read use-cases.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UsersQuery};
use crate::domain::{Error, User, UserId};

/// Users service implementing [`UsersQuery`].
#[derive(Clone)]
pub struct UsersService<U> {
    users: Arc<U>,
}

impl<U> UsersService<U> {
    /// Create a new service over a user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}


#[async_trait]
impl<U> UsersQuery for UsersService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(Error::from)
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.users.find_by_ids(ids).await.map_err(Error::from)
    }
}
