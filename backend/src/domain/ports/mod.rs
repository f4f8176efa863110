//! Domain ports and supporting types for the hexagonal boundary.

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserStoreError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{UserPatch, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
