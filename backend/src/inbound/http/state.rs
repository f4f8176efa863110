//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on the driving ports and stay testable without real storage.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::outbound::persistence::MemoryUserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both ports to a single user service instance.
    pub fn from_service<R>(service: UserService<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(service);
        Self {
            users_query: service.clone(),
            users_command: service,
        }
    }

    /// State backed by the in-memory record store.
    ///
    /// # Examples
    /// ```
    /// use users_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::memory_backed();
    /// let _query = state.users_query.clone();
    /// ```
    pub fn memory_backed() -> Self {
        Self::from_service(UserService::new(Arc::new(MemoryUserRepository::new())))
    }
}
