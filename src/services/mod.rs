//! Client-side workflows

pub mod auth;
pub mod catalog;
pub mod loans;

use std::sync::Arc;

use crate::{
    gateway::LibraryApi,
    session::SessionStore,
    workflow::{nav::Navigator, notify::Notifier},
};

/// Container for all services
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services sharing the given gateway and session store
    pub fn new(
        api: Arc<dyn LibraryApi>,
        session: SessionStore,
        notifier: Notifier,
        navigator: Navigator,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(
                Arc::clone(&api),
                session.clone(),
                notifier.clone(),
                navigator.clone(),
            ),
            catalog: catalog::CatalogService::new(Arc::clone(&api)),
            loans: loans::LoansService::new(api, session, notifier, navigator),
        }
    }
}
