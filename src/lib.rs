//! Elidune Library Management System — client core
//!
//! The presentation-free half of an Elidune frontend: session state, the
//! HTTP gateway to the server, and the guarded workflows behind borrowing,
//! downloading, and signing in. A shell (TUI, wasm page, desktop app) embeds
//! [`AppState`], renders its own views, and consumes the notice, route, and
//! confirmation channels this crate emits.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod platform;
pub mod services;
pub mod session;
pub mod workflow;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};

use gateway::Gateway;
use platform::DiskSaver;
use session::SessionStore;
use workflow::{
    nav::{Navigator, RouteStream},
    notify::{Notifier, NoticeStream},
};

/// Receiving ends of the channels a shell renders from
pub struct ShellChannels {
    pub notices: NoticeStream,
    pub routes: RouteStream,
}

/// Application state shared across all views
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: SessionStore,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire up the gateway, session store, and services.
    pub fn new(config: AppConfig) -> ClientResult<(Self, ShellChannels)> {
        let session = SessionStore::new();
        let gateway = Gateway::new(&config.gateway, session.clone())?;
        let (notifier, notices) = Notifier::new();
        let (navigator, routes) = Navigator::new();
        let services = services::Services::new(
            Arc::new(gateway),
            session.clone(),
            notifier,
            navigator,
        );

        tracing::info!(
            gateway = %config.gateway.base_url,
            "client core ready v{}",
            env!("CARGO_PKG_VERSION")
        );

        Ok((
            Self {
                config: Arc::new(config),
                session,
                services: Arc::new(services),
            },
            ShellChannels { notices, routes },
        ))
    }

    /// File saver pointed at the configured downloads directory
    pub fn disk_saver(&self) -> DiskSaver {
        DiskSaver::new(&self.config.downloads.directory)
    }
}
