//! Navigation requests
//!
//! Workflows request a transition to a named destination on terminal success.
//! The mapping from outcome to route is static data in the services layer;
//! the shell owns the actual routing.

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Named destinations a workflow can land on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    /// Signup confirmation view; keeps the generated member code visible
    SignupComplete {
        member_code: String,
    },
    Home,
    ItemDetails {
        item_id: i32,
    },
    MyLoans,
}

/// Stream of requested routes for shell consumption
pub type RouteStream = UnboundedReceiverStream<Route>;

/// Sender half used by the services layer
#[derive(Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl Navigator {
    pub fn new() -> (Self, RouteStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UnboundedReceiverStream::new(rx))
    }

    pub fn go(&self, route: Route) {
        tracing::debug!(?route, "navigation requested");
        let _ = self.tx.send(route);
    }
}
