//! Application state management.
//!
//! The state carries the configuration and the MongoDB connector shared by
//! every repository. In memory mode there is no connector.

use std::sync::Arc;

use database::mongodb::MongoConnector;

/// Shared application state.
///
/// Cloned per router (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// `None` when the catalog is kept in memory
    pub connector: Option<Arc<dyn MongoConnector>>,
}
