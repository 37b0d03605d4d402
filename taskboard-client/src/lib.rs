//! # Taskboard Client
//!
//! REST client for the Taskboard persistence service, implementing the
//! [`BoardService`](taskboard_kanban::BoardService) and
//! [`AuthService`](taskboard_kanban::AuthService) traits over `reqwest`.
//!
//! ```rust,no_run
//! use taskboard_client::{ApiClient, ClientConfig};
//! use taskboard_kanban::SyncLayer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load()?;
//! let mut layer = SyncLayer::new(ApiClient::new(&config)?);
//! layer.load(&"p1".into()).await?;
//! println!("{} tasks", layer.state().task_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;

pub use config::{ClientConfig, ConfigError, ConfigLoader};
pub use http::ApiClient;
