//! API clients for external services.
//!
//! ## Usage
//!
//! ```rust
//! use timecard::api::ServerClient;
//! use timecard::libs::config::ServerConfig;
//!
//! let client = ServerClient::new(&ServerConfig {
//!     api_url: "https://time.example.com".to_string(),
//!     auth_token: "secret".to_string(),
//! });
//! assert_eq!(client.entries_url(None), "https://time.example.com/time-entries");
//! ```

pub mod server;
pub mod sync;

pub use server::{EntryApi, ServerClient};
pub use sync::{SyncPlan, SyncReport};
