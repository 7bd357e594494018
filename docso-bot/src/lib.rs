//! Docso Bot Library
//!
//! Chat front end for the docso engine: parses commands, fetches package
//! indexes, sends rendered blocks and turns reactions into page navigation.
//!
//! ## Architecture
//!
//! ```text
//! inbound events (JSON lines)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │    Docso Bot    │ ◄── This crate
//! │                 │
//! │  ┌───────────┐  │
//! │  │ Commands  │  │ - !doc <pkg> [name | Type.Method | glob]
//! │  │           │  │ - !getfuncs <pkg>
//! │  │           │  │ - !gettypes <pkg>
//! │  └───────────┘  │
//! │  ┌───────────┐  │
//! │  │ Reactions │  │ - ⬅️ ➡️ 🗑️ on listing messages
//! │  └───────────┘  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   docso-core    │
//! │                 │
//! │ Query │ Format  │
//! │ Glob  │ Pages   │
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use docso_bot::{server, Bot, BotConfig, FileIndexProvider, StdioChannel};
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), docso_bot::BotError> {
//!     let config = BotConfig::default();
//!     let provider = Arc::new(FileIndexProvider::new(&config.docs_dir));
//!     let bot = Arc::new(Bot::new(config, provider, Arc::new(StdioChannel::stdout())));
//!
//!     server::run(bot, BufReader::new(tokio::io::stdin())).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod server;
pub mod transport;

pub use cache::{CachedIndexProvider, IndexCache};
pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use events::Event;
pub use handlers::{Bot, Command, SweepReport};
pub use transport::{Channel, FileIndexProvider, IndexProvider, MessageRef, StdioChannel};

/// Bot metadata
pub const BOT_NAME: &str = "docso";
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");
