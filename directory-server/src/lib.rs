//! Directory Server — local-business listing backend
//!
//! Shop owners register shops with categories, city, contact details and
//! media; end users search and browse them with aggregate ratings derived
//! from reviews. The interesting part is the read side: the data was
//! written over time by tools that disagree on how to store references,
//! so every dereference goes through explicit identifier resolution and
//! every join is resolve-or-omit.
//!
//! # Module structure
//!
//! ```text
//! directory-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── api/           # Routes and handlers
//! ├── services/      # Search engine, view assembly
//! ├── db/            # Embedded store, identifier resolution, repositories
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::ident::EntityRef;
pub use services::{SearchService, ViewService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
