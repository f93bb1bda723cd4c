//! Atelier storefront backend
//!
//! Long-running HTTP service backing the storefront client:
//!
//! - **Catalog** (`api/products`): public product listing, admin management
//! - **Cart & checkout** (`api/cart`, `api/orders`): per-user cart, COD orders
//! - **Order lifecycle** (`shared::models::OrderStatus`): centrally enforced
//!   status transitions, transactional stock commitment on verification
//! - **Identity** (`auth`): JWT sessions, argon2 credentials, email
//!   verification codes, Google OAuth
//! - **Back office** (`api/admin`): sales summary, users, inventory, banners
//!
//! # Module structure
//!
//! ```text
//! atelier-server/src/
//! ├── core/          # Config, AppState
//! ├── auth/          # JWT service, guards, rate limiting, passwords
//! ├── db/            # DbService + one accessor module per entity
//! ├── api/           # HTTP routes and handlers
//! ├── email/         # SMTP mail relay
//! └── oauth/         # Google OAuth code flow
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod email;
pub mod oauth;

// Re-export common types
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{AppState, Config};
pub use crate::db::DbService;
