//! # Repository Module
//!
//! Database repository implementations for Reel.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service Layer (reel-api)                                              │
//! │       │                                                                 │
//! │       │  db.movies().get_by_id(id)                                     │
//! │       ▼                                                                 │
//! │  MovieRepository                                                       │
//! │  ├── insert / get_by_id / list                                         │
//! │  ├── update_field (typed, per-column)                                  │
//! │  └── delete (surfaces FK conflicts distinguishably)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Services stay free of query text                                    │
//! │  • Each store matches one external-collaborator contract               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`movie::MovieRepository`] - Catalog CRUD and listing
//! - [`user::UserRepository`] - Accounts and role updates
//! - [`order::OrderRepository`] - Order creation and return recording
//! - [`interaction::InteractionRepository`] - Append-only event log

pub mod interaction;
pub mod movie;
pub mod order;
pub mod user;
