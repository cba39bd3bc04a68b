//! # Propertyhub Architecture
//!
//! Propertyhub is a **UI-agnostic real-estate browsing library**. There is no
//! rendering and no terminal I/O in here: the crate owns the data, the rules,
//! and the strings, and any front end (web view, TUI, REST service) sits on
//! top of it.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: browse, search, detail, CRUD, favorites     │
//! │  - Composes query engine over store output                  │
//! │  - Returns structured Result types, no I/O assumptions      │
//! └─────────────────────────────────────────────────────────────┘
//!                │                         │
//!                ▼                         ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Query Engine (query/)    │ │  Favorites (favorites.rs)     │
//! │  - Pure filter/search/    │ │  - Persisted snapshot set     │
//! │    sort/page functions    │ │  - Observer events            │
//! └───────────────────────────┘ └───────────────────────────────┘
//!                │
//!                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract PropertySource trait                            │
//! │  - RemoteBackend → FallbackSource → JsonFileBackend         │
//! │  - MemoryBackend (testing, sample data)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Degrade, Don't Die
//!
//! The application must stay usable without its remote record API. Every
//! read/write against an unreachable remote falls back to the local snapshot
//! (see [`store::FallbackSource`]), and corrupt persisted state loads as
//! empty rather than raising. Errors that reach the caller are real domain
//! errors, not infrastructure hiccups.
//!
//! ## One Query Engine
//!
//! Filtering, text search, sorting, and paging live in [`query`] as pure
//! functions over `&[Property]`. The store trait's search helpers delegate
//! there, so the browse flow and the search flow cannot drift apart.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade front ends talk to
//! - [`model`]: `Property`, `Favorite`, drafts, patches, wire DTOs
//! - [`query`]: filter criteria, text search, sort keys, load-more paging
//! - [`store`]: `PropertySource` trait plus remote/file/memory backends
//! - [`favorites`]: persisted favorites with observer events
//! - [`formatters`]: presentation strings (prices, dates, beds/baths)
//! - [`routes`]: typed navigation paths
//! - [`config`]: layered configuration (env, file, defaults)
//! - [`error`]: the crate-wide error enum and `Result` alias

pub mod api;
pub mod config;
pub mod error;
pub mod favorites;
pub mod formatters;
pub mod model;
pub mod query;
pub mod routes;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{open_default, BrowseResult, LeaseSummary, PropertyHubApi};
pub use error::{Error, Result};
pub use model::{Favorite, NewProperty, Property, PropertyId, PropertyPatch, PropertyType};
pub use query::{CountFilter, FilterCriteria, Page, SortKey};
