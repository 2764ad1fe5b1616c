//! # Core Application Logic
//!
//! This module contains Coursebook's business logic.
//! It knows nothing about HTTP, cookies, or HTML chrome.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (content)    │
//!                    │  • NavModel (cursor)    │
//!                    │  • update() (reducer)   │
//!                    │  • SessionRegistry      │
//!                    │  • select() (view)      │
//!                    │                         │
//!                    │  No transport. Pure.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   axum     │      │    CLI     │      │   tests    │
//!     │  Adapter   │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: the immutable unit/lesson catalog and its loader
//! - [`nav`]: the `NavCommand` enum and `update()` state machine
//! - [`session`]: per-session model registry
//! - [`view`]: model state → render target selection
//! - [`config`]: layered configuration

pub mod catalog;
pub mod config;
pub mod nav;
pub mod session;
pub mod view;
