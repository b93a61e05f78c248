//! # Core Application Logic
//!
//! This module contains Murmur's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (rooms, roster)│
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Relay    │      │   Config   │
//!     │  Adapter   │      │ (tokio     │      │  (TOML)    │
//!     │ (ratatui)  │      │  task)     │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: tabs, rooms and roster in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Log entries rendered by the text window
//! - [`room`]: Rooms and their occupants
//! - [`roster`]: Contact groups
//! - [`relay`]: Loopback stand-in for the protocol collaborator
//! - [`config`]: Config file loading and resolution

pub mod action;
pub mod config;
pub mod message;
pub mod relay;
pub mod room;
pub mod roster;
pub mod state;
