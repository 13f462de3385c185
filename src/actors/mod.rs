//! Actor-based refresh engine
//!
//! One [`refresh::RefreshActor`] owns the dashboard state. It runs as an
//! independent tokio task and talks to the rest of the program via channels:
//!
//! 1. **Commands**: [`messages::RefreshCommand`] over an mpsc channel, sent through a
//!    [`refresh::RefreshHandle`]
//! 2. **Completions**: spawned fetch tasks report results back over a second channel
//! 3. **State**: every update is published on a `watch` channel for the viewer
//!
//! ```text
//!   RefreshHandle ──commands──> RefreshActor ──spawn──> fetch tasks
//!                                    ↑                      │
//!                                    └─────completions──────┘
//!                                    │
//!                                    └──watch──> viewer
//! ```

pub mod messages;
pub mod refresh;

pub use refresh::{RefreshActor, RefreshClients, RefreshHandle, RefreshSettings};
