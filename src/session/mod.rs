//! Core selection / tagging / export session state
//!
//! The three stores of the workflow and the session object that funnels all
//! mutation through explicit operations:
//!
//! - **[`PageStore`]**: read-only snapshot of page records for the active query
//! - **[`TagDrafts`]**: per-page mutable tag drafts, committed fire-and-forget
//! - **[`Selection`]**: ordered, duplicate-free working set of page ids
//! - **[`WorkSession`]**: owns all three and keeps their invariants aligned
//!   across query loads
//!
//! All state is owned by the single interactive execution context; there are
//! no concurrent writers and no locking. Detached commit threads only talk to
//! the backend, never back into session state.

mod drafts;
mod selection;
#[allow(clippy::module_inception)]
mod session;
mod store;

pub use drafts::TagDrafts;
pub use selection::{Selection, reorder};
pub use session::WorkSession;
pub use store::{PageStore, normalized};
