//! Domain models for the doctor review.
//!
//! # Core Concepts
//!
//! - [`Doctor`]: A reviewable row. Current attributes plus a [`ProposedUpdates`]
//!   block of optional candidate values, one per tracked [`Field`].
//! - [`AuditEntry`]: Append-only record of one accept or reject, stamped with
//!   the reviewer and the minute it happened.
//! - [`Decision`]: The last accept/reject recorded for a doctor, used for the
//!   session [`ReviewSummary`].

mod audit;
mod doctor;

pub use audit::*;
pub use doctor::*;
