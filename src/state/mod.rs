//! Files opk keeps for itself: the per-project lock and the
//! release-notes version marker.

pub mod lock;
pub mod marker;
