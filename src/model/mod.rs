//! # Message Graph Model
//!
//! Clean DTOs shared by the visibility and proximity pipelines.
//! These types cross every boundary: store ↔ engines ↔ rendering layer.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod message;
pub mod filter;
pub mod edge;
pub mod visible;
pub mod window;

pub use message::{MessageId, MessageNode, StructuralRow};
pub use filter::{FilterId, FilterMatch, FilterMode};
pub use edge::{ProximityEdge, StructuralEdge};
pub use visible::VisibleSet;
pub use window::TimeWindow;
