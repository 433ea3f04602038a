//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can key maps and sort
//! deterministically.  Agent ids are handed out sequentially by the agent
//! store and never reused, so a stale id can only ever miss, never alias a
//! newer agent.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Stable identity of a customer agent.
    pub struct AgentId(u32);
}

typed_id! {
    /// A named scene node: counter, seat, entry or exit marker, furniture.
    pub struct NodeId(u32);
}

typed_id! {
    /// A polygonal obstacle on the floor plan.
    pub struct ObstacleId(u32);
}

typed_id! {
    /// A waypoint inside a `NavigationGraph`.
    pub struct WaypointId(u32);
}

typed_id! {
    /// Handle for an in-flight movement/animation task.
    pub struct TaskId(u64);
}
