//! Stable handles for the records of the half-edge graph.
//!
//! Vertices, edges and faces live in arenas and are addressed by index. An
//! index is never reused after its record is removed, so a stale handle is
//! detected as "unknown" instead of silently naming a newer record.
//!
//! Each handle is a `repr(transparent)` wrapper around `u32`, printed as
//! `v7`, `e12`, `f3`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw arena index.
            ///
            /// # Panics
            ///
            /// Panics if `raw` does not fit in `u32`.
            #[inline]
            pub fn new(raw: usize) -> Self {
                $name(u32::try_from(raw).expect(concat!(stringify!($name), " index overflow")))
            }

            /// Arena index of this handle.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Handle of a diagram vertex.
    VertexId,
    "v"
);
arena_id!(
    /// Handle of a directed half-edge.
    EdgeId,
    "e"
);
arena_id!(
    /// Handle of a face; doubles as the face's stable sort index.
    FaceId,
    "f"
);
