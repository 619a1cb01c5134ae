//! Diagram faces: one per generator, plus auxiliary faces without one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, FaceId};
use crate::geometry::site::Site;

/// Whether a face takes part in the current insertion step.
///
/// Derived from vertex status each time it is asked for: a face is
/// `Incident` iff at least one of its boundary vertices is `In`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceStatus {
    Incident,
    Nonincident,
}

/// A face record. The generator is borrowed from the caller's site list.
#[derive(Copy, Clone, Debug)]
pub struct Face<'s> {
    pub(crate) idx: FaceId,
    pub(crate) edge: Option<EdgeId>,
    pub(crate) site: Option<&'s Site>,
}

impl<'s> Face<'s> {
    #[inline]
    pub fn idx(&self) -> FaceId {
        self.idx
    }

    /// Some half-edge on the boundary; `None` until the builder attaches one.
    #[inline]
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    #[inline]
    pub fn site(&self) -> Option<&'s Site> {
        self.site
    }
}

// Faces are identified and ordered by their index alone.
impl PartialEq for Face<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Eq for Face<'_> {}

impl PartialOrd for Face<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Face<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.idx.cmp(&other.idx)
    }
}
