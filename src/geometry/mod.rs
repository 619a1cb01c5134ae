//! Geometric model of the diagram.
//!
//! This module provides the point type, the generators (sites), the closed-form
//! bisector curves that diagram edges lie on, and the numeric tolerances used
//! when comparing computed positions.

pub mod bisector;
pub mod numeric;
pub mod point;
pub mod site;
pub mod tolerance;

pub use bisector::{Bisector, EdgeType};
pub use point::Point;
pub use site::{ArcSite, LineSite, PointSite, Sign, Site, SiteEquation, SiteKind};
pub use tolerance::Tolerance;
