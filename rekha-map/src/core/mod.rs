//! Core geometry types for the cost map.
//!
//! All coordinates live in a single planar world frame (x right, y up),
//! with an optional elevation carried on line features for height gating.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`WorldPoint`]: Planar world coordinates
//! - [`Point3`]: World coordinates with elevation
//!
//! ### Poses
//! - [`Pose2D`]: Planar rigid transform (x, y, theta)
//!
//! ### Reference Geometry
//! - [`LineFeature`]: Oriented segment between two elevated endpoints
//! - [`AreaPolygon`]: Closed ring labeled drivable or excluded
//! - [`LabeledPoint`]: One vertex of a labeled polygon stream
//!
//! ## Example
//!
//! ```rust
//! use rekha_map::core::{LineFeature, Point3, Pose2D};
//!
//! // A marking 2m long, straight ahead of the sensor
//! let feature = LineFeature::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
//!
//! // Move it into the world frame of a particle facing +Y
//! let pose = Pose2D::new(10.0, 5.0, std::f32::consts::FRAC_PI_2);
//! let world = feature.transformed(&pose);
//! assert!((world.end.y - 7.0).abs() < 1e-5);
//! ```

mod line;
mod point;
mod polygon;
mod pose;

pub use line::LineFeature;
pub use point::{Point3, WorldPoint};
pub use polygon::{AreaKind, AreaPolygon, DRIVABLE_LABEL_LIMIT, LabeledPoint};
pub use pose::{Pose2D, normalize_angle};
