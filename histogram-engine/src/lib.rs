//! Binning of probe crossings into collector histograms.
//!
//! Emitters send probes across a plane and vertical collectors count where
//! those probes cross them:
//! ```ignore
//! let mut scene = Scene::new(Settings::default())?;
//! scene.add_emitter(Point::new(100.0, 300.0));
//! let direct = scene.add_collector(400.0, 300.0, false);
//! let composite = scene.add_collector(600.0, 300.0, true);
//! scene.recompute();
//! let profile = scene.profile(composite)?;
//! ```
//! [geometry], [histogram], [aggregation] and [intensity] are pure functions;
//! [scene] owns the state and applies configuration changes.

pub mod aggregation;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod histogram;
pub mod intensity;
pub mod scene;

pub use aggregation::aggregate_bins;
pub use elements::{Collector, Emitter};
pub use error::SceneError;
pub use geometry::{Bounds, Point, Probe, ProbeReach, bounding_ray_length, intersect_vertical_line};
pub use histogram::compute_bins;
pub use intensity::{BandTier, Bar, IntensityConfig, IntensityProfile, intensity_profile};
pub use scene::{CollectorDescription, Scene, SceneCache, SceneDescription, SceneId, Settings};
