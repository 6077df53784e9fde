use crate::geometry::{Bounds, Point, Probe, bounding_ray_length};
use probescope_common::{HitCount, Real};
use serde::Serialize;
use std::f64::consts::TAU;

/// A point source emitting probes in every direction.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Emitter {
    pub origin: Point,
    pub probes: Vec<Probe>,
}

impl Emitter {
    /// Creates an emitter with `probe_count` evenly spaced probes, each reaching `bounds`.
    pub fn new(origin: Point, probe_count: usize, bounds: Bounds) -> Self {
        let mut emitter = Self {
            origin,
            probes: Vec::default(),
        };
        emitter.regenerate_probes(probe_count, bounds);
        emitter
    }

    /// Replaces all probes, keeping the origin fixed.
    pub fn regenerate_probes(&mut self, probe_count: usize, bounds: Bounds) {
        let step = TAU / probe_count.max(1) as Real;
        self.probes = (0..probe_count)
            .map(|k| {
                let angle = k as Real * step;
                Probe {
                    angle,
                    length: bounding_ray_length(self.origin, angle, bounds),
                }
            })
            .collect();
    }
}

/// A vertical line at a fixed `x` which bins probe crossings along its span.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Collector {
    pub x: Real,
    pub center_y: Real,
    pub height: Real,
    /// Not authoritative for a composite collector.
    pub bins: Vec<HitCount>,
    pub is_composite: bool,
}

impl Collector {
    pub fn new(x: Real, center_y: Real, height: Real, num_slices: usize, is_composite: bool) -> Self {
        Self {
            x,
            center_y,
            height,
            bins: vec![0; num_slices],
            is_composite,
        }
    }

    /// The y coordinate of bin 0's lower edge, for a collector of the given height.
    pub fn top(&self, collector_height: Real) -> Real {
        self.center_y - collector_height / 2.0
    }

    pub(crate) fn reset_bins(&mut self, num_slices: usize) {
        self.bins.clear();
        self.bins.resize(num_slices, 0);
    }

    pub fn total_hits(&self) -> HitCount {
        self.bins.iter().sum()
    }
}
