mod cache;
mod description;
mod settings;

pub use cache::SceneCache;
pub use description::{CollectorDescription, SceneDescription};
pub use settings::Settings;

use crate::{
    aggregation::aggregate_bins,
    elements::{Collector, Emitter},
    error::SceneError,
    geometry::{Bounds, Point},
    histogram::compute_bins,
    intensity::{IntensityConfig, IntensityProfile, intensity_profile},
};
use metrics::{counter, gauge};
use probescope_common::{HitCount, Real, Version, metrics::names};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

pub type SceneId = u64;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(0);

fn next_scene_id() -> SceneId {
    NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Emitters, collectors and the settings they are binned with.
///
/// Every mutation bumps `version`. Bins of direct collectors reflect the inputs
/// as of the last call to [Scene::recompute]. Each scene, including a clone,
/// has its own `id`, so `(id, version)` identifies one state of one scene.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    settings: Settings,
    emitters: Vec<Emitter>,
    collectors: Vec<Collector>,
    version: Version,
}

impl Clone for Scene {
    fn clone(&self) -> Self {
        Self {
            id: next_scene_id(),
            settings: self.settings.clone(),
            emitters: self.emitters.clone(),
            collectors: self.collectors.clone(),
            version: self.version,
        }
    }
}

impl Scene {
    pub fn new(settings: Settings) -> Result<Self, SceneError> {
        settings.validate()?;
        Ok(Self {
            id: next_scene_id(),
            settings,
            emitters: Vec::default(),
            collectors: Vec::default(),
            version: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn collectors(&self) -> &[Collector] {
        &self.collectors
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    fn collector(&self, index: usize) -> Result<&Collector, SceneError> {
        self.collectors
            .get(index)
            .ok_or(SceneError::NoSuchCollector(index))
    }

    pub fn add_emitter(&mut self, origin: Point) -> usize {
        self.emitters.push(Emitter::new(
            origin,
            self.settings.probe_count,
            self.settings.bounds,
        ));
        self.touch();
        self.emitters.len() - 1
    }

    pub fn remove_emitter(&mut self, index: usize) -> Result<Emitter, SceneError> {
        if index >= self.emitters.len() {
            return Err(SceneError::NoSuchEmitter(index));
        }
        self.touch();
        Ok(self.emitters.remove(index))
    }

    fn regenerate_probes(&mut self) {
        let Settings {
            probe_count,
            bounds,
            ..
        } = self.settings;
        for emitter in &mut self.emitters {
            emitter.regenerate_probes(probe_count, bounds);
        }
    }

    pub fn set_probe_count(&mut self, probe_count: usize) {
        self.settings.probe_count = probe_count;
        self.regenerate_probes();
        self.touch();
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), SceneError> {
        Settings::check_bounds(bounds)?;
        self.settings.bounds = bounds;
        self.regenerate_probes();
        self.touch();
        Ok(())
    }

    pub fn add_collector(&mut self, x: Real, center_y: Real, is_composite: bool) -> usize {
        self.collectors.push(Collector::new(
            x,
            center_y,
            self.settings.collector_height,
            self.settings.num_slices,
            is_composite,
        ));
        self.touch();
        self.collectors.len() - 1
    }

    pub fn remove_collector(&mut self, index: usize) -> Result<Collector, SceneError> {
        self.collector(index)?;
        self.touch();
        Ok(self.collectors.remove(index))
    }

    /// Vertical drag of a collector.
    pub fn move_collector(&mut self, index: usize, center_y: Real) -> Result<(), SceneError> {
        let collector = self
            .collectors
            .get_mut(index)
            .ok_or(SceneError::NoSuchCollector(index))?;
        collector.center_y = center_y;
        self.touch();
        Ok(())
    }

    /// Changes the bin count, zeroing every collector's bins to the new length
    /// so no histogram of the old length can be read afterwards.
    pub fn set_num_slices(&mut self, num_slices: usize) -> Result<(), SceneError> {
        Settings::check_num_slices(num_slices)?;
        self.settings.num_slices = num_slices;
        for collector in &mut self.collectors {
            collector.reset_bins(num_slices);
        }
        self.touch();
        Ok(())
    }

    pub fn set_collector_height(&mut self, collector_height: Real) -> Result<(), SceneError> {
        Settings::check_collector_height(collector_height)?;
        self.settings.collector_height = collector_height;
        let num_slices = self.settings.num_slices;
        for collector in &mut self.collectors {
            collector.height = collector_height;
            collector.reset_bins(num_slices);
        }
        self.touch();
        Ok(())
    }

    pub fn set_presentation(&mut self, config: IntensityConfig) -> Result<(), SceneError> {
        Settings::check_presentation(&config)?;
        self.settings.amplification = config.amplification;
        self.settings.max_bar_width = config.max_bar_width;
        self.settings.color_band_range = config.color_band_range;
        self.touch();
        Ok(())
    }

    /// Rebuilds the bins of every direct collector from scratch.
    /// Composite collectors hold no bins of their own and are zeroed.
    #[instrument(skip_all, fields(version = self.version, num_collectors = self.collectors.len(), hits))]
    pub fn recompute(&mut self) {
        let Settings {
            num_slices,
            collector_height,
            reach,
            ..
        } = self.settings;
        let emitters = &self.emitters;

        self.collectors.par_iter_mut().for_each(|collector| {
            if collector.is_composite {
                collector.reset_bins(num_slices);
            } else {
                collector.bins =
                    compute_bins(collector, emitters, num_slices, collector_height, reach);
            }
        });

        let hits: HitCount = self.collectors.iter().map(Collector::total_hits).sum();
        tracing::Span::current().record("hits", hits);
        debug!("Recomputed {} collectors", self.collectors.len());

        counter!(names::RECOMPUTES).increment(1);
        counter!(names::PROBE_HITS).increment(u64::from(hits));
        gauge!(names::SCENE_VERSION).set(self.version as f64);
    }

    /// The histogram shown for a collector: its own bins, or the aggregate of
    /// its sources for a composite.
    pub fn displayed_bins(&self, index: usize) -> Result<Vec<HitCount>, SceneError> {
        let collector = self.collector(index)?;
        if collector.is_composite {
            Ok(aggregate_bins(
                collector,
                &self.collectors,
                self.settings.num_slices,
                self.settings.collector_height,
            ))
        } else {
            Ok(collector.bins.clone())
        }
    }

    pub fn profile(&self, index: usize) -> Result<IntensityProfile, SceneError> {
        let bins = self.displayed_bins(index)?;
        Ok(self.profile_of(&bins))
    }

    /// The intensity profile of already resolved bins, using the current settings.
    pub fn profile_of(&self, bins: &[HitCount]) -> IntensityProfile {
        intensity_profile(bins, &self.settings.intensity_config())
    }
}
