use super::{Scene, SceneId};
use crate::error::SceneError;
use probescope_common::{HitCount, Version};
use std::collections::HashMap;
use tracing::trace;

/// Memoises the recompute sweep and composite aggregates per scene state,
/// keyed on the scene's identity and version.
///
/// Observed results are identical to calling [Scene::recompute] and
/// [Scene::displayed_bins] directly.
#[derive(Default, Debug)]
pub struct SceneCache {
    key: Option<(SceneId, Version)>,
    composites: HashMap<usize, Vec<HitCount>>,
}

impl SceneCache {
    /// Recomputes `scene` if it changed since the last refresh.
    /// Returns `true` if a recompute took place.
    pub fn refresh(&mut self, scene: &mut Scene) -> bool {
        if self.is_current(scene) {
            trace!("Scene {} version {} unchanged", scene.id(), scene.version());
            return false;
        }
        scene.recompute();
        self.key = Some((scene.id(), scene.version()));
        self.composites.clear();
        true
    }

    pub fn is_current(&self, scene: &Scene) -> bool {
        self.key == Some((scene.id(), scene.version()))
    }

    /// As [Scene::displayed_bins], refreshing first and reusing earlier aggregates.
    pub fn displayed_bins(
        &mut self,
        scene: &mut Scene,
        index: usize,
    ) -> Result<Vec<HitCount>, SceneError> {
        self.refresh(scene);
        if let Some(bins) = self.composites.get(&index) {
            return Ok(bins.clone());
        }
        let bins = scene.displayed_bins(index)?;
        if scene.collectors().get(index).is_some_and(|c| c.is_composite) {
            self.composites.insert(index, bins.clone());
        }
        Ok(bins)
    }
}
