use super::{Scene, Settings};
use crate::{error::SceneError, geometry::Point};
use probescope_common::Real;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectorDescription {
    pub x: Real,
    pub center_y: Real,
    #[serde(default)]
    pub composite: bool,
}

///
/// This struct is created from the scene JSON file.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneDescription {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub emitters: Vec<Point>,
    #[serde(default)]
    pub collectors: Vec<CollectorDescription>,
}

impl TryFrom<&SceneDescription> for Scene {
    type Error = SceneError;

    fn try_from(description: &SceneDescription) -> Result<Self, Self::Error> {
        let mut scene = Scene::new(description.settings.clone())?;
        for origin in &description.emitters {
            scene.add_emitter(*origin);
        }
        for collector in &description.collectors {
            scene.add_collector(collector.x, collector.center_y, collector.composite);
        }
        Ok(scene)
    }
}
