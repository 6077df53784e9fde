use chrono::{DateTime, Utc};
use probescope_common::{HitCount, Real, Version};
use probescope_engine::{IntensityProfile, Scene, SceneError};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CollectorReport {
    index: usize,
    x: Real,
    center_y: Real,
    composite: bool,
    bins: Vec<HitCount>,
    profile: IntensityProfile,
}

/// Everything the drawing layer needs from one recompute.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Report {
    generated_at: DateTime<Utc>,
    scene_version: Version,
    num_emitters: usize,
    collectors: Vec<CollectorReport>,
}

impl Report {
    #[tracing::instrument(skip_all, fields(version = scene.version()))]
    pub(crate) fn new(scene: &Scene, generated_at: DateTime<Utc>) -> Result<Self, SceneError> {
        let collectors = scene
            .collectors()
            .iter()
            .enumerate()
            .map(|(index, collector)| -> Result<CollectorReport, SceneError> {
                let bins = scene.displayed_bins(index)?;
                Ok(CollectorReport {
                    index,
                    x: collector.x,
                    center_y: collector.center_y,
                    composite: collector.is_composite,
                    profile: scene.profile_of(&bins),
                    bins,
                })
            })
            .collect::<Result<_, SceneError>>()?;

        Ok(Self {
            generated_at,
            scene_version: scene.version(),
            num_emitters: scene.emitters().len(),
            collectors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probescope_engine::{BandTier, Point, Settings};

    fn scene() -> Scene {
        let mut scene = Scene::new(Settings {
            num_slices: 4,
            collector_height: 100.0,
            probe_count: 1,
            ..Default::default()
        })
        .unwrap();
        scene.add_emitter(Point::new(0.0, 300.0));
        scene.add_collector(100.0, 300.0, false);
        scene.add_collector(200.0, 325.0, false);
        scene.add_collector(300.0, 300.0, true);
        scene.recompute();
        scene
    }

    #[test]
    fn report_resolves_composites() {
        let report = Report::new(&scene(), Utc::now()).unwrap();
        assert_eq!(report.num_emitters, 1);
        let bins = report
            .collectors
            .iter()
            .map(|c| c.bins.clone())
            .collect::<Vec<_>>();
        assert_eq!(bins, vec![vec![0, 0, 1, 0], vec![0, 1, 0, 0], vec![0, 0, 2, 0]]);
        let composite = report.collectors.last().unwrap();
        assert_eq!(composite.profile.point_of_control, 2);
        assert_eq!(
            composite.profile.bars.get(2).map(|bar| bar.tier),
            Some(BandTier::PointOfControl)
        );
    }

    #[test]
    fn report_serialises_kebab_case() {
        let report = Report::new(&scene(), Utc::now()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("generated-at").is_some());
        assert_eq!(value["scene-version"], report.scene_version);
        assert_eq!(value["collectors"][1]["center-y"], 325.0);
        assert_eq!(value["collectors"][2]["profile"]["bars"][2]["tier"], "point-of-control");
    }
}
