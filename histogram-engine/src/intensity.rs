use probescope_common::{HitCount, Real};
use serde::Serialize;
use strum::{Display, EnumIter};

/// Upper edges of the distance bands, approximating cumulative normal quantiles.
pub const BAND_THRESHOLDS: [Real; 4] = [0.3413, 0.4772, 0.6131, 0.6345];

/// Classification of a bin by its distance from the point of control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BandTier {
    PointOfControl,
    Core,
    Inner,
    Middle,
    Outer,
    Tail,
}

impl BandTier {
    const BANDS: [BandTier; 5] = [
        BandTier::Core,
        BandTier::Inner,
        BandTier::Middle,
        BandTier::Outer,
        BandTier::Tail,
    ];

    fn from_distance_fraction(fraction: Real) -> Self {
        BAND_THRESHOLDS
            .iter()
            .zip(Self::BANDS)
            .find_map(|(threshold, tier)| (fraction < *threshold).then_some(tier))
            .unwrap_or(BandTier::Tail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntensityConfig {
    pub amplification: Real,
    pub max_bar_width: Real,
    pub color_band_range: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Bar {
    pub intensity: HitCount,
    pub width: Real,
    pub tier: BandTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntensityProfile {
    pub max_intensity: HitCount,
    pub point_of_control: usize,
    pub effective_max_width: Real,
    pub bars: Vec<Bar>,
}

/// Scales and classifies a resolved histogram for drawing.
pub fn intensity_profile(bins: &[HitCount], config: &IntensityConfig) -> IntensityProfile {
    let max_intensity = bins.iter().copied().max().unwrap_or_default().max(1);
    let point_of_control = bins
        .iter()
        .position(|&intensity| intensity == max_intensity)
        .unwrap_or_default();
    let effective_max_width = config
        .max_bar_width
        .min(max_intensity as Real * config.amplification);

    let half_bins = bins.len() as Real / 2.0;
    let bars = bins
        .iter()
        .enumerate()
        .map(|(i, &intensity)| {
            let width = if intensity > 0 {
                intensity as Real / max_intensity as Real * effective_max_width
            } else {
                0.0
            };
            let tier = if i == point_of_control {
                BandTier::PointOfControl
            } else {
                let distance = i.abs_diff(point_of_control) as Real;
                BandTier::from_distance_fraction(distance / (half_bins * config.color_band_range))
            };
            Bar {
                intensity,
                width,
                tier,
            }
        })
        .collect();

    IntensityProfile {
        max_intensity,
        point_of_control,
        effective_max_width,
        bars,
    }
}
