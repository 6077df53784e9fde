use crate::{
    elements::{Collector, Emitter},
    geometry::ProbeReach,
};
use probescope_common::{HitCount, Real};
use tracing::trace;

/// Maps a world-space `y` to the index of the bin containing it, for a collector
/// whose span starts at `top`. Positions outside the span have no bin.
pub(crate) fn bin_index(y: Real, top: Real, collector_height: Real, num_slices: usize) -> Option<usize> {
    let index = ((y - top) / collector_height * num_slices as Real).floor();
    (index >= 0.0 && index < num_slices as Real).then_some(index as usize)
}

/// Builds a fresh histogram for `collector` from every probe of every emitter.
///
/// Callers guarantee `num_slices >= 1`.
#[tracing::instrument(skip_all, level = "trace", fields(x = collector.x, hits))]
pub fn compute_bins(
    collector: &Collector,
    emitters: &[Emitter],
    num_slices: usize,
    collector_height: Real,
    reach: ProbeReach,
) -> Vec<HitCount> {
    let mut bins = vec![0; num_slices];
    let top = collector.top(collector_height);
    let mut hits: HitCount = 0;

    for emitter in emitters {
        for probe in &emitter.probes {
            let Some(hit_y) = probe.intersect(emitter.origin, collector.x, reach) else {
                continue;
            };
            if let Some(bin) = bin_index(hit_y, top, collector_height, num_slices)
                .and_then(|index| bins.get_mut(index))
            {
                *bin += 1;
                hits += 1;
            } else {
                trace!("Hit at {hit_y} outside collector span");
            }
        }
    }
    tracing::Span::current().record("hits", hits);
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, Point, Probe};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn single_probe_emitter(x: Real, y: Real, angle: Real, length: Real) -> Emitter {
        Emitter {
            origin: Point::new(x, y),
            probes: vec![Probe { angle, length }],
        }
    }

    #[test]
    fn single_horizontal_probe() {
        let emitters = [single_probe_emitter(0.0, 0.0, 0.0, 100.0)];
        let collector = Collector::new(50.0, 0.0, 100.0, 10, false);

        let bins = compute_bins(&collector, &emitters, 10, 100.0, ProbeReach::Bounded);
        assert_eq!(bins, vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn no_emitters_gives_empty_histogram() {
        let collector = Collector::new(50.0, 0.0, 100.0, 4, false);
        let bins = compute_bins(&collector, &[], 4, 100.0, ProbeReach::Bounded);
        assert_eq!(bins, vec![0; 4]);
    }

    #[test]
    fn hits_outside_span_are_discarded() {
        let emitters = [
            single_probe_emitter(0.0, 60.0, 0.0, 100.0),
            single_probe_emitter(0.0, -51.0, 0.0, 100.0),
            single_probe_emitter(0.0, 50.0, 0.0, 100.0),
        ];
        let collector = Collector::new(50.0, 0.0, 100.0, 10, false);
        let bins = compute_bins(&collector, &emitters, 10, 100.0, ProbeReach::Bounded);
        assert_eq!(bins.iter().sum::<HitCount>(), 0);
    }

    #[test]
    fn lower_edge_is_inclusive() {
        let emitters = [single_probe_emitter(0.0, -50.0, 0.0, 100.0)];
        let collector = Collector::new(50.0, 0.0, 100.0, 10, false);
        let bins = compute_bins(&collector, &emitters, 10, 100.0, ProbeReach::Bounded);
        assert_eq!(bins.first(), Some(&1));
    }

    #[test]
    fn short_probe_counts_only_when_unbounded() {
        let emitters = [single_probe_emitter(0.0, 0.0, 0.0, 10.0)];
        let collector = Collector::new(50.0, 0.0, 100.0, 2, false);
        let bounded = compute_bins(&collector, &emitters, 2, 100.0, ProbeReach::Bounded);
        let unbounded = compute_bins(&collector, &emitters, 2, 100.0, ProbeReach::Unbounded);
        assert_eq!(bounded, vec![0, 0]);
        assert_eq!(unbounded, vec![0, 1]);
    }

    #[test]
    fn collector_left_of_emitter_sees_nothing() {
        let bounds = Bounds {
            width: 200.0,
            height: 200.0,
        };
        let emitters = [Emitter::new(Point::new(100.0, 100.0), 360, bounds)];
        let collector = Collector::new(100.0, 100.0, 200.0, 8, false);
        let bins = compute_bins(&collector, &emitters, 8, 200.0, ProbeReach::Bounded);
        assert_eq!(bins, vec![0; 8]);
        let collector = Collector::new(20.0, 100.0, 200.0, 8, false);
        let bins = compute_bins(&collector, &emitters, 8, 200.0, ProbeReach::Bounded);
        assert_eq!(bins, vec![0; 8]);
    }

    #[test]
    fn random_scenes_stay_in_range_and_are_repeatable() {
        let bounds = Bounds {
            width: 500.0,
            height: 400.0,
        };
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..20 {
            let emitters = (0..5)
                .map(|_| {
                    Emitter::new(
                        Point::new(rng.random_range(0.0..250.0), rng.random_range(0.0..400.0)),
                        rng.random_range(1..200),
                        bounds,
                    )
                })
                .collect::<Vec<_>>();
            let num_slices = rng.random_range(1..50);
            let collector = Collector::new(
                rng.random_range(250.0..500.0),
                rng.random_range(0.0..400.0),
                150.0,
                num_slices,
                false,
            );
            let first = compute_bins(&collector, &emitters, num_slices, 150.0, ProbeReach::Bounded);
            let second = compute_bins(&collector, &emitters, num_slices, 150.0, ProbeReach::Bounded);
            assert_eq!(first.len(), num_slices);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn bin_index_edges() {
        assert_eq!(bin_index(0.0, 0.0, 10.0, 5), Some(0));
        assert_eq!(bin_index(9.999, 0.0, 10.0, 5), Some(4));
        assert_eq!(bin_index(10.0, 0.0, 10.0, 5), None);
        assert_eq!(bin_index(-0.001, 0.0, 10.0, 5), None);
        assert_eq!(bin_index(Real::NAN, 0.0, 10.0, 5), None);
    }
}
