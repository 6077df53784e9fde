use crate::{elements::Collector, histogram::bin_index};
use probescope_common::{HitCount, Real};
use tracing::trace;

/// Whether `source` feeds the composite `target`. Only non-composite collectors
/// strictly to the left contribute.
pub(crate) fn contributes_to(source: &Collector, target: &Collector) -> bool {
    !source.is_composite && source.x < target.x
}

/// Derives the histogram a composite collector displays.
///
/// Each qualifying source bin is placed at its world-space centre and rebinned in
/// `target`'s frame, so sources with a different `center_y` land in the bins that
/// cover the same vertical position. Counts landing outside the target span are
/// dropped. Neither `target` nor `sources` is modified.
#[tracing::instrument(skip_all, level = "trace", fields(x = target.x, num_sources))]
pub fn aggregate_bins(
    target: &Collector,
    sources: &[Collector],
    num_slices: usize,
    collector_height: Real,
) -> Vec<HitCount> {
    let mut combined = vec![0; num_slices];
    let composite_top = target.top(collector_height);
    let bin_size = collector_height / num_slices as Real;
    let mut num_sources = 0;

    for source in sources.iter().filter(|source| contributes_to(source, target)) {
        num_sources += 1;
        let source_top = source.top(collector_height);
        for (j, &count) in source.bins.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let source_y = source_top + (j as Real + 0.5) * bin_size;
            match bin_index(source_y, composite_top, collector_height, num_slices)
                .and_then(|index| combined.get_mut(index))
            {
                Some(bin) => *bin += count,
                None => trace!("Source bin at {source_y} outside composite span"),
            }
        }
    }
    tracing::Span::current().record("num_sources", num_sources);
    combined
}
