use rustc_hash::FxHashSet;

/// Picks which sample indices receive an x-axis time label for the available
/// width: the first and last always, plus every multiple of a step derived
/// from how many labels the breakpoint can fit.
pub fn label_indices(sample_count: usize, max_labels: usize) -> FxHashSet<usize> {
    let mut indices = FxHashSet::default();
    if sample_count == 0 {
        return indices;
    }

    indices.insert(0);
    indices.insert(sample_count - 1);

    let step = (sample_count / max_labels.max(1)).max(1);
    for index in (0..sample_count).step_by(step) {
        indices.insert(index);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_always_labeled() {
        for count in [1usize, 2, 3, 50, 375] {
            let indices = label_indices(count, 8);
            assert!(indices.contains(&0));
            assert!(indices.contains(&(count - 1)));
        }
        assert!(label_indices(0, 8).is_empty());
    }

    #[test]
    fn dense_series_decimate_to_the_breakpoint_limit() {
        let indices = label_indices(375, 8);
        // step = 375 / 8 = 46
        assert!(indices.contains(&46));
        assert!(indices.contains(&92));
        assert!(!indices.contains(&45));
        // first/last plus the step multiples, nothing more
        assert!(indices.len() <= 8 + 2);
    }

    #[test]
    fn sparse_series_label_every_sample() {
        let indices = label_indices(5, 8);
        assert_eq!(indices.len(), 5);
    }

    #[test]
    fn fewer_labels_on_narrow_breakpoints() {
        let mobile = label_indices(375, 4);
        let desktop = label_indices(375, 8);
        assert!(mobile.len() <= desktop.len());
    }
}
