use iced_core::{Point, Rectangle};

/// Resolves a pointer x to the nearest sample index, x-only: each x maps to
/// exactly one sample, so no vertical distance threshold applies. Outside
/// the plot's horizontal span there is no hit.
pub fn nearest_index(pointer_x: f32, plot: &Rectangle, sample_count: usize) -> Option<usize> {
    if sample_count == 0 {
        return None;
    }
    if pointer_x < plot.x || pointer_x > plot.x + plot.width {
        return None;
    }
    if sample_count == 1 {
        return Some(0);
    }

    let ratio = (pointer_x - plot.x) / plot.width.max(f32::EPSILON);
    let index = (ratio * (sample_count - 1) as f32).round() as usize;
    Some(index.min(sample_count - 1))
}

/// Payload the host positions next to the hovered point.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub anchor: Point,
    pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rectangle {
        Rectangle {
            x: 60.0,
            y: 40.0,
            width: 1000.0,
            height: 240.0,
        }
    }

    #[test]
    fn outside_the_plot_clears_the_hover() {
        assert_eq!(nearest_index(59.9, &plot(), 10), None);
        assert_eq!(nearest_index(1060.1, &plot(), 10), None);
        assert_eq!(nearest_index(500.0, &plot(), 0), None);
    }

    #[test]
    fn edges_resolve_to_first_and_last() {
        assert_eq!(nearest_index(60.0, &plot(), 10), Some(0));
        assert_eq!(nearest_index(1060.0, &plot(), 10), Some(9));
    }

    #[test]
    fn nearest_sample_wins_between_neighbors() {
        // 3 samples at x = 60, 560, 1060
        assert_eq!(nearest_index(300.0, &plot(), 3), Some(0));
        assert_eq!(nearest_index(320.0, &plot(), 3), Some(1));
        assert_eq!(nearest_index(800.0, &plot(), 3), Some(1));
        assert_eq!(nearest_index(820.0, &plot(), 3), Some(2));
    }

    #[test]
    fn single_sample_is_hit_anywhere_in_span() {
        assert_eq!(nearest_index(60.0, &plot(), 1), Some(0));
        assert_eq!(nearest_index(560.0, &plot(), 1), Some(0));
        assert_eq!(nearest_index(1060.0, &plot(), 1), Some(0));
    }
}
