//! Column segmentation.

use crate::model::Token;
use crate::options::ColumnOptions;

/// Find the x-coordinate separating a two-column page.
///
/// Takes the single largest gap between consecutive sorted x-origins. The page
/// is split at the gap midpoint only when the gap is wider than
/// `min_gap` and the midpoint lies strictly between the lower and upper
/// percentile of the x-origins, which rules out a ragged margin or one stray
/// token far to the side. Returns `None` for single-column pages.
pub fn detect_split(tokens: &[Token], options: &ColumnOptions) -> Option<f32> {
    if tokens.len() < options.min_tokens || tokens.len() < 2 {
        return None;
    }

    let mut xs: Vec<f32> = tokens.iter().map(|t| t.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut best_gap = 0.0_f32;
    let mut best_at = 0;
    for (i, pair) in xs.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if gap > best_gap {
            best_gap = gap;
            best_at = i;
        }
    }

    if best_gap <= options.min_gap {
        log::debug!(
            "Largest x-gap {:.1} <= {:.1}, single column",
            best_gap,
            options.min_gap
        );
        return None;
    }

    let midpoint = (xs[best_at] + xs[best_at + 1]) / 2.0;
    let lower = xs[percentile_index(xs.len(), options.lower_percentile)];
    let upper = xs[percentile_index(xs.len(), options.upper_percentile)];

    if midpoint > lower && midpoint < upper {
        log::debug!(
            "Column split at x={:.1} (gap {:.1}, p20={:.1}, p80={:.1})",
            midpoint,
            best_gap,
            lower,
            upper
        );
        Some(midpoint)
    } else {
        log::debug!(
            "Gap at x={:.1} outside [{:.1}, {:.1}], single column",
            midpoint,
            lower,
            upper
        );
        None
    }
}

fn percentile_index(len: usize, fraction: f32) -> usize {
    let index = (len as f32 * fraction.clamp(0.0, 1.0)) as usize;
    index.min(len.saturating_sub(1))
}
