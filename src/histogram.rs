// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Bonus Offer Simulation Suite ("The Vault") - Distribution Binning

use crate::types::HistogramBin;

/// Floor of the histogram domain when the distribution tops out low, so a
/// busted-heavy run still renders a readable axis.
const MIN_DOMAIN: f64 = 100.0;

/// Partition `[0, max(max_value, 100)]` into `bins` equal-width bins and
/// count the values falling in each. Values on a boundary go to the lower
/// bin except the last bin, which also absorbs anything at or above the
/// nominal max. Empty input yields an empty vec.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let max = values.iter().copied().fold(MIN_DOMAIN, f64::max);
    let width = max / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| {
            let lo = i as f64 * width;
            let hi = (i + 1) as f64 * width;
            HistogramBin {
                range: format!("{}-{}", lo.floor() as i64, hi.floor() as i64),
                value: lo + width / 2.0,
                count: 0,
            }
        })
        .collect();

    for &v in values {
        // Boundary values fall to the lower bin; zero and anything at or
        // beyond the nominal max land in the first and last bins.
        let index = if v <= 0.0 {
            0
        } else {
            (((v / width).ceil() as usize).saturating_sub(1)).min(bins - 1)
        };
        out[index].count += 1;
    }

    out
}
