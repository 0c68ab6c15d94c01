use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::remap::{distance_squared, nearest_entry};

/// Result of fitting `k` centroids to a color sample.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Final centroids. Always exactly `k` entries.
    pub centroids: Vec<[f32; 3]>,
    /// Cluster index assigned to each training sample.
    pub labels: Vec<usize>,
    /// Number of refinement passes performed.
    pub iterations: usize,
    /// Whether refinement settled before the iteration cap.
    pub converged: bool,
}

/// Cluster `samples` into `k` groups by iterative centroid refinement.
///
/// Each pass assigns every sample to its nearest centroid under squared
/// Euclidean distance in the normalized channel space, then moves each
/// centroid to the mean of its assigned samples. Refinement stops when no
/// assignment changed, when the largest centroid movement drops below
/// `tolerance`, or after `max_iterations` passes. Running out of passes is
/// not a failure: the centroids of the final pass are kept.
///
/// Identical samples, `k`, and `seed` always produce identical output.
/// Callers must ensure `k >= 1` and a non-empty sample.
pub fn fit(
    samples: &[[f32; 3]],
    k: usize,
    seed: u64,
    max_iterations: usize,
    tolerance: f32,
) -> KMeansFit {
    debug_assert!(k >= 1);
    debug_assert!(!samples.is_empty());

    let mut centroids = init_centroids(samples, k, seed);
    // Out-of-range sentinel so the first pass counts every sample as moved.
    let mut labels = vec![usize::MAX; samples.len()];
    let mut iterations = 0;
    let mut converged = false;

    for iter in 0..max_iterations {
        iterations = iter + 1;

        let changed = assign_samples(samples, &centroids, &mut labels);
        if changed == 0 {
            converged = true;
            break;
        }

        let movement = update_centroids(samples, &labels, &mut centroids);
        debug!(
            iteration = iter,
            reassigned = changed,
            max_shift = movement,
            "k-means refinement pass"
        );

        if movement < tolerance {
            converged = true;
            break;
        }
    }

    KMeansFit {
        centroids,
        labels,
        iterations,
        converged,
    }
}

/// Pick `k` starting centroids from the sample's distinct colors.
///
/// Deduplicating first keeps a color that floods the sample from occupying
/// several starting centroids and starving the rest. When `k` exceeds the
/// distinct count the selection wraps around; the duplicate centroids simply
/// end up with empty clusters and keep their value.
fn init_centroids(samples: &[[f32; 3]], k: usize, seed: u64) -> Vec<[f32; 3]> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<[f32; 3]> = Vec::new();
    for &color in samples {
        if seen.insert(color.map(f32::to_bits)) {
            distinct.push(color);
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    distinct.shuffle(&mut rng);

    (0..k).map(|i| distinct[i % distinct.len()]).collect()
}

/// Reassign every sample to its nearest centroid. Returns how many samples
/// moved to a different cluster.
fn assign_samples(samples: &[[f32; 3]], centroids: &[[f32; 3]], labels: &mut [usize]) -> usize {
    let mut changed = 0;
    for (slot, color) in labels.iter_mut().zip(samples) {
        let best = nearest_entry(color, centroids);
        if *slot != best {
            *slot = best;
            changed += 1;
        }
    }
    changed
}

/// Move each centroid to the mean of its assigned samples and return the
/// largest Euclidean shift. Clusters without samples keep their centroid.
fn update_centroids(samples: &[[f32; 3]], labels: &[usize], centroids: &mut [[f32; 3]]) -> f32 {
    let k = centroids.len();
    let mut sums = vec![[0.0f32; 3]; k];
    let mut counts = vec![0usize; k];

    for (color, &label) in samples.iter().zip(labels) {
        for c in 0..3 {
            sums[label][c] += color[c];
        }
        counts[label] += 1;
    }

    let mut max_shift = 0.0f32;
    for i in 0..k {
        if counts[i] == 0 {
            continue;
        }
        let n = counts[i] as f32;
        let mean = [sums[i][0] / n, sums[i][1] / n, sums[i][2] / n];
        max_shift = max_shift.max(distance_squared(&centroids[i], &mean).sqrt());
        centroids[i] = mean;
    }
    max_shift
}
