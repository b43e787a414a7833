//! Unsupervised topic grouping of a news corpus.
//!
//! Texts are vectorized with a shared TF-IDF vocabulary and partitioned
//! with k-means (k-means++ seeding, fixed RNG seed). Labels only mean
//! "same group"; their values can permute between corpus snapshots.

use super::tfidf::TfidfVectorizer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// How many topics to ask for, and how to run k-means.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicClusterer {
    /// Upper bound on requested clusters.
    pub n_clusters: usize,
    /// Request at most one cluster per this many documents.
    pub docs_per_cluster: usize,
    /// Below this corpus size every document gets topic 0.
    pub min_documents: usize,
    pub max_features: usize,
    pub seed: u64,
    /// Independent k-means++ restarts; the lowest-inertia run wins.
    pub n_init: usize,
    pub max_iter: usize,
    /// Stop when no centroid moves more than this (squared distance).
    pub tolerance: f64,
}

impl Default for TopicClusterer {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            docs_per_cluster: 3,
            min_documents: 3,
            max_features: 500,
            seed: 42,
            n_init: 1,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl TopicClusterer {
    /// Number of clusters requested for a corpus of `documents`.
    pub fn cluster_count(&self, documents: usize) -> usize {
        let by_size = (documents / self.docs_per_cluster.max(1)).max(1);
        self.n_clusters.max(1).min(by_size)
    }

    /// One topic label per text, in input order.
    pub fn assign<S: AsRef<str>>(&self, texts: &[S]) -> Vec<usize> {
        if texts.is_empty() {
            return Vec::new();
        }
        if texts.len() < self.min_documents {
            debug!(documents = texts.len(), "corpus too small to cluster; single topic");
            return vec![0; texts.len()];
        }

        let matrix = TfidfVectorizer::new()
            .with_max_features(self.max_features)
            .fit_transform(texts);
        let k = self.cluster_count(texts.len());
        debug!(documents = texts.len(), terms = matrix.n_terms(), k, "clustering topics");
        self.kmeans(&matrix.rows, k)
    }

    fn kmeans(&self, points: &[Vec<f64>], k: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<(f64, Vec<usize>)> = None;
        for _ in 0..self.n_init.max(1) {
            let centroids = seed_centroids(points, k, &mut rng);
            let (labels, inertia) = self.lloyd(points, centroids);
            if best.as_ref().is_none_or(|(b, _)| inertia < *b) {
                best = Some((inertia, labels));
            }
        }
        best.map(|(_, labels)| labels).unwrap_or_default()
    }

    fn lloyd(&self, points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>) -> (Vec<usize>, f64) {
        let dim = points.first().map_or(0, Vec::len);
        let mut labels = vec![0; points.len()];

        for _ in 0..self.max_iter {
            for (label, p) in labels.iter_mut().zip(points) {
                *label = nearest(p, &centroids).0;
            }

            let mut sums = vec![vec![0.0; dim]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];
            for (&label, p) in labels.iter().zip(points) {
                counts[label] += 1;
                for (s, x) in sums[label].iter_mut().zip(p) {
                    *s += x;
                }
            }

            let mut shift: f64 = 0.0;
            for (c, (sum, count)) in sums.into_iter().zip(counts).enumerate() {
                // an emptied cluster keeps its previous centroid
                if count == 0 {
                    continue;
                }
                let updated: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
                shift = shift.max(squared_distance(&updated, &centroids[c]));
                centroids[c] = updated;
            }
            if shift <= self.tolerance {
                break;
            }
        }

        let mut inertia = 0.0;
        for (label, p) in labels.iter_mut().zip(points) {
            let (c, d) = nearest(p, &centroids);
            *label = c;
            inertia += d;
        }
        (labels, inertia)
    }
}

/// k-means++: first centroid uniform, the rest sampled proportional to
/// squared distance from the nearest chosen centroid.
fn seed_centroids(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let k = k.min(points.len());
    let mut centroids = vec![points[rng.random_range(0..points.len())].clone()];

    while centroids.len() < k {
        let dists: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f64 = dists.iter().sum();
        let idx = if total <= 0.0 {
            // every point sits on a centroid already
            centroids.len()
        } else {
            let mut target = rng.random::<f64>() * total;
            dists
                .iter()
                .position(|d| {
                    target -= d;
                    target <= 0.0
                })
                .unwrap_or(points.len() - 1)
        };
        centroids.push(points[idx].clone());
    }
    centroids
}

fn nearest(p: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    centroids
        .iter()
        .map(|c| squared_distance(p, c))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best })
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
