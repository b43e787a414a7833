//! Sentence similarity graph and damped rank propagation (TextRank).

use super::tfidf::{TfidfVectorizer, cosine};
use tracing::debug;

/// Square, symmetric, non-negative sentence similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    cells: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    #[cfg(test)]
    pub fn from_rows(cells: Vec<Vec<f64>>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }
}

/// Vectorize sentences with TF-IDF and compute all pairwise cosine scores.
pub fn build_similarity_matrix<S: AsRef<str>>(sentences: &[S], epsilon: f64) -> SimilarityMatrix {
    let matrix = TfidfVectorizer::new().fit_transform(sentences);
    let rows = &matrix.rows;
    let n = rows.len();

    let mut cells = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let sim = cosine(&rows[i], &rows[j], epsilon);
            cells[i][j] = sim;
            cells[j][i] = sim;
        }
    }
    SimilarityMatrix { cells }
}

/// Parameters for [`rank`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    pub damping: f64,
    /// Iteration cap. With no tolerance, exactly this many updates run.
    pub iterations: usize,
    /// Stop early once the L1 change between iterations drops below this.
    pub tolerance: Option<f64>,
    /// Added to each row sum before dividing.
    pub epsilon: f64,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 20,
            tolerance: None,
            epsilon: 1e-8,
        }
    }
}

/// Power-iterate `score[i] = (1-d)/n + d * Σ_j sim[i,j]*score[j] / (row_sum[i] + ε)`
/// from a uniform start. Scores are for relative ordering only.
pub fn rank(sim: &SimilarityMatrix, params: &RankParams) -> Vec<f64> {
    let n = sim.len();
    if n == 0 {
        return Vec::new();
    }

    let d = params.damping;
    let base = (1.0 - d) / n as f64;
    let row_sums = sim.row_sums();
    let mut scores = vec![1.0 / n as f64; n];

    for iteration in 0..params.iterations {
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let propagated: f64 = (0..n).map(|j| sim.get(i, j) * scores[j]).sum();
                base + d * propagated / (row_sums[i] + params.epsilon)
            })
            .collect();

        let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;

        if params.tolerance.is_some_and(|tol| delta < tol) {
            debug!(iteration, delta, "rank converged early");
            break;
        }
    }
    scores
}
