/// Symmetric positive-definite matrix giving the local inner product in
/// chart coordinates.
///
/// Entries are stored row-major; the matrix is `dim x dim`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTensor {
    dim: usize,
    entries: Vec<f64>,
}

impl MetricTensor {
    pub fn identity(dim: usize) -> Self {
        let mut entries = vec![0.0; dim * dim];
        for i in 0..dim {
            entries[i * dim + i] = 1.0;
        }
        Self { dim, entries }
    }

    pub fn diagonal(values: &[f64]) -> Self {
        let dim = values.len();
        let mut entries = vec![0.0; dim * dim];
        for (i, value) in values.iter().enumerate() {
            entries[i * dim + i] = *value;
        }
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.entries[row * self.dim + col]
    }

    /// Evaluates `v^T G v`.
    pub fn quadratic_form(&self, v: &[f64]) -> f64 {
        debug_assert_eq!(v.len(), self.dim);
        let mut total = 0.0;
        for i in 0..self.dim {
            for j in 0..self.dim {
                total += v[i] * self.entry(i, j) * v[j];
            }
        }
        total
    }

    /// Riemannian length of `v` under this metric.
    pub fn norm(&self, v: &[f64]) -> f64 {
        self.quadratic_form(v).sqrt()
    }
}
