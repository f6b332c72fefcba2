use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Principal component scores for every party of a period.
///
/// `scores` has one row per party (index order) and one column per roll call. Only the first
/// `min(active parties, roll calls)` columns can be non-zero.
#[derive(Debug, Clone)]
pub struct Projection {
    pub scores: DMatrix<f64>,
    /// Singular values of the centered matrix, descending.
    pub singular_values: DVector<f64>,
}

impl Projection {
    fn empty(n_parties: usize, n_calls: usize) -> Self {
        Self {
            scores: DMatrix::zeros(n_parties, n_calls),
            singular_values: DVector::zeros(0),
        }
    }

    /// Share of the total variance carried by each component.
    pub fn explained_variance_ratio(&self) -> Vec<f64> {
        let total: f64 = self.singular_values.iter().map(|s| s * s).sum();
        if total <= 0.0 {
            return vec![0.0; self.singular_values.len()];
        }
        self.singular_values.iter().map(|s| s * s / total).collect()
    }
}

/// Full-rank PCA over the parties with at least one seat.
///
/// Parties of size zero are left out of the decomposition and of the column centering, and
/// come back as all-zero rows.
pub fn project(votes: &DMatrix<f64>, sizes: &[u32], period: &str) -> Result<Projection> {
    let (n_parties, n_calls) = votes.shape();
    let active: Vec<usize> = (0..n_parties)
        .filter(|&i| sizes.get(i).copied().unwrap_or(0) > 0)
        .collect();
    if active.is_empty() || n_calls == 0 {
        return Ok(Projection::empty(n_parties, n_calls));
    }

    let mut centered = DMatrix::<f64>::from_fn(active.len(), n_calls, |r, c| votes[(active[r], c)]);
    for mut col in centered.column_iter_mut() {
        let mean = col.mean();
        col.add_scalar_mut(-mean);
    }

    let svd = nalgebra::linalg::SVD::try_new(centered, true, false, f64::EPSILON, 0).ok_or_else(
        || Error::Decomposition {
            period: period.to_string(),
            message: "SVD did not converge".to_string(),
        },
    )?;
    let Some(u) = svd.u else {
        return Err(Error::Decomposition {
            period: period.to_string(),
            message: "SVD returned no left singular vectors".to_string(),
        });
    };
    let s = svd.singular_values;

    let mut order: Vec<usize> = (0..s.len()).collect();
    order.sort_by(|&a, &b| s[b].total_cmp(&s[a]));

    let mut scores = DMatrix::<f64>::zeros(n_parties, n_calls);
    for (r, &party) in active.iter().enumerate() {
        for (c, &src) in order.iter().enumerate() {
            let v = u[(r, src)];
            if !v.is_finite() {
                return Err(Error::Decomposition {
                    period: period.to_string(),
                    message: format!("non-finite score for party row {party}"),
                });
            }
            scores[(party, c)] = v;
        }
    }

    Ok(Projection {
        scores,
        singular_values: DVector::from_iterator(order.len(), order.iter().map(|&i| s[i])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_unanimous_parties_share_one_axis() {
        let votes = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);
        let p = project(&votes, &[10, 5], "t").unwrap();

        assert_eq!(p.scores.shape(), (2, 3));
        assert_eq!(p.singular_values.len(), 2);
        assert!(p.singular_values[0] > 1.0);
        assert!(p.singular_values[1].abs() < 1e-9);

        let a = p.scores[(0, 0)];
        let b = p.scores[(1, 0)];
        assert!((a + b).abs() < 1e-9, "a={a} b={b}");
        assert!((a.abs() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        // Padding beyond min(rows, cols).
        assert_eq!(p.scores[(0, 2)], 0.0);
        assert_eq!(p.scores[(1, 2)], 0.0);

        let ratio = p.explained_variance_ratio();
        assert!((ratio[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn trivial_parties_stay_at_zero_and_keep_their_rows() {
        // Row 1 has content but size zero; it must not leak into the projection.
        let votes = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 0.5, -1.0, //
                0.9, 0.9, 0.9, //
                -1.0, 0.2, 1.0, //
                0.3, -0.7, 0.1,
            ],
        );
        let sizes = [3, 0, 4, 2];
        let p = project(&votes, &sizes, "t").unwrap();
        assert!(p.scores.row(1).iter().all(|&v| v == 0.0));

        let restricted = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 0.5, -1.0, -1.0, 0.2, 1.0, 0.3, -0.7, 0.1],
        );
        let q = project(&restricted, &[3, 4, 2], "t").unwrap();
        for (full_row, restricted_row) in [(0, 0), (2, 1), (3, 2)] {
            for c in 0..3 {
                assert!((p.scores[(full_row, c)] - q.scores[(restricted_row, c)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn score_columns_are_orthonormal() {
        let votes = DMatrix::from_row_slice(
            3,
            4,
            &[
                1.0, 1.0, -1.0, 0.5, //
                -0.5, 1.0, 1.0, -1.0, //
                0.0, -1.0, 0.2, 1.0,
            ],
        );
        let p = project(&votes, &[1, 1, 1], "t").unwrap();
        let c0 = p.scores.column(0);
        let c1 = p.scores.column(1);
        assert!((c0.norm() - 1.0).abs() < 1e-9);
        assert!((c1.norm() - 1.0).abs() < 1e-9);
        assert!(c0.dot(&c1).abs() < 1e-9);
        assert!(p.singular_values[0] >= p.singular_values[1]);
    }

    #[test]
    fn no_columns_or_no_active_party_gives_zeros() {
        let p = project(&DMatrix::zeros(3, 0), &[1, 2, 3], "t").unwrap();
        assert_eq!(p.scores.shape(), (3, 0));

        let votes = DMatrix::from_element(2, 2, 1.0);
        let p = project(&votes, &[0, 0], "t").unwrap();
        assert!(p.scores.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn input_matrix_is_left_untouched() {
        let votes = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let before = votes.clone();
        project(&votes, &[1, 1], "t").unwrap();
        assert_eq!(votes, before);
    }
}
