//! QAP instance and cost evaluation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::matrix::Matrix;
use crate::error::LoadError;

/// A Quadratic Assignment Problem instance.
///
/// A solution is a permutation `p` where `p[i]` is the location assigned to
/// facility `i`. Both matrices are read-only once the instance is built.
#[derive(Debug, Clone)]
pub struct QapInstance {
    flow: Matrix,
    distance: Matrix,
}

impl QapInstance {
    /// Pairs a flow and a distance matrix.
    ///
    /// Fails with [`LoadError::DimensionMismatch`] if the two differ in size,
    /// and with [`LoadError::CostOverflow`] if `(n + 2)^2 * max_flow *
    /// max_distance` exceeds `i64::MAX`. That product bounds both the full
    /// cost and every partial sum of [`swap_delta`](Self::swap_delta).
    pub fn new(flow: Matrix, distance: Matrix) -> Result<Self, LoadError> {
        if flow.size() != distance.size() {
            return Err(LoadError::DimensionMismatch {
                flow: flow.size(),
                distance: distance.size(),
            });
        }
        let (max_flow, max_distance) = (flow.max_value(), distance.max_value());
        let span = flow.size() as i128 + 2;
        let fits = span
            .checked_mul(span)
            .and_then(|v| v.checked_mul(i128::from(max_flow)))
            .and_then(|v| v.checked_mul(i128::from(max_distance)))
            .is_some_and(|v| v <= i128::from(i64::MAX));
        if !fits {
            return Err(LoadError::CostOverflow {
                size: flow.size(),
                max_flow,
                max_distance,
            });
        }
        Ok(Self { flow, distance })
    }

    /// Number of facilities (and locations).
    #[inline]
    pub fn size(&self) -> usize {
        self.flow.size()
    }

    pub fn flow(&self) -> &Matrix {
        &self.flow
    }

    pub fn distance(&self) -> &Matrix {
        &self.distance
    }

    /// Total cost `sum_i sum_j flow[i][j] * distance[p[i]][p[j]]`.
    ///
    /// Sums over the full grid, diagonal included, so symmetric pairs count
    /// twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qap::qap::{Matrix, QapInstance};
    ///
    /// let flow = Matrix::from_rows(vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]]).unwrap();
    /// let dist = Matrix::from_rows(vec![vec![0, 1, 1], vec![1, 0, 2], vec![1, 2, 0]]).unwrap();
    /// let qap = QapInstance::new(flow, dist).unwrap();
    /// assert_eq!(qap.cost(&[0, 1, 2]), 18);
    /// ```
    pub fn cost(&self, perm: &[usize]) -> i64 {
        debug_assert_eq!(perm.len(), self.size());
        let mut total = 0;
        for (i, &pi) in perm.iter().enumerate() {
            let flow_row = self.flow.row(i);
            let dist_row = self.distance.row(pi);
            for (j, &pj) in perm.iter().enumerate() {
                total += flow_row[j] * dist_row[pj];
            }
        }
        total
    }

    /// Change in cost if positions `i` and `j` of `perm` were swapped.
    ///
    /// Runs in O(n) and holds for asymmetric matrices and non-zero
    /// diagonals, so `cost(swapped) == cost(perm) + swap_delta(perm, i, j)`.
    pub fn swap_delta(&self, perm: &[usize], i: usize, j: usize) -> i64 {
        if i == j {
            return 0;
        }
        let f = &self.flow;
        let d = &self.distance;
        let (pi, pj) = (perm[i], perm[j]);

        let mut delta = f.get(i, i) * (d.get(pj, pj) - d.get(pi, pi))
            + f.get(i, j) * (d.get(pj, pi) - d.get(pi, pj))
            + f.get(j, i) * (d.get(pi, pj) - d.get(pj, pi))
            + f.get(j, j) * (d.get(pi, pi) - d.get(pj, pj));

        for (k, &pk) in perm.iter().enumerate() {
            if k == i || k == j {
                continue;
            }
            delta += f.get(k, i) * (d.get(pk, pj) - d.get(pk, pi))
                + f.get(k, j) * (d.get(pk, pi) - d.get(pk, pj))
                + f.get(i, k) * (d.get(pj, pk) - d.get(pi, pk))
                + f.get(j, k) * (d.get(pi, pk) - d.get(pj, pk));
        }
        delta
    }

    /// A uniformly random assignment.
    pub fn random_permutation<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.size()).collect();
        perm.shuffle(rng);
        perm
    }

    /// Whether `perm` is a bijection on `0..size()`.
    pub fn is_permutation(&self, perm: &[usize]) -> bool {
        let n = self.size();
        if perm.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &p in perm {
            if p >= n || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> QapInstance {
        let flow =
            Matrix::from_rows(vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]]).unwrap();
        let dist =
            Matrix::from_rows(vec![vec![0, 1, 1], vec![1, 0, 2], vec![1, 2, 0]]).unwrap();
        QapInstance::new(flow, dist).unwrap()
    }

    fn asymmetric() -> QapInstance {
        let flow = Matrix::from_rows(vec![
            vec![3, 1, 0, 7],
            vec![2, 5, 4, 1],
            vec![9, 0, 1, 2],
            vec![1, 6, 8, 4],
        ])
        .unwrap();
        let dist = Matrix::from_rows(vec![
            vec![1, 5, 2, 0],
            vec![3, 2, 8, 1],
            vec![4, 4, 6, 2],
            vec![7, 1, 3, 9],
        ])
        .unwrap();
        QapInstance::new(flow, dist).unwrap()
    }

    #[test]
    fn test_cost_hand_computed() {
        assert_eq!(sample().cost(&[0, 1, 2]), 18);
    }

    #[test]
    fn test_cost_other_assignment() {
        // p = [1, 0, 2]: 2 * (1*1 + 2*2 + 3*1) = 16
        assert_eq!(sample().cost(&[1, 0, 2]), 16);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = QapInstance::new(Matrix::zeros(3), Matrix::zeros(4)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::DimensionMismatch {
                flow: 3,
                distance: 4
            }
        ));
    }

    fn uniform(n: usize, value: i64) -> Matrix {
        Matrix::from_rows(vec![vec![value; n]; n]).unwrap()
    }

    #[test]
    fn test_rejects_values_that_could_overflow() {
        let err = QapInstance::new(uniform(2, 4_000_000_000), uniform(2, 4_000_000_000))
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::CostOverflow {
                size: 2,
                max_flow: 4_000_000_000,
                ..
            }
        ));

        // (2 + 2)^2 * 2^30 * 2^30 = 2^64 is just past the limit
        let big = 1i64 << 30;
        assert!(QapInstance::new(uniform(2, big), uniform(2, big)).is_err());
    }

    #[test]
    fn test_accepts_largest_safe_values() {
        // (2 + 2)^2 * 2^29 * 2^29 = 2^62
        let big = 1i64 << 29;
        let qap = QapInstance::new(uniform(2, big), uniform(2, big)).unwrap();
        assert_eq!(qap.cost(&[1, 0]), 4 * big * big);
        assert_eq!(qap.swap_delta(&[1, 0], 0, 1), 0);
    }

    #[test]
    fn test_swap_delta_matches_full_cost() {
        let qap = asymmetric();
        let perm = vec![2, 0, 3, 1];
        let base = qap.cost(&perm);
        for i in 0..4 {
            for j in 0..4 {
                let mut swapped = perm.clone();
                swapped.swap(i, j);
                assert_eq!(
                    base + qap.swap_delta(&perm, i, j),
                    qap.cost(&swapped),
                    "delta mismatch for ({i}, {j})"
                );
            }
        }
    }

    #[test]
    fn test_random_permutation_is_bijection() {
        let qap = asymmetric();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let p = qap.random_permutation(&mut rng);
            assert!(qap.is_permutation(&p));
        }
    }

    #[test]
    fn test_is_permutation_rejects() {
        let qap = sample();
        assert!(!qap.is_permutation(&[0, 1]));
        assert!(!qap.is_permutation(&[0, 1, 1]));
        assert!(!qap.is_permutation(&[0, 1, 3]));
        assert!(qap.is_permutation(&[2, 0, 1]));
    }
}
