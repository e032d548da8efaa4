use common::FeatureMatrix;
use nalgebra::{Dim, Matrix};

/// Deterministic, stateless expansion of a feature matrix into all monomials
/// of total degree up to `degree`.
///
/// For two input features `[a, b]` at degree 2 with the bias column enabled
/// the output is `[1, a, b, a², ab, b²]`: bias first, then the degree-1 terms
/// in input order, then each higher degree in graded lexicographic order.
///
/// The output width grows combinatorially in the input width and the degree;
/// check [`Self::output_width`] before expanding wide matrices.
#[derive(Debug, Clone)]
pub struct PolynomialExpander {
    degree: usize,
    interaction_only: bool,
    include_bias: bool,
}

impl PolynomialExpander {
    /// Create a new expander
    ///
    /// # Arguments:
    /// degree: The maximum total degree of the emitted monomials
    /// interaction_only: When true, only products of distinct features are
    /// emitted, never a feature raised to a power of 2 or more
    /// include_bias: When true, a constant column of ones is emitted first
    pub fn new(degree: usize, interaction_only: bool, include_bias: bool) -> Self {
        Self {
            degree,
            interaction_only,
            include_bias,
        }
    }

    /// The number of output columns for `num_features` input columns
    pub fn output_width(&self, num_features: usize) -> usize {
        let mut width = usize::from(self.include_bias);
        for degree in 1..=self.degree {
            width += if self.interaction_only {
                binomial(num_features, degree)
            } else {
                binomial(num_features + degree - 1, degree)
            };
        }
        width
    }

    /// Expand `x` into its monomial columns
    pub fn expand(&self, x: &FeatureMatrix) -> FeatureMatrix {
        let monomials = self.monomials(x.ncols());
        let offset = usize::from(self.include_bias);
        debug_assert_eq!(offset + monomials.len(), self.output_width(x.ncols()));

        // the bias column, when present, is already all ones
        let mut out: FeatureMatrix = Matrix::from_element_generic(
            Dim::from_usize(x.nrows()),
            Dim::from_usize(offset + monomials.len()),
            1.0,
        );
        for (c, monomial) in monomials.iter().enumerate() {
            for i in 0..x.nrows() {
                out[(i, offset + c)] = monomial.iter().map(|&j| x[(i, j)]).product();
            }
        }

        out
    }

    /// Column-index multisets for every monomial of degree 1..=degree,
    /// graded lexicographic within each degree
    fn monomials(&self, num_features: usize) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        for degree in 1..=self.degree {
            let mut prefix = Vec::with_capacity(degree);
            self.push_monomials(&mut out, &mut prefix, 0, degree, num_features);
        }
        out
    }

    fn push_monomials(
        &self,
        out: &mut Vec<Vec<usize>>,
        prefix: &mut Vec<usize>,
        start: usize,
        remaining: usize,
        num_features: usize,
    ) {
        if remaining == 0 {
            out.push(prefix.clone());
            return;
        }
        for j in start..num_features {
            prefix.push(j);
            let next = if self.interaction_only { j + 1 } else { j };
            self.push_monomials(out, prefix, next, remaining - 1, num_features);
            prefix.pop();
        }
    }
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        acc = acc * (n - i) / (i + 1);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<f64>) -> FeatureMatrix {
        Matrix::from_vec_generic(Dim::from_usize(1), Dim::from_usize(values.len()), values)
    }

    #[test]
    fn degree_two_with_bias() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let expander = PolynomialExpander::new(2, false, true);
        let x = row(vec![2.0, 3.0]);
        let expanded = expander.expand(&x);

        // [1, a, b, a², ab, b²]
        assert_eq!(
            expanded.row(0).iter().cloned().collect::<Vec<f64>>(),
            vec![1.0, 2.0, 3.0, 4.0, 6.0, 9.0]
        );
    }

    #[test]
    fn interaction_only_has_no_squares() {
        let expander = PolynomialExpander::new(2, true, false);
        let x = row(vec![2.0, 3.0, 5.0]);
        let expanded = expander.expand(&x);

        // [a, b, c, ab, ac, bc] and nothing squared
        assert_eq!(
            expanded.row(0).iter().cloned().collect::<Vec<f64>>(),
            vec![2.0, 3.0, 5.0, 6.0, 10.0, 15.0]
        );
        for v in expanded.row(0).iter() {
            assert!(![4.0, 9.0, 25.0].contains(v), "squared column leaked: {}", v);
        }
    }

    #[test]
    fn output_width_matches_expansion() {
        let x = row(vec![1.0, 2.0, 3.0, 4.0]);
        for degree in 0..4 {
            for interaction_only in [false, true] {
                for include_bias in [false, true] {
                    let expander = PolynomialExpander::new(degree, interaction_only, include_bias);
                    assert_eq!(
                        expander.expand(&x).ncols(),
                        expander.output_width(x.ncols()),
                        "degree {} interaction_only {} include_bias {}",
                        degree,
                        interaction_only,
                        include_bias
                    );
                }
            }
        }
    }

    #[test]
    fn degree_zero_is_bias_only() {
        let expander = PolynomialExpander::new(0, false, true);
        let x = row(vec![7.0, 8.0]);
        let expanded = expander.expand(&x);

        assert_eq!(expanded.ncols(), 1);
        assert_eq!(expanded[(0, 0)], 1.0);
    }

    #[test]
    fn known_widths() {
        // C(d + degree, degree) columns with bias, full mode
        assert_eq!(PolynomialExpander::new(2, false, true).output_width(2), 6);
        assert_eq!(PolynomialExpander::new(3, false, true).output_width(3), 20);
        // 1 + d + C(d, 2) with bias, interaction-only
        assert_eq!(PolynomialExpander::new(2, true, true).output_width(3), 7);
    }
}
