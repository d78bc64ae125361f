// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use log::{debug, info, warn};
use ndarray::{Array1, Array2};

use crate::errors::{LossError, ModelError, OptimizerError};
use crate::losses::{CrossEntropy, LossFunction};
use crate::optimizers::{LogisticGradientDescent, Optimizer, sigmoid};

pub const DEFAULT_C: f64 = 0.03;
pub const DEFAULT_LEARNING_RATE: f64 = 0.25;
pub const DEFAULT_MAX_EPOCHS: usize = 5000;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Per-sample weighting of the loss by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassWeight {
    /// Every sample counts once.
    Uniform,
    /// `n_samples / (2 * n_class)`, so both classes carry equal total weight.
    #[default]
    Balanced,
}

impl ClassWeight {
    pub fn sample_weights(self, y: &Array1<f64>) -> Array1<f64> {
        match self {
            ClassWeight::Uniform => Array1::ones(y.len()),
            ClassWeight::Balanced => {
                let n = y.len() as f64;
                let positives = y.iter().filter(|&&v| v == 1.0).count() as f64;
                let negatives = n - positives;
                let w_pos = if positives > 0.0 { n / (2.0 * positives) } else { 0.0 };
                let w_neg = if negatives > 0.0 { n / (2.0 * negatives) } else { 0.0 };
                y.mapv(|v| if v == 1.0 { w_pos } else { w_neg })
            }
        }
    }
}

pub struct LogisticRegressionBuilder {
    c: f64,
    class_weight: ClassWeight,
    learning_rate: f64,
    max_epochs: usize,
    tolerance: f64,
    threshold: f64,
}

impl LogisticRegressionBuilder {
    /// Inverse regularization strength; smaller values regularize more.
    pub fn c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn class_weight(mut self, class_weight: ClassWeight) -> Self {
        self.class_weight = class_weight;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Training stops once every gradient component is below this value.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn build(self) -> LogisticRegression {
        LogisticRegression {
            c: self.c,
            class_weight: self.class_weight,
            learning_rate: self.learning_rate,
            max_epochs: self.max_epochs,
            tolerance: self.tolerance,
            threshold: self.threshold,
        }
    }
}

/// L2-regularized, class-weighted binary logistic regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    c: f64,
    class_weight: ClassWeight,
    learning_rate: f64,
    max_epochs: usize,
    tolerance: f64,
    threshold: f64,
}

impl LogisticRegression {
    pub fn new() -> LogisticRegressionBuilder {
        LogisticRegressionBuilder {
            c: DEFAULT_C,
            class_weight: ClassWeight::Balanced,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_epochs: DEFAULT_MAX_EPOCHS,
            tolerance: DEFAULT_TOLERANCE,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ModelError::InvalidHyperparameter(format!("C must be > 0, got {}", self.c)));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ModelError::InvalidHyperparameter(format!(
                "learning rate must be > 0, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::InvalidHyperparameter(format!(
                "threshold must lie in [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Fits the model by full-batch gradient descent starting from zero
    /// weights, so the same data always yields the same coefficients.
    pub fn fit(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<FittedLogisticRegression, ModelError> {
        self.validate()?;
        if x.is_empty() || y.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        if x.shape()[0] != y.len() {
            return Err(ModelError::DimensionMismatch { expected: x.shape()[0], actual: y.len() });
        }
        if let Some(&bad) = y.iter().find(|&&v| v != 0.0 && v != 1.0) {
            return Err(ModelError::InvalidLabel(bad));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Optimizer(OptimizerError::InvalidNumericValue));
        }
        if y.iter().all(|&v| v == y[0]) {
            return Err(ModelError::SingleClass(y[0]));
        }

        let n = x.shape()[0] as f64;
        let sample_weights = self.class_weight.sample_weights(y);
        let l2 = 1.0 / (self.c * n);
        let optimizer = LogisticGradientDescent::new(l2);
        let step = self.learning_rate.min(1.0 / lipschitz_bound(x, &sample_weights, l2));
        debug!("Gradient descent: l2 {:.3e}, step {:.4}", l2, step);

        let mut weights = Array1::zeros(x.shape()[1]);
        let mut bias = 0.0;
        let mut epochs = 0;
        let mut max_grad = f64::INFINITY;
        for epoch in 1..=self.max_epochs {
            let (grad_weights, grad_bias) =
                optimizer.compute_gradients(x, y, &sample_weights, &weights, bias)?;

            weights.scaled_add(-step, &grad_weights);
            bias -= grad_bias * step;
            epochs = epoch;

            max_grad = grad_weights.iter().fold(grad_bias.abs(), |m, g| m.max(g.abs()));
            if max_grad < self.tolerance {
                debug!("Converged after {} epochs (max gradient {:.3e})", epoch, max_grad);
                break;
            }
        }
        if max_grad >= self.tolerance {
            warn!(
                "Stopped after {} epochs without converging (max gradient {:.3e}, tolerance {:.1e})",
                epochs, max_grad, self.tolerance
            );
        }

        let model = FittedLogisticRegression { weights, bias, threshold: self.threshold };
        let loss = CrossEntropy.weighted(&model.predict_proba(x)?, y, &sample_weights)?;
        info!("Logistic regression trained: {} epochs, weighted log loss {:.6}", epochs, loss);

        Ok(model)
    }
}

// Upper bound on the curvature of the objective (the bias acts as a constant
// feature of value 1). Steps no longer than its inverse cannot diverge.
fn lipschitz_bound(x: &Array2<f64>, sample_weights: &Array1<f64>, l2: f64) -> f64 {
    let n = x.shape()[0] as f64;
    let data = x
        .rows()
        .into_iter()
        .zip(sample_weights.iter())
        .map(|(row, &s)| s * (row.dot(&row) + 1.0))
        .sum::<f64>();
    0.25 * data / n + l2
}

/// Coefficients of a trained [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogisticRegression {
    weights: Array1<f64>,
    bias: f64,
    threshold: f64,
}

impl FittedLogisticRegression {
    pub fn from_parts(weights: Array1<f64>, bias: f64, threshold: f64) -> Self {
        FittedLogisticRegression { weights, bias, threshold }
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Positive-class probability per row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if x.shape()[1] != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: x.shape()[1],
            });
        }
        Ok((x.dot(&self.weights) + self.bias).mapv(sigmoid))
    }

    /// Class labels (`0.0` or `1.0`): 1 iff the probability reaches the threshold.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        Ok(self.predict_proba(x)?.mapv(|p| if p >= self.threshold { 1.0 } else { 0.0 }))
    }

    pub fn calculate_loss(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        CrossEntropy.calculate(predictions, actuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    fn separable() -> (Array2<f64>, Array1<f64>) {
        let x = array![[-2.0], [-1.5], [-1.0], [-0.5], [0.5], [1.0], [1.5], [2.0]];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_balanced_sample_weights() {
        let y = array![1.0, 0.0, 0.0, 0.0];
        let w = ClassWeight::Balanced.sample_weights(&y);
        assert_eq!(w, array![2.0, 4.0 / 6.0, 4.0 / 6.0, 4.0 / 6.0]);
        // both classes carry the same total weight
        assert!((w[0] - w.slice(ndarray::s![1..]).sum()).abs() < 1e-12);
        assert_eq!(ClassWeight::Uniform.sample_weights(&y), Array1::ones(4));
    }

    #[test]
    fn test_logistic_regression_fit_predict() {
        let (x, y) = separable();
        let model = LogisticRegression::new().c(10.0).build().fit(&x, &y).unwrap();

        let new_data = array![[-3.0], [3.0]];
        let proba = model.predict_proba(&new_data).unwrap();
        assert!(proba[0] < 0.5 && proba[1] > 0.5);
        assert_eq!(model.predict(&new_data).unwrap(), array![0.0, 1.0]);
        assert!(model.weights()[0] > 0.0);
    }

    #[test]
    fn test_predict_matches_threshold() {
        let (x, y) = separable();
        let model = LogisticRegression::new().build().fit(&x, &y).unwrap();
        let grid = Array2::from_shape_fn((41, 1), |(i, _)| -4.0 + 0.2 * i as f64);
        let proba = model.predict_proba(&grid).unwrap();
        let labels = model.predict(&grid).unwrap();
        for (&p, &label) in proba.iter().zip(labels.iter()) {
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(label == 1.0, p >= 0.5);
        }
    }

    #[test]
    fn test_stronger_regularization_shrinks_weights() {
        let (x, y) = separable();
        let weak = LogisticRegression::new().c(10.0).build().fit(&x, &y).unwrap();
        let strong = LogisticRegression::new().c(0.01).build().fit(&x, &y).unwrap();
        assert!(strong.weights()[0].abs() < weak.weights()[0].abs());
    }

    #[test]
    fn test_fit_stops_at_epoch_budget() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (x, y) = separable();
        let capped = LogisticRegression::new().max_epochs(2).tolerance(0.0).build();
        let model = capped.fit(&x, &y).unwrap();
        let full = LogisticRegression::new().build().fit(&x, &y).unwrap();
        assert!(model.weights()[0] > 0.0);
        assert!(model.weights()[0] < full.weights()[0]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();
        let model = LogisticRegression::new().build();
        assert_eq!(model.fit(&x, &y).unwrap(), model.fit(&x, &y).unwrap());
    }

    #[test]
    fn test_class_balancing_moves_decision_towards_minority() {
        let x = array![[0.0], [0.2], [0.4], [0.6], [0.8], [1.0], [1.2], [1.4], [1.6], [1.8]];
        let y = array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0];
        let uniform = LogisticRegression::new()
            .class_weight(ClassWeight::Uniform)
            .build()
            .fit(&x, &y)
            .unwrap();
        let balanced = LogisticRegression::new().build().fit(&x, &y).unwrap();
        let p_uniform = uniform.predict_proba(&array![[1.4]]).unwrap()[0];
        let p_balanced = balanced.predict_proba(&array![[1.4]]).unwrap()[0];
        assert!(p_balanced > p_uniform);
    }

    #[test]
    fn test_fit_empty_input() {
        let x: Array2<f64> = Array2::zeros((0, 2));
        let y: Array1<f64> = Array1::zeros(0);
        let result = LogisticRegression::new().build().fit(&x, &y);
        assert_eq!(result, Err(ModelError::EmptyInput));
    }

    #[test]
    fn test_fit_dimension_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![1.0, 0.0, 1.0];
        let result = LogisticRegression::new().build().fit(&x, &y);
        assert_eq!(result, Err(ModelError::DimensionMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn test_fit_invalid_label() {
        let x = array![[1.0], [2.0]];
        let y = array![0.0, 2.0];
        let result = LogisticRegression::new().build().fit(&x, &y);
        assert_eq!(result, Err(ModelError::InvalidLabel(2.0)));
    }

    #[test]
    fn test_fit_single_class() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 1.0];
        let result = LogisticRegression::new().build().fit(&x, &y);
        assert_eq!(result, Err(ModelError::SingleClass(1.0)));
    }

    #[test]
    fn test_fit_invalid_c() {
        let (x, y) = separable();
        let result = LogisticRegression::new().c(0.0).build().fit(&x, &y);
        assert!(matches!(result, Err(ModelError::InvalidHyperparameter(_))));
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let model = FittedLogisticRegression::from_parts(array![1.0, 2.0], 0.0, 0.5);
        let result = model.predict(&array![[1.0, 2.0, 3.0]]);
        assert_eq!(result, Err(ModelError::DimensionMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn test_calculate_loss() {
        let model = FittedLogisticRegression::from_parts(array![0.0], 0.0, 0.5);
        let loss = model.calculate_loss(&array![0.1, 0.2, 0.7, 0.9], &array![0.0, 0.0, 1.0, 1.0]);
        assert!(loss.unwrap() > 0.0);
    }
}
