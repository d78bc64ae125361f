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

use libm::log;
use ndarray::Array1;

use crate::errors::LossError;

pub trait LossFunction {
    fn calculate(&self, predictions: &Array1<f64>, actuals: &Array1<f64>)
    -> Result<f64, LossError>;
}

/// Binary cross-entropy (log loss) on positive-class probabilities.
pub struct CrossEntropy;

const EPSILON: f64 = 1e-15;

impl CrossEntropy {
    /// Sample-weighted log loss, normalized by the number of samples.
    ///
    /// With balanced class weights this is the data term the classifier
    /// minimizes.
    pub fn weighted(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
        weights: &Array1<f64>,
    ) -> Result<f64, LossError> {
        validate(predictions, actuals)?;
        if weights.len() != actuals.len() {
            return Err(LossError::DimensionMismatch {
                expected: actuals.len(),
                actual: weights.len(),
            });
        }
        if weights.iter().any(|&w| !w.is_finite() || w < 0.0) {
            return Err(LossError::InvalidNumericValue);
        }

        let total = actuals
            .iter()
            .zip(predictions.iter())
            .zip(weights.iter())
            .map(|((&y, &p), &w)| w * sample_loss(y, p))
            .sum::<f64>();
        Ok(total / actuals.len() as f64)
    }
}

impl LossFunction for CrossEntropy {
    fn calculate(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        validate(predictions, actuals)?;
        let log_loss = actuals
            .iter()
            .zip(predictions.iter())
            .map(|(&y, &p)| sample_loss(y, p))
            .sum::<f64>()
            / actuals.len() as f64;
        Ok(log_loss)
    }
}

#[inline]
fn sample_loss(y: f64, p: f64) -> f64 {
    let p = p.clamp(EPSILON, 1.0 - EPSILON);
    -y * log(p) - (1.0 - y) * log(1.0 - p)
}

fn validate(predictions: &Array1<f64>, actuals: &Array1<f64>) -> Result<(), LossError> {
    if predictions.is_empty() || actuals.is_empty() {
        return Err(LossError::EmptyInput);
    }

    if predictions.len() != actuals.len() {
        return Err(LossError::DimensionMismatch {
            expected: predictions.len(),
            actual: actuals.len(),
        });
    }

    if predictions.iter().any(|&v| !v.is_finite()) || actuals.iter().any(|&v| !v.is_finite()) {
        return Err(LossError::InvalidNumericValue);
    }

    if predictions.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
        return Err(LossError::InvalidPredictionRange);
    }

    if actuals.iter().any(|&y| y != 0.0 && y != 1.0) {
        return Err(LossError::InvalidActualValue);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn test_cross_entropy_empty_input() {
        let loss = CrossEntropy;
        let predictions = Array1::zeros(0);
        let actuals = array![0.0];
        let result = loss.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::EmptyInput)));
    }

    #[test]
    fn test_cross_entropy_dimension_mismatch() {
        let loss = CrossEntropy;
        let predictions = array![0.1, 0.9];
        let actuals = array![0.0, 1.0, 0.0];
        let result = loss.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[test]
    fn test_cross_entropy_invalid_numeric_value() {
        let loss = CrossEntropy;
        let predictions = array![0.1, f64::INFINITY];
        let actuals = array![0.0, 1.0];
        let result = loss.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::InvalidNumericValue)));
    }

    #[test]
    fn test_cross_entropy_invalid_prediction_range() {
        let loss = CrossEntropy;
        let predictions = array![0.1, 1.1];
        let actuals = array![0.0, 1.0];
        let result = loss.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::InvalidPredictionRange)));
    }

    #[test]
    fn test_cross_entropy_invalid_actual_value() {
        let loss = CrossEntropy;
        let predictions = array![0.1, 0.9];
        let actuals = array![0.0, 2.0];
        let result = loss.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::InvalidActualValue)));
    }

    #[test]
    fn test_cross_entropy_valid_computation() {
        let loss = CrossEntropy;
        let predictions = array![0.5, 0.5];
        let actuals = array![0.0, 1.0];
        let log_loss = loss.calculate(&predictions, &actuals).unwrap();
        assert!((log_loss - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_cross_entropy_confident_mistake_is_finite() {
        let loss = CrossEntropy;
        let log_loss = loss.calculate(&array![1.0], &array![0.0]).unwrap();
        assert!(log_loss.is_finite());
        assert!(log_loss > 30.0);
    }

    #[test]
    fn test_weighted_cross_entropy() {
        let loss = CrossEntropy;
        let predictions = array![0.5, 0.5];
        let actuals = array![0.0, 1.0];
        let unit = loss.weighted(&predictions, &actuals, &array![1.0, 1.0]).unwrap();
        let doubled = loss.weighted(&predictions, &actuals, &array![2.0, 2.0]).unwrap();
        assert!((unit - std::f64::consts::LN_2).abs() < 1e-12);
        assert!((doubled - 2.0 * unit).abs() < 1e-12);

        let result = loss.weighted(&predictions, &actuals, &array![1.0]);
        assert!(matches!(result, Err(LossError::DimensionMismatch { expected: 2, actual: 1 })));
    }
}
