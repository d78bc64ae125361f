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

use crate::algorithms::{
    ClassWeight, DEFAULT_C, DEFAULT_LEARNING_RATE, DEFAULT_MAX_EPOCHS, DEFAULT_THRESHOLD,
    DEFAULT_TOLERANCE, LogisticRegression,
};
use crate::errors::Error;
use crate::preprocessing::{CategoricalImputation, Pipeline};

/// Hyperparameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub test_ratio: f64,
    pub seed: u64,
    pub c: f64,
    pub class_weight: ClassWeight,
    pub imputation: CategoricalImputation,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub tolerance: f64,
    pub threshold: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            test_ratio: 0.2,
            seed: 42,
            c: DEFAULT_C,
            class_weight: ClassWeight::Balanced,
            imputation: CategoricalImputation::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
            max_epochs: DEFAULT_MAX_EPOCHS,
            tolerance: DEFAULT_TOLERANCE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        TrainConfig::default()
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_class_weight(mut self, class_weight: ClassWeight) -> Self {
        self.class_weight = class_weight;
        self
    }

    pub fn with_imputation(mut self, imputation: CategoricalImputation) -> Self {
        self.imputation = imputation;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(Error::Config(format!(
                "test ratio must lie strictly between 0 and 1, got {}",
                self.test_ratio
            )));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(Error::Config(format!("C must be positive, got {}", self.c)));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_epochs == 0 {
            return Err(Error::Config("max epochs must be at least 1".to_string()));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::Config(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::Config(format!(
                "threshold must lie in [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new().imputation(self.imputation.clone())
    }

    pub fn classifier(&self) -> LogisticRegression {
        LogisticRegression::new()
            .c(self.c)
            .class_weight(self.class_weight)
            .learning_rate(self.learning_rate)
            .max_epochs(self.max_epochs)
            .tolerance(self.tolerance)
            .threshold(self.threshold)
            .build()
    }
}
