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

//! Student depression classification.
//!
//! Loads the student survey CSV, explores it, and trains an L2-regularized,
//! class-balanced logistic regression behind a mean/standardize numeric and
//! impute/one-hot categorical preprocessing pipeline. A trained model scores a
//! single student record and picks a recommendation bundle for the result.
//!
//! ```no_run
//! use depressionml::{DataSource, Session, TrainConfig, recommend};
//!
//! # fn main() -> depressionml::Result<()> {
//! let mut session = Session::new(TrainConfig::default());
//! session.load(DataSource::Discover)?;
//! let evaluation = session.fit()?;
//! println!("test F1: {:.2}", evaluation.test.f1);
//!
//! let record = session.record_builder()?.numeric("Age", 22.0).build()?;
//! let prediction = session.predict_one(&record)?;
//! println!("{}", recommend(prediction.label));
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod config;
pub mod data;
pub mod errors;
pub mod inference;
pub mod losses;
pub mod metrics;
pub mod optimizers;
pub mod preprocessing;
pub mod recommendations;
pub mod scalers;
pub mod schema;
pub mod session;

pub use algorithms::{ClassWeight, FittedLogisticRegression, LogisticRegression};
pub use config::TrainConfig;
pub use data::{DataSource, Dataset, Record, Split, load};
pub use errors::{Error, Result};
pub use inference::{Prediction, RecordBuilder, TrainedModel};
pub use metrics::{ConfusionMatrix, Metrics, evaluate};
pub use preprocessing::{CategoricalImputation, FittedPipeline, Pipeline};
pub use recommendations::{Bundle, recommend};
pub use schema::{FeatureKind, FeatureSchema};
pub use session::{Evaluation, Session};
