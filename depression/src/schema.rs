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

//! The fixed feature schema shared by training and inference.
//!
//! Every path that reads feature values (CSV loading, the preprocessing
//! pipeline, single-record inference) goes through [`FeatureSchema`], so the
//! column order and membership are identical on both sides.

use crate::errors::SchemaError;

pub const LABEL: &str = "Depression";
pub const ID: &str = "id";
pub const CITY: &str = "City";

pub const AGE: &str = "Age";
pub const CGPA: &str = "CGPA";
pub const ACADEMIC_PRESSURE: &str = "Academic Pressure";
pub const STUDY_SATISFACTION: &str = "Study Satisfaction";
pub const JOB_SATISFACTION: &str = "Job Satisfaction";
pub const WORK_STUDY_HOURS: &str = "Work/Study Hours";
pub const WORK_PRESSURE: &str = "Work Pressure";
pub const FINANCIAL_STRESS: &str = "Financial Stress";

pub const GENDER: &str = "Gender";
pub const DEGREE: &str = "Degree";
pub const PROFESSION: &str = "Profession";
pub const DIETARY_HABITS: &str = "Dietary Habits";
pub const SLEEP_DURATION: &str = "Sleep Duration";
pub const SUICIDAL_THOUGHTS: &str = "Have you ever had suicidal thoughts ?";
pub const FAMILY_HISTORY: &str = "Family History of Mental Illness";

pub const NUMERIC_FEATURES: [&str; 8] = [
    AGE,
    CGPA,
    ACADEMIC_PRESSURE,
    STUDY_SATISFACTION,
    JOB_SATISFACTION,
    WORK_STUDY_HOURS,
    WORK_PRESSURE,
    FINANCIAL_STRESS,
];

pub const CATEGORICAL_FEATURES: [&str; 7] = [
    GENDER,
    DEGREE,
    PROFESSION,
    DIETARY_HABITS,
    SLEEP_DURATION,
    SUICIDAL_THOUGHTS,
    FAMILY_HISTORY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

impl FeatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Numeric => "numeric",
            FeatureKind::Categorical => "categorical",
        }
    }
}

/// Where a feature lives inside a [`crate::data::Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSlot {
    pub kind: FeatureKind,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureSchema;

impl FeatureSchema {
    pub fn numeric(&self) -> &'static [&'static str] {
        &NUMERIC_FEATURES
    }

    pub fn categorical(&self) -> &'static [&'static str] {
        &CATEGORICAL_FEATURES
    }

    /// All modeling features: numeric first, then categorical.
    pub fn features(&self) -> impl Iterator<Item = (&'static str, FeatureKind)> {
        NUMERIC_FEATURES
            .iter()
            .map(|&name| (name, FeatureKind::Numeric))
            .chain(CATEGORICAL_FEATURES.iter().map(|&name| (name, FeatureKind::Categorical)))
    }

    /// Columns a dataset must provide: every feature plus the label.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> {
        self.features().map(|(name, _)| name).chain(std::iter::once(LABEL))
    }

    pub fn slot(&self, name: &str) -> Result<FeatureSlot, SchemaError> {
        if let Some(index) = NUMERIC_FEATURES.iter().position(|&n| n == name) {
            return Ok(FeatureSlot { kind: FeatureKind::Numeric, index });
        }
        if let Some(index) = CATEGORICAL_FEATURES.iter().position(|&n| n == name) {
            return Ok(FeatureSlot { kind: FeatureKind::Categorical, index });
        }
        Err(SchemaError::UnknownField(name.to_string()))
    }

    pub fn kind(&self, name: &str) -> Option<FeatureKind> {
        self.slot(name).ok().map(|slot| slot.kind)
    }

    /// Resolves the position of every required column in a CSV header.
    pub fn locate(&self, headers: &[String]) -> Result<ColumnIndex, SchemaError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };

        let numeric = NUMERIC_FEATURES.iter().map(|&n| find(n)).collect::<Result<Vec<_>, _>>()?;
        let categorical =
            CATEGORICAL_FEATURES.iter().map(|&n| find(n)).collect::<Result<Vec<_>, _>>()?;

        Ok(ColumnIndex { numeric, categorical, label: find(LABEL)? })
    }
}

/// Header positions of the schema columns in one particular CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub numeric: Vec<usize>,
    pub categorical: Vec<usize>,
    pub label: usize,
}

/// Short description of a source column, shown in the dataset information table.
pub fn explanation(column: &str) -> Option<&'static str> {
    let text = match column {
        ID => "Unique identifier for each student.",
        GENDER => "Student's gender (Male/Female/Other).",
        AGE => "Age of the student in years.",
        CITY => "City where the student lives.",
        PROFESSION => "Student's field of study or occupation.",
        ACADEMIC_PRESSURE => "Self-reported academic workload/pressure (scale-based).",
        WORK_PRESSURE => "Workload pressure if employed alongside studies (scale-based).",
        CGPA => "Cumulative Grade Point Average, indicator of academic performance.",
        STUDY_SATISFACTION => "How satisfied the student is with their studies (scale-based).",
        JOB_SATISFACTION => "Satisfaction level with job (if employed).",
        SLEEP_DURATION => "Average sleep hours per day.",
        DIETARY_HABITS => "Type of diet (Healthy/Unhealthy/Moderate).",
        DEGREE => "Level of education (Bachelor's, Master's, etc.).",
        SUICIDAL_THOUGHTS => "History of suicidal thoughts (Yes/No).",
        WORK_STUDY_HOURS => "Average hours spent on work/study daily.",
        FINANCIAL_STRESS => "Level of financial stress (scale-based).",
        FAMILY_HISTORY => "Whether there is a family history of mental illness (Yes/No).",
        LABEL => "Target variable (1 = Depressed, 0 = Not Depressed).",
        _ => return None,
    };
    Some(text)
}
