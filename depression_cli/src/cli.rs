use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use depressionml::{CategoricalImputation, DataSource, TrainConfig};

/// Command-line interface for the student depression classifier.
#[derive(Parser, Debug)]
#[command(
    name = "depression",
    version,
    about = "Explore the student depression dataset, train a classifier and score a student"
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe every column of the dataset and the label balance.
    Info(InfoArgs),
    /// Summarize a single column, or correlate several numeric ones.
    Explore(ExploreArgs),
    /// Split the data, train the model and report train/test scores.
    Train(TrainArgs),
    /// Train, then predict for one student and print recommendations.
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Read the dataset from this CSV file instead of searching for it.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Search these directories for student_depression_dataset.csv.
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "data")]
    pub search: Vec<PathBuf>,
}

impl SourceArgs {
    pub fn to_source(&self) -> DataSource {
        match &self.data {
            Some(path) => DataSource::Path(path.clone()),
            None if !self.search.is_empty() => DataSource::Search(self.search.clone()),
            None => DataSource::Discover,
        }
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Number of leading rows to preview.
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub head: usize,
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Column to summarize.
    #[arg(
        short,
        long,
        value_name = "NAME",
        required_unless_present = "columns",
        conflicts_with = "columns"
    )]
    pub column: Option<String>,

    /// Also report the Pearson correlation with this numeric column.
    #[arg(long, value_name = "NAME", requires = "column")]
    pub against: Option<String>,

    /// Print the correlation matrix of these numeric columns.
    #[arg(long, value_name = "A,B,...", value_delimiter = ',', num_args = 1..)]
    pub columns: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImputationArg {
    Constant,
    MostFrequent,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Fraction of rows held out for testing.
    #[arg(long, default_value_t = 0.2)]
    pub test_ratio: f64,

    /// Seed of the stratified split.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Inverse regularization strength.
    #[arg(long, default_value_t = 0.03)]
    pub c: f64,

    /// How missing categorical values are filled.
    #[arg(long, value_enum, default_value = "constant")]
    pub imputation: ImputationArg,

    /// Print this many of the largest model coefficients.
    #[arg(long, default_value_t = 0)]
    pub top: usize,
}

impl TrainArgs {
    pub fn to_config(&self) -> TrainConfig {
        let imputation = match self.imputation {
            ImputationArg::Constant => CategoricalImputation::default(),
            ImputationArg::MostFrequent => CategoricalImputation::MostFrequent,
        };
        TrainConfig::new()
            .with_test_ratio(self.test_ratio)
            .with_seed(self.seed)
            .with_c(self.c)
            .with_imputation(imputation)
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    #[arg(long)]
    pub age: Option<f64>,

    #[arg(long)]
    pub cgpa: Option<f64>,

    /// Academic pressure, 0 to 5.
    #[arg(long)]
    pub academic_pressure: Option<f64>,

    /// Study satisfaction, 0 to 5.
    #[arg(long)]
    pub study_satisfaction: Option<f64>,

    /// Job satisfaction, 0 to 5 (0 when not working).
    #[arg(long)]
    pub job_satisfaction: Option<f64>,

    /// Work/study hours per day.
    #[arg(long)]
    pub work_study_hours: Option<f64>,

    /// Work pressure, 0 to 5.
    #[arg(long)]
    pub work_pressure: Option<f64>,

    /// Financial stress, 0 to 5.
    #[arg(long)]
    pub financial_stress: Option<f64>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long)]
    pub degree: Option<String>,

    #[arg(long)]
    pub profession: Option<String>,

    #[arg(long)]
    pub dietary_habits: Option<String>,

    /// Sleep duration category as written in the dataset, e.g. "'5-6 hours'".
    #[arg(long)]
    pub sleep_duration: Option<String>,

    /// Ever had suicidal thoughts (Yes/No).
    #[arg(long)]
    pub suicidal_thoughts: Option<String>,

    /// Family history of mental illness (Yes/No).
    #[arg(long)]
    pub family_history: Option<String>,

    /// Set any schema field by its column name, e.g. --set "Age=21".
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))
}
