use std::io::Write;

use depressionml::data::DATASET_FILE_NAME;
use depressionml::errors::{CsvError, DataError, SchemaError};
use depressionml::schema::{AGE, CGPA, DEGREE, SUICIDAL_THOUGHTS};
use depressionml::{
    CategoricalImputation, DataSource, Error, Record, RecordBuilder, Session, TrainConfig,
    recommend,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEADER: &str = "id,Gender,Age,City,Profession,Academic Pressure,Work Pressure,CGPA,\
Study Satisfaction,Job Satisfaction,Sleep Duration,Dietary Habits,Degree,\
Have you ever had suicidal thoughts ?,Work/Study Hours,Financial Stress,\
Family History of Mental Illness,Depression";

// Depression is driven by suicidal thoughts and academic pressure, with a
// little noise; a few cells are missing or unparseable.
fn generate_csv(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let genders = ["Male", "Female"];
    let degrees = ["B.Sc", "BCA", "B.Pharm", "M.Tech", "Class 12"];
    let sleep = ["'Less than 5 hours'", "'5-6 hours'", "'7-8 hours'", "'More than 8 hours'"];
    let diet = ["Healthy", "Moderate", "Unhealthy"];

    let mut csv = String::from(HEADER);
    csv.push('\n');
    for id in 0..rows {
        let suicidal = rng.gen_bool(0.5);
        let pressure = rng.gen_range(0..=5);
        let financial = rng.gen_range(1..=5);
        let base = if suicidal { 2.0 } else { 0.0 };
        let score = base + 0.8 * (pressure as f64 - 2.5) + rng.gen_range(-0.5..0.5);
        let label = u8::from(score > 1.0);

        let financial = if id % 37 == 0 { "?".to_string() } else { financial.to_string() };
        let diet = if id % 41 == 0 { "" } else { diet[rng.gen_range(0..diet.len())] };
        csv.push_str(&format!(
            "{},{},{},City{},Student,{},0,{:.2},{},0,{},{},{},{},{},{},{},{}\n",
            id,
            genders[rng.gen_range(0..2)],
            rng.gen_range(18..=34),
            id % 7,
            pressure,
            rng.gen_range(5.0..10.0),
            rng.gen_range(0..=5),
            sleep[rng.gen_range(0..sleep.len())],
            diet,
            degrees[rng.gen_range(0..degrees.len())],
            if suicidal { "Yes" } else { "No" },
            rng.gen_range(0..=12),
            financial,
            if rng.gen_bool(0.5) { "Yes" } else { "No" },
            label,
        ));
    }
    csv
}

fn session_with(config: TrainConfig) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = Session::new(config);
    session
        .load(DataSource::Bytes(generate_csv(400, 7).into_bytes()))
        .expect("Failed to load generated data");
    session
}

#[test]
fn test_train_evaluate_predict() {
    let mut session = session_with(TrainConfig::default());
    let evaluation = session.fit().expect("Training failed");

    assert_eq!(evaluation.train.confusion.total() + evaluation.test.confusion.total(), 400);
    assert!(evaluation.test.accuracy > 0.7, "test accuracy {}", evaluation.test.accuracy);
    assert!(evaluation.test.f1 > 0.7, "test F1 {}", evaluation.test.f1);

    let record = session.record_builder().unwrap().build().unwrap();
    let prediction = session.predict_one(&record).unwrap();
    assert!(prediction.label <= 1);
    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(recommend(prediction.label).sections.len(), 4);
}

#[test]
fn test_suicidal_thoughts_raise_probability() {
    let mut session = session_with(TrainConfig::default());
    session.fit().unwrap();

    let builder = session.record_builder().unwrap();
    let no = builder.clone().categorical(SUICIDAL_THOUGHTS, "No").build().unwrap();
    let yes = builder.categorical(SUICIDAL_THOUGHTS, "Yes").build().unwrap();

    let p_no = session.predict_one(&no).unwrap().probability;
    let p_yes = session.predict_one(&yes).unwrap().probability;
    assert!(p_yes >= p_no, "p(yes) = {} < p(no) = {}", p_yes, p_no);
}

#[test]
fn test_training_is_deterministic() {
    let mut first = session_with(TrainConfig::default());
    let mut second = session_with(TrainConfig::default());
    first.fit().unwrap();
    second.fit().unwrap();

    assert_eq!(first.split_indices(), second.split_indices());
    assert_eq!(first.model().unwrap(), second.model().unwrap());
    assert_eq!(first.evaluation().unwrap(), second.evaluation().unwrap());
}

#[test]
fn test_stratified_split_keeps_balance() {
    let mut session = session_with(TrainConfig::default());
    session.split().unwrap();
    let split = session.split_indices().unwrap().clone();
    let labels = session.dataset().unwrap().labels().clone();

    let positives = |idx: &[usize]| idx.iter().filter(|&&i| labels[i] == 1.0).count();
    let total_pos = positives(&split.train) + positives(&split.test);
    let expected = (total_pos as f64 * 0.2).round() as usize;
    assert_eq!(positives(&split.test), expected);
    assert_eq!(split.train.len() + split.test.len(), 400);
}

#[test]
fn test_most_frequent_imputation_trains() {
    let config = TrainConfig::default().with_imputation(CategoricalImputation::MostFrequent);
    let mut session = session_with(config);
    session.fit().unwrap();
    let fill = &session.model().unwrap().pipeline().categorical()[3].fill;
    assert_ne!(fill, "missing");
}

#[test]
fn test_unknown_category_is_accepted() {
    let mut session = session_with(TrainConfig::default());
    session.fit().unwrap();
    let record = session.record_builder().unwrap().categorical(DEGREE, "PhD").build().unwrap();
    let prediction = session.predict_one(&record).unwrap();
    assert!((0.0..=1.0).contains(&prediction.probability));
}

#[test]
fn test_predict_before_training() {
    let session = session_with(TrainConfig::default());
    let record = session.record_builder().unwrap().build().unwrap();
    assert!(matches!(session.predict_one(&record), Err(Error::ModelNotTrained)));
}

#[test]
fn test_predict_rejects_empty_record() {
    let mut session = session_with(TrainConfig::default());
    session.fit().unwrap();
    let result = session.predict_one(&Record::default());
    assert!(matches!(
        result,
        Err(Error::Schema(SchemaError::MissingField(ref field))) if field == AGE
    ));
}

#[test]
fn test_non_finite_input_is_rejected() {
    let mut session = session_with(TrainConfig::default());
    session.fit().unwrap();
    let result = session.record_builder().unwrap().parse(AGE, "NaN").build();
    assert!(matches!(result, Err(SchemaError::NonFinite { ref field, .. }) if field == AGE));

    let result = session.record_builder().unwrap().numeric(CGPA, f64::NEG_INFINITY).build();
    assert!(matches!(result, Err(SchemaError::NonFinite { ref field, .. }) if field == CGPA));
}

#[test]
fn test_load_from_path_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DATASET_FILE_NAME);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(generate_csv(50, 1).as_bytes()).unwrap();

    let mut session = Session::default();
    assert_eq!(session.load(DataSource::Path(path.clone())).unwrap().len(), 50);
    let found = session.load(DataSource::Search(vec![dir.path().join("nope"), dir.path().into()]));
    assert_eq!(found.unwrap().len(), 50);
}

#[test]
fn test_missing_required_column() {
    let csv = generate_csv(10, 3).replace("Financial Stress", "Money");
    let mut session = Session::default();
    let result = session.load(DataSource::Bytes(csv.into_bytes()));
    assert!(matches!(
        result,
        Err(Error::Data(DataError::Csv(CsvError::Schema(SchemaError::MissingColumn(ref c)))))
            if c == "Financial Stress"
    ));
}

#[test]
fn test_record_builder_rejects_unknown_field() {
    let result = RecordBuilder::new().numeric("Height", 180.0).build();
    assert_eq!(result, Err(SchemaError::UnknownField("Height".to_string())));
}
