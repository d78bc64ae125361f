mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use depressionml::schema::{
    ACADEMIC_PRESSURE, AGE, CGPA, DEGREE, DIETARY_HABITS, FAMILY_HISTORY, FINANCIAL_STRESS,
    GENDER, JOB_SATISFACTION, PROFESSION, SLEEP_DURATION, STUDY_SATISFACTION, SUICIDAL_THOUGHTS,
    WORK_PRESSURE, WORK_STUDY_HOURS,
};
use depressionml::{Evaluation, FeatureKind, Session, TrainConfig, recommend};

use cli::{Cli, Commands, ExploreArgs, InfoArgs, PredictArgs, TrainArgs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(TrainConfig::default());
    session.load(cli.source.to_source()).context("Failed to load the dataset")?;

    match cli.command {
        Commands::Info(args) => handle_info(&session, &args),
        Commands::Explore(args) => handle_explore(&session, &args),
        Commands::Train(args) => handle_train(&mut session, &args).map(|_| ()),
        Commands::Predict(args) => handle_predict(&mut session, &args),
    }
}

fn handle_info(session: &Session, args: &InfoArgs) -> Result<()> {
    let dataset = session.dataset()?;
    println!("--> Dataset: {} rows, {} columns\n", dataset.len(), dataset.headers().len());
    if args.head > 0 {
        println!("{}", dataset.headers().join(" | "));
        for row in dataset.head(args.head) {
            println!("{}", row.join(" | "));
        }
        println!();
    }
    println!(
        "{:<40} {:<12} {:>8}  {:>10} {:>10} {:>10}",
        "column", "kind", "non-null", "mean", "min", "max"
    );
    for info in dataset.column_info() {
        let stats = match info.stats {
            Some((mean, min, max)) => format!("{:>10.3} {:>10.3} {:>10.3}", mean, min, max),
            None => format!("{:>10} {:>10} {:>10}", "-", "-", "-"),
        };
        println!("{:<40} {:<12} {:>8}  {}", info.name, info.kind.as_str(), info.non_null, stats);
        if let Some(explanation) = info.explanation {
            println!("    {}", explanation);
        }
    }

    let (negative, positive) = dataset.label_balance();
    println!("\n--> Label balance\nnot depressed: {}\ndepressed:     {}", negative, positive);
    Ok(())
}

fn handle_explore(session: &Session, args: &ExploreArgs) -> Result<()> {
    let dataset = session.dataset()?;
    let Some(column) = args.column.as_deref() else {
        return print_correlation_matrix(session, &args.columns);
    };

    match dataset.column_kind(column)? {
        FeatureKind::Numeric => {
            let d = dataset.describe(column)?;
            println!("--> {}", column);
            println!("count  {}", d.count);
            println!("mean   {:.4}", d.mean);
            println!("std    {:.4}", d.std);
            println!("min    {:.4}", d.min);
            println!("25%    {:.4}", d.q25);
            println!("50%    {:.4}", d.median);
            println!("75%    {:.4}", d.q75);
            println!("max    {:.4}", d.max);
        }
        FeatureKind::Categorical => {
            println!("--> {} value counts", column);
            for (value, count) in dataset.value_counts(column)? {
                println!("{:<40} {}", value, count);
            }
        }
    }

    if let Some(other) = &args.against {
        match dataset.correlation(column, other)? {
            Some(r) => println!("\ncorrelation with {}: {:.4}", other, r),
            None => println!("\ncorrelation with {}: undefined", other),
        }
    }
    Ok(())
}

fn print_correlation_matrix(session: &Session, columns: &[String]) -> Result<()> {
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    let matrix = session.dataset()?.correlation_matrix(&columns)?;

    println!("--> Correlation matrix");
    for (i, name) in columns.iter().enumerate() {
        println!("[{}] {}", i, name);
    }
    print!("\n{:>4}", "");
    for i in 0..columns.len() {
        print!(" {:>8}", format!("[{}]", i));
    }
    println!();
    for (i, row) in matrix.iter().enumerate() {
        print!("{:>4}", format!("[{}]", i));
        for value in row {
            match value {
                Some(r) => print!(" {:>8.4}", r),
                None => print!(" {:>8}", "-"),
            }
        }
        println!();
    }
    Ok(())
}

fn handle_train(session: &mut Session, args: &TrainArgs) -> Result<Evaluation> {
    session.set_config(args.to_config());
    let evaluation = session.fit().context("Training failed")?;

    println!("--> Scores");
    println!("{:<6} {:>9} {:>9}", "split", "accuracy", "F1");
    println!("{:<6} {:>9.4} {:>9.4}", "train", evaluation.train.accuracy, evaluation.train.f1);
    println!("{:<6} {:>9.4} {:>9.4}", "test", evaluation.test.accuracy, evaluation.test.f1);

    if args.top > 0 {
        println!("\n--> Largest coefficients");
        for (name, weight) in session.model()?.coefficients().into_iter().take(args.top) {
            println!("{:<60} {:>8.4}", name, weight);
        }
    }
    Ok(evaluation)
}

fn handle_predict(session: &mut Session, args: &PredictArgs) -> Result<()> {
    let evaluation = handle_train(session, &args.train)?;
    println!("\nModel F1 score: {:.2}", evaluation.test.f1);

    let numeric = [
        (AGE, args.age),
        (CGPA, args.cgpa),
        (ACADEMIC_PRESSURE, args.academic_pressure),
        (STUDY_SATISFACTION, args.study_satisfaction),
        (JOB_SATISFACTION, args.job_satisfaction),
        (WORK_STUDY_HOURS, args.work_study_hours),
        (WORK_PRESSURE, args.work_pressure),
        (FINANCIAL_STRESS, args.financial_stress),
    ];
    let categorical = [
        (GENDER, &args.gender),
        (DEGREE, &args.degree),
        (PROFESSION, &args.profession),
        (DIETARY_HABITS, &args.dietary_habits),
        (SLEEP_DURATION, &args.sleep_duration),
        (SUICIDAL_THOUGHTS, &args.suicidal_thoughts),
        (FAMILY_HISTORY, &args.family_history),
    ];

    let mut builder = session.record_builder()?;
    for (name, value) in numeric {
        if let Some(value) = value {
            builder = builder.numeric(name, value);
        }
    }
    for (name, value) in categorical {
        if let Some(value) = value {
            builder = builder.categorical(name, value);
        }
    }
    for (name, value) in &args.assignments {
        builder = builder.parse(name, value);
    }
    let record = builder.build().context("Invalid student record")?;

    let prediction = session.predict_one(&record)?;
    let bundle = recommend(prediction.label);
    println!("\n--> Prediction\n{} (probability {:.2})", bundle.headline, prediction.probability);
    println!("\n--> Recommendations\n{}", bundle);
    Ok(())
}
