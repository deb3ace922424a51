//! vitals-risk entrypoint: list systems, generate synthetic data, train
//! classifier artifacts offline, and assess one person's inputs.

use clap::{ArgGroup, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use vitals_risk::{
    config::PredictorConfig,
    features::{BodySystem, FeatureVector, Schema, Strategy},
    logging::{AssessmentLog, StructuredLogger},
    model, report,
    risk::{RiskAssessment, RiskEngine},
    synth,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "vitals-risk")]
#[command(about = "Per-organ health risk tiers from self-reported vitals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List body systems, their strategy and input fields
    Systems,
    /// Write a synthetic labelled dataset as CSV
    Generate {
        #[arg(long)]
        system: BodySystem,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Train classifier artifacts into the model directory
    #[command(group(
        ArgGroup::new("target")
            .args(["system", "all"])
            .required(true)
            .multiple(false)
    ))]
    Train {
        #[arg(long)]
        system: Option<BodySystem>,
        #[arg(long)]
        all: bool,
    },
    /// Assess one person's inputs for a body system
    Assess {
        #[arg(long)]
        system: BodySystem,
        /// JSON object of field values; prompts interactively when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write a markdown report here
        #[arg(long)]
        report: Option<PathBuf>,
        /// Print the assessment as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let config_path = std::env::var("VITALS_RISK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = PredictorConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    match cli.command {
        Commands::Systems => list_systems(),
        Commands::Generate {
            system,
            samples,
            seed,
            out,
        } => {
            if system.strategy() != Strategy::Classifier {
                return Err(format!("{} is rule-scored and has no synthetic profile", system).into());
            }
            let n = samples.unwrap_or_else(|| config.training.samples_for(system));
            let seed = seed.unwrap_or(config.training.seed);
            let dataset = synth::generate(system, n, seed)?;
            let file = std::fs::File::create(&out)?;
            dataset.write_csv(file)?;
            println!("Wrote {} rows to {}", dataset.len(), out.display());
            for (label, count) in dataset.label_counts() {
                println!("  {}: {}", label, count);
            }
        }
        Commands::Train { system, all } => {
            let targets: Vec<BodySystem> = if all {
                BodySystem::ALL
                    .into_iter()
                    .filter(|s| s.strategy() == Strategy::Classifier)
                    .collect()
            } else {
                system.into_iter().collect()
            };
            for system in targets {
                if system.strategy() != Strategy::Classifier {
                    println!("{} is rule-scored; nothing to train.", system);
                    continue;
                }
                let path = model::train_and_save(
                    system,
                    config.training.samples_for(system),
                    config.training.seed,
                    config.training.forest_params(),
                    &config.model_dir,
                )?;
                println!("Trained {} -> {}", system, path.display());
            }
        }
        Commands::Assess {
            system,
            input,
            report: report_path,
            json,
        } => {
            let features = match input {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)?;
                    let value: serde_json::Value = serde_json::from_str(&text)?;
                    FeatureVector::from_json(system, &value)?
                }
                None => prompt_features(system)?,
            };
            let engine = RiskEngine::new(&config);
            let assessment = match engine.evaluate(&features) {
                Ok(a) => a,
                Err(e) if e.is_model_unavailable() => {
                    println!("{} prediction unavailable (simulated): no trained model loaded.", system.display_name());
                    println!("Run `vitals-risk train --system {}` first.", system);
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };
            info!(system = %system, tier = %assessment.tier, "assessment complete");
            StructuredLogger::emit_json(&AssessmentLog::from_assessment(&assessment), &mut std::io::stderr());

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment, config.report.include_advice);
            }
            if let Some(path) = report_path {
                // bare file names land in the configured report directory
                let path = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => path,
                    _ => config.report.dir.join(path),
                };
                report::write_report(&path, &features, &assessment, config.report.include_advice)?;
                println!("Report saved to {}", path.display());
            }
        }
    }

    Ok(())
}

fn list_systems() {
    for system in BodySystem::ALL {
        let strategy = match system.strategy() {
            Strategy::Classifier => "classifier",
            Strategy::RuleScored => "rule score",
        };
        println!("{} ({}) labels: {}", system, strategy, system.labels().join(" / "));
        for field in Schema::for_system(system).fields {
            println!("  {:<22} {}", field.name, field.kind.describe());
        }
    }
}

/// Ask for each field in schema order, re-prompting until the answer is valid.
fn prompt_features(system: BodySystem) -> CliResult<FeatureVector> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();
    let mut fv = FeatureVector::new(system);
    println!("{} check: answer each question.", system.display_name());
    for field in Schema::for_system(system).fields {
        loop {
            write!(stdout, "{} [{}]: ", field.prompt, field.kind.describe())?;
            stdout.flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => return Err("input closed before all fields were answered".into()),
            };
            match field.parse_checked(&line) {
                Ok(value) => {
                    fv.set(field.name, value);
                    break;
                }
                Err(reason) => println!("Invalid input: {}. Please try again.", reason),
            }
        }
    }
    Ok(fv)
}

fn print_assessment(a: &RiskAssessment, include_advice: bool) {
    println!();
    println!("{} risk: {} ({})", a.system.display_name(), a.tier, a.label);
    println!("{}", a.headline);
    if let Some(score) = a.score {
        println!("Score: {}", score);
    }
    if let Some(probabilities) = &a.probabilities {
        for label in a.system.labels() {
            println!("  {}: {:.2}%", label, probabilities.get(label).copied().unwrap_or(0.0) * 100.0);
        }
    }
    for insight in &a.insights {
        println!("- {}", insight);
    }
    if include_advice {
        println!();
        println!("Tips:");
        for tip in a.advice.tips {
            println!("  - {}", tip);
        }
        println!("Tests: {}", a.advice.tests.join(", "));
        println!("See a doctor: {}", a.advice.urgency);
        println!("What to say: \"{}\"", a.advice.doctor_prompt);
    }
    println!();
    println!("{}", vitals_risk::explain::DISCLAIMER);
}
