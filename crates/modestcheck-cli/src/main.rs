use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use modestcheck_ai::ImageClassifier;
use modestcheck_core::{Lexicon, TOP_K, assess};

mod display;
mod fetch;

#[derive(Parser)]
#[command(name = "modestcheck", version, about = "Attire-compliance image screening")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify an image and print the compliance verdict.
    Assess {
        /// Path to the image file (PNG/JPEG/WebP).
        image: PathBuf,

        /// Directory containing model.onnx and labels.txt.
        #[arg(long, env = "MODEL_DIR", default_value = "models/mobilenet-v2")]
        model_dir: PathBuf,

        /// Number of ranked predictions to score.
        #[arg(long, default_value_t = TOP_K)]
        top_k: usize,

        /// Emit the assessment as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },

    /// Download model.onnx and labels.txt into the model directory.
    FetchModel {
        /// Directory to place the model files in.
        #[arg(long, env = "MODEL_DIR", default_value = "models/mobilenet-v2")]
        model_dir: PathBuf,

        /// Base URL serving model.onnx and labels.txt.
        #[arg(long, env = "MODESTCHECK_MODEL_URL")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modestcheck=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Assess {
            image,
            model_dir,
            top_k,
            json,
        } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("reading {}", image.display()))?;

            let mut classifier =
                ImageClassifier::load(&model_dir).context("loading model")?;
            let predictions = classifier
                .classify_bytes(&bytes, top_k)
                .context("classifying image")?;

            let assessment = assess(predictions, &Lexicon::default());

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", display::render_assessment(&assessment));
            }
        }

        Command::FetchModel {
            model_dir,
            base_url,
        } => {
            let fetcher = fetch::ModelFetcher::new(base_url);
            fetcher
                .fetch_all(&model_dir)
                .await
                .context("fetching model files")?;
            eprintln!("Model files written to {}", model_dir.display());
        }
    }

    Ok(())
}
