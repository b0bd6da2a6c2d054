//! Command line tool for training and exporting the grocery classifier

use std::path::Path;

use anyhow::anyhow;
use grocery_classifier::{
    backend,
    datasets::Corpus,
    pipelines::text_classification::{self, inference::PROBE_TEXTS, Classifier, Config},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help             Print help
  -c, --corpus           The training corpus (defaults to 'grocery_training_data.json')
  -o, --output-dir       Where the model and metadata are written (defaults to '.')
  -n, --num-epochs       Number of epochs to train for (defaults to 20)
  -b, --batch-size       Batch size (defaults to 32)
  -s, --seed             Seed for the split and shuffling (defaults to 42)
  --max-length           Fixed sequence length (defaults to 20)
  --max-vocab-size       Vocabulary size cap (defaults to 5000)
";

#[derive(Debug)]
struct Args {
    corpus: Option<String>,
    output_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    seed: Option<u64>,
    max_length: Option<usize>,
    max_vocab_size: Option<usize>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            corpus: pargs.opt_value_from_str(["-c", "--corpus"])?,
            output_dir: pargs.opt_value_from_str(["-o", "--output-dir"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            max_length: pargs.opt_value_from_str("--max-length")?,
            max_vocab_size: pargs.opt_value_from_str("--max-vocab-size")?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    fn into_config(self) -> Config {
        let mut config = Config::new();

        if let Some(corpus) = self.corpus {
            config.corpus = corpus;
        }

        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }

        if let Some(max_vocab_size) = self.max_vocab_size {
            config.max_vocab_size = max_vocab_size;
        }

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.into_config();

    log::info!("Loading training data...");
    let corpus = Corpus::load(&config.corpus).await?;

    let outcome = text_classification::run::<backend::Training>(&corpus, &config, backend::device())?;

    println!("\nValidation accuracy: {:.3}", outcome.validation.accuracy);
    println!(
        "Model saved to {} ({:.1} KB)",
        outcome.report.model_path.display(),
        outcome.report.model_bytes as f64 / 1024.0
    );
    println!("Metadata saved to {}", outcome.report.metadata_path.display());

    // Reload the pair without any training state, as a deployment would
    println!("\nTesting exported model...");
    let classifier =
        Classifier::<backend::Inference>::load(Path::new(&config.output_dir), &backend::device())?;

    for (text, prediction) in PROBE_TEXTS
        .iter()
        .zip(classifier.categorize_batch(PROBE_TEXTS))
    {
        println!("{text} -> {} ({:.2})", prediction.category, prediction.confidence);
    }

    Ok(())
}
