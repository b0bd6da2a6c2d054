//! Command line tool for classifying text with an exported model

use std::path::PathBuf;

use grocery_classifier::{
    backend,
    pipelines::text_classification::{inference::PROBE_TEXTS, Classifier},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: infer [OPTIONS] [TEXT]...

Arguments:
  TEXT                 Item descriptions to classify (defaults to a few probe items)

Options:
  -h, --help           Print help
  -d, --model-dir      Directory holding the model and its metadata (defaults to '.')
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// Directory holding the exported artifact pair
    model_dir: PathBuf,

    /// Texts to classify
    texts: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let model_dir = pargs
        .opt_value_from_str(["-d", "--model-dir"])?
        .unwrap_or_else(|| PathBuf::from("."));

    let texts = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    Ok(Args {
        help,
        model_dir,
        texts,
    })
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let texts = if args.texts.is_empty() {
        PROBE_TEXTS.iter().map(|s| (*s).to_string()).collect()
    } else {
        args.texts
    };

    let classifier = Classifier::<backend::Inference>::load(&args.model_dir, &backend::device())?;

    for (text, prediction) in texts.iter().zip(classifier.categorize_batch(&texts)) {
        println!(
            "{text} -> {} ({:.2})",
            prediction.category, prediction.confidence
        );
    }

    Ok(())
}
