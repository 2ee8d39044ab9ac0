use bytepair::decoder::BpeDecoder;
use bytepair::encoder::BpeEncoder;
use bytepair::io::{load_model_from_path, save_model_to_path};
use bytepair::trainer::TrainerOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

type T = u32;

/// Byte-level BPE tokenizer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a model on a text corpus.
    Train {
        /// Path to the corpus text file.
        #[arg(long)]
        corpus: PathBuf,

        /// Target vocab size; must be >= 256.
        #[arg(long, default_value = "512")]
        vocab_size: usize,

        /// Path to write the trained model to.
        #[arg(long)]
        model: PathBuf,

        /// Special-token literals to reserve.
        #[arg(long, value_delimiter = ',')]
        special: Vec<String>,
    },

    /// Encode text into token ids.
    Encode {
        /// Path to a trained model.
        #[arg(long)]
        model: PathBuf,

        /// The text to encode.
        text: String,
    },

    /// Decode token ids back into text.
    Decode {
        /// Path to a trained model.
        #[arg(long)]
        model: PathBuf,

        /// The token ids to decode.
        #[arg(value_delimiter = ',')]
        ids: Vec<T>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Train {
            corpus,
            vocab_size,
            model,
            special,
        } => train(corpus, vocab_size, model, special),
        Command::Encode { model, text } => encode(model, &text),
        Command::Decode { model, ids } => decode(model, &ids),
    }
}

fn train(
    corpus: PathBuf,
    vocab_size: usize,
    model_path: PathBuf,
    special: Vec<String>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&corpus)?;

    let t0 = std::time::Instant::now();
    let model = TrainerOptions::new(vocab_size)
        .with_special_literals(&special)
        .train::<T>(&text)?;
    let training_duration = std::time::Instant::now().duration_since(t0);

    save_model_to_path(&model, &model_path)?;

    let encoder = BpeEncoder::new(Arc::new(model))?;
    let tokens = encoder.encode(&text)?;

    println!("Training Summary:");
    println!("- corpus bytes: {}", text.len());
    println!("- token count: {}", tokens.len());
    println!(
        "- bytes/token: {:.2}",
        text.len() as f64 / tokens.len() as f64
    );
    println!("- vocab size: {}", encoder.model().vocab_size());
    println!("- training duration: {:#?}", training_duration);
    println!("- model: {}", model_path.display());

    Ok(())
}

fn encode(
    model_path: PathBuf,
    text: &str,
) -> anyhow::Result<()> {
    let model = load_model_from_path::<T, _>(&model_path)?;
    let encoder = BpeEncoder::new(Arc::new(model))?;

    let tokens = encoder.encode(text)?;
    let ids: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    println!("{}", ids.join(","));

    println!("Encode Summary:");
    println!("- text bytes: {}", text.len());
    println!("- token count: {}", tokens.len());
    println!(
        "- bytes/token: {:.2}",
        text.len() as f64 / tokens.len().max(1) as f64
    );

    Ok(())
}

fn decode(
    model_path: PathBuf,
    ids: &[T],
) -> anyhow::Result<()> {
    let model = load_model_from_path::<T, _>(&model_path)?;
    let decoder = BpeDecoder::new(Arc::new(model));

    println!("{}", decoder.try_decode_to_string(ids)?);
    Ok(())
}
