mod web;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use rs_textgen_core::io::{DirectoryLines, stdin_lines};
use rs_textgen_core::model::tokenizer::Alphabet;
use rs_textgen_core::{Config, Generator, Result, TextGenError, Trainer};

use web::PageSource;

/// Train a word n-gram model on text, then generate new text from it.
#[derive(Parser, Debug)]
#[command(name = "textgen", version, about)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Build a model from a directory, a web page or stdin
	Train(TrainArgs),
	/// Generate text from a stored model
	Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
	/// File in which the model is stored
	#[arg(long)]
	model: PathBuf,
	/// Directory whose files are used as corpus (stdin if no source is given)
	#[arg(long)]
	input_dir: Option<PathBuf>,
	/// Url of a web page to train on
	#[arg(long)]
	webparse: Option<String>,
	/// Lowercase the texts
	#[arg(long)]
	lc: bool,
	/// Maximum n-gram order (overrides the config file)
	#[arg(long)]
	order: Option<usize>,
	/// Alphabet words are made of (overrides the config file)
	#[arg(long, value_enum)]
	alphabet: Option<AlphabetArg>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
	/// File from which the model is loaded
	#[arg(long)]
	model: PathBuf,
	/// Length of the generated sequence, in characters
	#[arg(long)]
	length: usize,
	/// Initial word (a random n-gram is used if absent or unknown)
	#[arg(long)]
	seed: Option<String>,
	/// File to write the result to (stdout if absent)
	#[arg(long)]
	output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlphabetArg {
	Cyrillic,
	Latin,
	Unicode,
}

impl From<AlphabetArg> for Alphabet {
	fn from(arg: AlphabetArg) -> Self {
		match arg {
			AlphabetArg::Cyrillic => Alphabet::Cyrillic,
			AlphabetArg::Latin => Alphabet::Latin,
			AlphabetArg::Unicode => Alphabet::Unicode,
		}
	}
}

/// Loads the user configuration, falling back to defaults.
fn load_config() -> Config {
	match confy::load("rs-textgen", Some("config")) {
		Ok(config) => config,
		Err(err) => {
			log::warn!("failed to load config, using defaults: {err}");
			Config::default()
		}
	}
}

fn train(args: TrainArgs) -> Result<()> {
	let mut config = load_config();
	if let Some(order) = args.order {
		config.order = order;
	}
	if let Some(alphabet) = args.alphabet {
		config.alphabet = alphabet.into();
	}
	config.lowercase |= args.lc;

	let mut trainer = Trainer::new(&config)?;

	let mut trained = false;
	if let Some(dir) = &args.input_dir {
		for line in DirectoryLines::new(dir)? {
			trainer.train(&line?);
		}
		trained = true;
	}
	if let Some(url) = &args.webparse {
		let page = PageSource::fetch(url)?;
		log::info!("parsing {url} started");
		for fragment in page.fragments() {
			trainer.train(&fragment);
		}
		log::info!("parsing {url} finished");
		trained = true;
	}
	if !trained {
		for line in stdin_lines() {
			trainer.train(&line?);
		}
		log::info!("stdin exhausted");
	}

	log::info!("storing model ...");
	trainer.artifact().save(&args.model)?;
	log::info!(
		"model stored to {} (order {}, {} words, {} n-grams)",
		args.model.display(),
		trainer.order(),
		trainer.lexicon().len(),
		trainer.frequencies().len()
	);
	Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
	log::info!("loading model ...");
	let generator = Generator::load(&args.model)?;
	let generated = generator.generate(args.length, args.seed.as_deref())?;

	let write_error = |e| TextGenError::io("writing generated text", e);
	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => {
			log::info!("output will be stored in {}", path.display());
			let file = File::create(path).map_err(|e| TextGenError::io(format!("creating {}", path.display()), e))?;
			Box::new(BufWriter::new(file))
		}
		None => Box::new(io::stdout().lock()),
	};
	for sentence in &generated.sentences {
		writeln!(out, "{sentence}").map_err(write_error)?;
	}
	out.flush().map_err(write_error)?;
	Ok(())
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let result = match cli.command {
		Command::Train(args) => train(args),
		Command::Generate(args) => generate(args),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			log::error!("{err}");
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}
