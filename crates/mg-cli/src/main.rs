use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use mg_model::mock;
use mg_model::{
    CharTokenizer, ExplorerConfig, GenerationTrace, SequenceSampler, Symbol, TemperatureLabel, Vocabulary,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Peek inside a tiny character-level GPT that generates names.
#[derive(Parser, Debug)]
#[command(name = "microgpt", version, about)]
struct Cli {
    /// JSON file overriding the default explorer settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample names token by token.
    Generate(GenerateArgs),
    /// Show how text becomes token ids and training pairs.
    Tokenize {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the mock token, position and combined embeddings.
    Embed {
        /// A letter `a`..`z` or `BOS`.
        symbol: String,
        #[arg(short, long, default_value_t = 0)]
        position: usize,
    },
    /// Print the simulated training loss curve.
    Loss {
        /// Number of steps (defaults to the configured one).
        #[arg(long)]
        steps: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Sampling temperature (defaults to the configured one).
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// How many names to generate.
    #[arg(short = 'n', long, default_value_t = 5)]
    count: usize,
    /// Use `-t` and `-n` as given instead of snapping them to the configured ranges.
    #[arg(long)]
    no_clamp: bool,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the top candidates behind every sampled token.
    #[arg(long)]
    trace: bool,
    /// Print the names as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            ExplorerConfig::load(path)?
        }
        None => ExplorerConfig::default(),
    };
    let vocab = Arc::new(Vocabulary::new());

    match cli.command {
        Command::Generate(args) => generate(&config, vocab, &args),
        Command::Tokenize { text, json } => tokenize(vocab, &text, json),
        Command::Embed { symbol, position } => embed(&config, &vocab, &symbol, position),
        Command::Loss { steps, json } => loss(&config, steps, json),
    }
}

fn generate(config: &ExplorerConfig, vocab: Arc<Vocabulary>, args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let g = &config.generation;
    let requested = args.temperature.unwrap_or(g.temperature);
    // Non-positive temperatures are passed through so the sampler rejects them.
    let temperature = if args.no_clamp || !(requested > 0.0) {
        requested
    } else {
        g.clamp_temperature(requested)
    };
    if temperature != requested {
        log::warn!("temperature {} snapped to {}", requested, temperature);
    }
    let count = if args.no_clamp { args.count } else { g.clamp_names(args.count) };
    if count != args.count {
        log::warn!("name count {} clamped to {}", args.count, count);
    }

    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let sampler = SequenceSampler::new(Arc::clone(&vocab)).with_max_steps(g.max_steps);

    let mut traces = Vec::with_capacity(count);
    for _ in 0..count {
        traces.push(sampler.generate_with_trace(temperature, &mut rng)?);
    }
    log::info!("generated {} names at temperature {}", traces.len(), temperature);

    if args.json {
        let names: Vec<_> = traces.iter().map(|t| &t.sequence).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    println!(
        "temperature {:.2} ({})",
        temperature,
        TemperatureLabel::for_temperature(temperature)
    );
    for t in &traces {
        let symbols: Vec<String> = t.sequence.tokens.iter().map(|tok| tok.symbol.to_string()).collect();
        println!("{:<14} [{}]", t.sequence.name, symbols.join(" "));
        if args.trace {
            print_trace(&vocab, t)?;
        }
    }
    Ok(())
}

fn print_trace(vocab: &Vocabulary, trace: &GenerationTrace) -> Result<(), Box<dyn Error>> {
    for step in &trace.steps {
        let mut ranked: Vec<(usize, f64)> = step.probabilities.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut top = Vec::with_capacity(3);
        for &(id, p) in ranked.iter().take(3) {
            top.push(format!("{}={:.3}", vocab.symbol_of(id as u32)?, p));
        }
        println!(
            "    pos {:>2} after {:<12} draw {:.3} -> {:<3}  top: {}",
            step.position,
            format!("{:?}", step.context),
            step.draw,
            step.token.symbol,
            top.join(" ")
        );
    }
    if trace.truncated {
        println!("    (closed at the step limit)");
    }
    Ok(())
}

fn tokenize(vocab: Arc<Vocabulary>, text: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let tokenizer = CharTokenizer::new(vocab);
    let tokens = tokenizer.encode(text);
    let pairs = tokenizer.pairs(&tokens);

    if json {
        let value = serde_json::json!({ "tokens": tokens, "pairs": pairs });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let ids: Vec<String> = tokens.iter().map(|t| t.id.to_string()).collect();
    let symbols: Vec<String> = tokens.iter().map(|t| t.symbol.to_string()).collect();
    println!("symbols: {}", symbols.join(" "));
    println!("ids:     {}", ids.join(" "));
    for pair in &pairs {
        println!("  {} -> {}", pair.current.symbol, pair.next.symbol);
    }
    Ok(())
}

fn embed(config: &ExplorerConfig, vocab: &Vocabulary, symbol: &str, position: usize) -> Result<(), Box<dyn Error>> {
    let id = vocab.id_of(Symbol::parse(symbol)?)?;
    let n_embd = config.model.n_embd;
    if position >= config.model.block_size {
        log::warn!("position {} is past block_size {}", position, config.model.block_size);
    }

    let fmt = |v: Vec<f64>| v.iter().map(|x| format!("{:+.3}", x)).collect::<Vec<_>>().join(" ");
    println!("token    {:>3}: {}", id, fmt(mock::token_embedding(id, n_embd)));
    println!("position {:>3}: {}", position, fmt(mock::position_embedding(position, n_embd)));
    println!("combined    : {}", fmt(mock::combined_embedding(id, position, n_embd)));
    Ok(())
}

fn loss(config: &ExplorerConfig, steps: Option<usize>, json: bool) -> Result<(), Box<dyn Error>> {
    let steps = steps.unwrap_or(config.training.num_steps);
    let curve = mock::training_loss_curve(steps, &config.training);

    if json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
        return Ok(());
    }
    for point in &curve {
        println!("{:>5}  loss {:.4}  lr {:.6}", point.step, point.loss, point.learning_rate);
    }
    Ok(())
}
