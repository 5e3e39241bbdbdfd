//! hand_demos: interactive entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use hand_demos::app::{open_source, run, FeatureKind};
use hand_demos::config::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "hand_demos", version, about = "Hand and body landmark demos")]
struct Cli {
    /// Demo to start; a menu is shown when omitted.
    #[arg(value_enum)]
    feature: Option<FeatureKind>,

    /// TOML settings file; missing means defaults.
    #[arg(short, long, default_value = "hand_demos.toml")]
    config: PathBuf,

    /// Read landmarks from the detector process instead of simulating them.
    #[arg(short, long)]
    detector: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Hand Demos — landmark-driven playground           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    if cli.detector {
        println!("  Source: detector process");
    } else {
        println!("  Source: simulation  (use --detector for a camera)");
    }
    println!();

    let kind = cli.feature.unwrap_or_else(pick_feature);
    let cfg = DemoConfig::load_or_default(&cli.config);

    println!();
    println!("  Opening {}…", kind);
    println!();

    let result = open_source(kind, &cfg, cli.detector).and_then(|source| run(kind, &cfg, source));
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn pick_feature() -> FeatureKind {
    for (i, kind) in FeatureKind::ALL.iter().enumerate() {
        println!("    {}. {}", i + 1, kind);
    }
    let choice = read_line("  Choice (1–9, default 1): ")
        .trim()
        .parse::<usize>()
        .unwrap_or(1);
    FeatureKind::ALL
        .get(choice.saturating_sub(1))
        .copied()
        .unwrap_or(FeatureKind::SignLanguage)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
