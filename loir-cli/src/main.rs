//! Command-line interface for loir
//! This binary compresses one Python file into its compact LOIR fingerprint,
//! reports token counts, and (when an API key is available) asks the
//! reconstruction service to regenerate the source and scores the result.
//!
//! Usage:
//!   loir `<file.py>` [--config `<loir.toml>`] [--mode `<legacy|tokenizing>`] [--no-recreate]
//!
//! The encoding output and its compression metrics are always printed, even
//! when reconstruction or scoring subsequently fails.

use std::path::Path;
use std::process;
use std::time::Duration;

use clap::{Arg, ArgAction, Command};

use loir_codec::{assemble, compress, score, CompressMode};
use loir_config::{Loader, LoirConfig};
use loir_recreate::{ClientConfig, RecreateClient};

mod tokens;
use tokens::TokenCounter;

fn main() {
    let matches = Command::new("loir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress Python source into a lossy outline fingerprint and score reconstructions against it")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the Python file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Symbol compression mode: 'legacy' or 'tokenizing'"),
        )
        .arg(
            Arg::new("no-recreate")
                .long("no-recreate")
                .help("Skip the reconstruction call and the fidelity score")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").expect("path is required");
    let config = load_config(matches.get_one::<String>("config"));
    let mode = resolve_mode(matches.get_one::<String>("mode"), &config);
    handle_run(path, &config, mode, matches.get_flag("no-recreate"));
}

fn load_config(config_path: Option<&String>) -> LoirConfig {
    let mut loader = Loader::new();
    if let Some(path) = config_path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    })
}

fn resolve_mode(flag: Option<&String>, config: &LoirConfig) -> CompressMode {
    match flag {
        Some(name) => CompressMode::parse(name).unwrap_or_else(|| {
            eprintln!(
                "Unknown compression mode '{}' (expected 'legacy' or 'tokenizing')",
                name
            );
            process::exit(1);
        }),
        None => config.compress.mode,
    }
}

fn handle_run(path: &str, config: &LoirConfig, mode: CompressMode, no_recreate: bool) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", path, e);
        process::exit(1);
    });
    let name = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("module");

    let module = loir_parser::parse_module(&source, name).unwrap_or_else(|e| {
        eprintln!("Syntax error in {}: {}", path, e);
        process::exit(1);
    });
    let loir = compress(&assemble(&module), mode);

    let counter = TokenCounter::for_model(&config.tokens.model).unwrap_or_else(|e| {
        eprintln!("Tokenizer error: {}", e);
        process::exit(1);
    });

    println!("Ultra-Aggressive LOIR:\n{}", loir);
    println!("\nLOIR tokens: {}", counter.count(&loir));
    println!("\nOriginal Code:\n{}", source);
    let original_tokens = counter.count(&source);
    println!("\nOriginal tokens: {}", original_tokens);
    if original_tokens > 0 {
        println!(
            "\nPercentage of original code in LOIR: {:.2}%",
            counter.count(&loir) as f64 / original_tokens as f64 * 100.0
        );
    }

    if no_recreate {
        return;
    }
    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("OPENAI_API_KEY is not set; skipping reconstruction");
            return;
        }
    };

    let client = match RecreateClient::new(ClientConfig {
        api_base: config.recreate.api_base.clone(),
        api_key,
        model: config.recreate.model.clone(),
        timeout: Duration::from_secs(config.recreate.timeout_secs),
    }) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Reconstruction client error: {}", e);
            return;
        }
    };

    // A failed reconstruction leaves the encoding output above intact.
    let recreated = match client.recreate(&loir) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Reconstruction failed: {}", e);
            return;
        }
    };

    println!("\nRecreated Code:\n{}", recreated);
    println!("\nRecreated tokens: {}", counter.count(&recreated));

    let report = score(&source, &recreated);
    if let Some(reason) = &report.failure {
        eprintln!("Logic compare error: {}", reason);
    }
    println!("\nLogic similarity: {:.2}%", report.score);
}
