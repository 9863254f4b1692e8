use std::path::{Path, PathBuf};

use crate::forecast::{ModelRegistry, MODEL_CATALOG};
use crate::services::bar_store;
use crate::utils::{format_timestamp, get_data_dir, get_model_root};

pub fn run() {
    println!("📊 aipricecast Status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let registry = ModelRegistry::new(get_model_root());

    println!("🧠 Model root: {}", registry.root().display());
    if registry.backend_available() {
        for spec in MODEL_CATALOG {
            let model_ok = registry.model_dir(spec.key).is_dir();
            let tokenizer_ok = registry.tokenizer_dir(spec.key).is_dir();
            let marker = if model_ok && tokenizer_ok { "✅" } else { "⚠️ " };
            println!(
                "   {} {:<16} {:>6} params, context {:>4}  ({})",
                marker,
                spec.name,
                spec.params,
                spec.context_length,
                if model_ok && tokenizer_ok {
                    "ready"
                } else if model_ok {
                    "tokenizer missing"
                } else {
                    "weights missing"
                }
            );
        }
    } else {
        println!("   ⚠️  Model root not found. Predictions are unavailable.");
    }

    println!();

    let data_dir = get_data_dir();
    println!("📁 Data directory: {}", data_dir.display());
    show_data_dir(&data_dir)?;

    println!();
    println!("💡 Tip: fetch writes one CSV per symbol/interval/window into the data directory");

    Ok(())
}

fn show_data_dir(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !data_dir.is_dir() {
        println!("   ⚠️  No data directory yet. Run 'fetch' first.");
        return Ok(());
    }

    let mut csv_count = 0usize;
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(data_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        csv_count += 1;

        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map(|(t, _)| modified > *t).unwrap_or(true) {
            newest = Some((modified, path));
        }
    }

    if csv_count == 0 {
        println!("   ⚠️  No CSV files yet. Run 'fetch' first.");
        return Ok(());
    }

    println!("   📈 CSV files: {}", csv_count);
    if let Some((_, path)) = newest {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match bar_store::load_bars(&path) {
            Ok(bars) => {
                println!("   🕒 Most recent: {} ({} records)", name, bars.len());
                if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
                    println!(
                        "      Range: {} → {}",
                        format_timestamp(&first.time),
                        format_timestamp(&last.time)
                    );
                }
            }
            Err(e) => {
                eprintln!("   ⚠️  Could not read {}: {}", name, e);
            }
        }
    }

    Ok(())
}
