use std::sync::Arc;

use crate::forecast::{ModelRegistry, MODEL_CATALOG};
use crate::server;
use crate::services::QuoteClient;
use crate::utils::{get_data_dir, get_model_root};

pub fn run(port: u16) {
    println!("🚀 Starting aipricecast server on port {}", port);

    let data_dir = get_data_dir();
    println!("📁 Data directory: {}", data_dir.display());

    let model_root = get_model_root();
    println!("🧠 Model root:     {}", model_root.display());

    let registry = Arc::new(ModelRegistry::new(model_root));
    if registry.backend_available() {
        println!("✅ Model backend available:");
        for spec in MODEL_CATALOG {
            let marker = if registry.model_dir(spec.key).is_dir() {
                "✅"
            } else {
                "⚠️ "
            };
            println!(
                "   {} {} ({}, context {})",
                marker, spec.name, spec.params, spec.context_length
            );
        }
    } else {
        println!("⚠️  Model backend not available (model root missing)");
        println!("   Predictions will fail until pretrained artifacts are in place.");
    }

    let quotes = match QuoteClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("❌ Failed to create quote client: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    if let Err(e) = runtime.block_on(server::serve(registry, quotes, port)) {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
