//! Brand packager - switches a mobile project between brands.
//!
//! This binary establishes the selected brand, fabricates its manifests and
//! rebuilds the platform trees, or applies brand assets to prepared trees.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match brand_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
