//! Generates Rust client bindings from the Kurento interface descriptions.
//!
//! Run from the directory holding `kms-core` and `kms-elements`; the units are
//! written to `kurento/`. Set `RUST_LOG=info` to follow progress.

use anyhow::Context;
use kurento::Generator;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let generator = Generator::default();
    let config = generator.config();
    let paths = generator.run().with_context(|| {
        format!(
            "generating bindings from {} and {}",
            config.core_path.display(),
            config.elements_dir.display()
        )
    })?;

    tracing::info!(
        "Generated {} units in {}",
        paths.len(),
        config.output_dir.display()
    );
    Ok(())
}
