//! Generates the bindings of the bundled IDL descriptions into `OUT_DIR`.

use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("schema");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?).join("kurento");

    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=schema");

    kurento_codegen::Generator::builder()
        .core_path(schema.join("core.kmd.json"))
        .elements_dir(&schema)
        .output_dir(out_dir)
        .build()
        .run()?;

    Ok(())
}
