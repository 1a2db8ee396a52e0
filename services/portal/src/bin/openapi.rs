//! services/portal/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the `/mock/*` control endpoints, so test
//! harnesses can generate clients without starting the portal.

use std::path::PathBuf;

use clap::Parser;
use portal_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi", about = "Export the mock control API description")]
struct Args {
    /// Destination file for the pretty-printed JSON document.
    #[arg(default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let api = ApiDoc::openapi();
    std::fs::write(&args.output, api.to_pretty_json()?)?;
    println!(
        "Wrote {} control endpoints to {}",
        api.paths.paths.len(),
        args.output.display()
    );
    Ok(())
}
