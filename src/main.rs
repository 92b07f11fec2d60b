use log::debug;
use recipe_import::{ImportConfig, ImportError, RecipeImporter};
use std::env;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-import <url | path/to/file.pdf>";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [source] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let config = match ImportConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    match run(source, &config).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{e}");
            eprintln!("{}: {}", e.kind().code(), e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(source: &str, config: &ImportConfig) -> Result<String, ImportError> {
    let importer = RecipeImporter::from_config(config)?;

    let json = if is_pdf_path(source) {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| ImportError::InvalidPdf(format!("cannot read {source}: {e}")))?;
        let recipes = importer.import_from_pdf(bytes).await?;
        serde_json::to_string_pretty(&recipes)
    } else {
        let result = importer.import_from_url(source).await?;
        serde_json::to_string_pretty(&result)
    };

    json.map_err(|e| ImportError::Provider(format!("failed to serialize result: {e}")))
}

fn is_pdf_path(source: &str) -> bool {
    Path::new(source)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        && !source.starts_with("http://")
        && !source.starts_with("https://")
}
