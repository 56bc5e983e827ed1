//! Hoardgen - Main entry point.
//!
//! Loads the configured tables, validates them, and rolls one hoard for the
//! challenge rating given as the first argument.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hoardgen_domain::ChallengeRating;
use hoardgen_engine::infrastructure::config::{TreasureConfig, DEFAULT_CONFIG_PATH};
use hoardgen_engine::infrastructure::table_store::{load_table_set, DEFAULT_TABLES_PATH};
use hoardgen_engine::use_cases::TreasureRequest;
use hoardgen_engine::App;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root so running from `crates/engine` works too.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoardgen_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config_path =
        std::env::var("HOARDGEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let tables_path =
        std::env::var("HOARDGEN_TABLES").unwrap_or_else(|_| DEFAULT_TABLES_PATH.into());
    let cr_token = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HOARDGEN_CR").ok())
        .unwrap_or_else(|| "1".into());
    let cr = ChallengeRating::parse(&cr_token)?;

    let config = TreasureConfig::load(&config_path)?;
    let tables = load_table_set(&tables_path)?;
    tracing::info!(
        config = %config_path,
        tables = %tables_path,
        workbooks = tables.workbook_names().count(),
        "Tables loaded"
    );

    let app = App::with_system_random();

    let report = app
        .use_cases
        .validation
        .execute(&tables, &config.required_tables);
    if !report.is_valid() {
        eprintln!("{}", report);
        anyhow::bail!("table validation failed; refusing to generate treasure");
    }

    let request = TreasureRequest::new(cr, &tables, &config.required_tables);
    let generated = app.use_cases.treasure.generate.execute(&request)?;

    println!("Treasure for CR {}:", cr);
    println!("{}", generated.treasure);
    if !generated.warnings.is_empty() {
        eprintln!(
            "{} entr{} skipped; see log for details",
            generated.warnings.len(),
            if generated.warnings.len() == 1 { "y" } else { "ies" }
        );
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    // Then whatever sits next to the working directory.
    let _ = dotenvy::dotenv();
}
