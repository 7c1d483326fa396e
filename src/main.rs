use anyhow::Result;
use jangbogo::catalog::CatalogLoader;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Stand-in for one shopping-page visit: run the full catalog pipeline
/// against the default search paths and either render every product line
/// or print the failure diagnostic and stop.
fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jangbogo=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load the catalog ─────────────────────────────────────────
    let loader = CatalogLoader::new();
    let catalog = match loader.load() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(%err, "catalog load failed");
            // halt: no partial or corrupted product content
            eprintln!("카탈로그를 불러오지 못했습니다: {err}");
            std::process::exit(1);
        }
    };

    // ─── 3) render product lines ─────────────────────────────────────
    println!("{} ({} items)", catalog.path.display(), catalog.records.len());
    for record in &catalog.records {
        println!(
            "- {} | {} | {}",
            record.name,
            record.display_price(),
            record.image_ref
        );
    }
    if catalog.skipped_rows > 0 {
        info!(
            skipped = catalog.skipped_rows,
            "some rows were skipped as invalid"
        );
    }

    Ok(())
}
