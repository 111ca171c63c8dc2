//! Quadtree benchmark driver.
//!
//! Fills a point quadtree with uniformly random points and reports the average time of
//! small square range queries over it.

mod logging;
mod settings;
mod workload;

use settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_cli();
    let _logging = logging::setup_logging_and_profiling(&settings);

    settings.validate()?;
    logging::log_settings(&settings);

    let report = workload::run(&settings)?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Quad-tree average query time: {} seconds",
            report.average_query_seconds
        );
    }

    Ok(())
}
