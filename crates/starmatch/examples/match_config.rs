use starmatch::detect;
use starmatch::pattern::StarMatchConfig;
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use starmatch::core::{init_tracing, TracingFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(TracingFormat::Text);
    #[cfg(not(feature = "tracing"))]
    starmatch::core::init_with_level(log::LevelFilter::Info)?;

    let Some(config_path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: match_config <config.json>");
        return Ok(());
    };

    let cfg = StarMatchConfig::load_json(&config_path)?;
    let report = detect::run_config(&cfg, &config_path);
    match (&report.transform, &report.error) {
        (Some(t), _) => println!("{t}: {} correspondences", report.correspondences.len()),
        (None, Some(err)) => println!("failed: {err}"),
        (None, None) => println!("no match"),
    }

    let out = cfg.output_path();
    report.write_json(&out)?;
    println!("report written to {}", out.display());
    Ok(())
}
