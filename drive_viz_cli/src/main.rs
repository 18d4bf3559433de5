use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use drive_viz_lib::{archive, drive_list, export, scene::DriveScene};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Renders the drives stored on one line of a Waze account activity archive,
/// one map overlay file per drive.
#[derive(Parser)]
#[command(name = "drive_viz")]
struct Cli {
    /// Archive file to read.
    #[arg(long, default_value = "waze-data-archive/account_activity_3.csv")]
    path: PathBuf,

    /// 1-based line number of the drive list inside the archive.
    #[arg(long, default_value_t = 117)]
    line: usize,

    /// Directory the per-drive files are written to.
    #[arg(long, default_value = "drives")]
    out_dir: PathBuf,

    /// Output channel: raw GeoJSON, a Leaflet map page, or both.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    Geojson,
    Html,
    Both,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let raw = archive::nth_line(&cli.path, cli.line)
        .with_context(|| format!("failed to extract line {} of {}", cli.line, cli.path.display()))?;
    let drives = drive_list::parse_drive_list(&raw)
        .context("archive line does not match the drive list grammar")?;
    tracing::info!("Parsed {} drive(s) from line {}", drives.len(), cli.line);

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    for (index, drive) in drives.iter().enumerate() {
        let number = index + 1;
        let scene = DriveScene::build(drive)
            .with_context(|| format!("drive {} has a zero-duration segment", number))?;

        let total_km: f64 = drive.segments.iter().map(|s| s.distance_km()).sum();
        tracing::info!(
            "Drive {}: {} point(s), {} segment(s), {:.1} km",
            number,
            drive.points.len(),
            drive.segments.len(),
            total_km
        );

        if matches!(cli.format, Format::Geojson | Format::Both) {
            write_artifact(&cli.out_dir, number, "geojson", export::to_geojson_string(&scene))?;
        }
        if matches!(cli.format, Format::Html | Format::Both) {
            write_artifact(&cli.out_dir, number, "html", export::to_leaflet_page(&scene))?;
        }
    }

    Ok(())
}

fn write_artifact(out_dir: &std::path::Path, number: usize, ext: &str, content: String) -> anyhow::Result<()> {
    let path = out_dir.join(format!("drive_{:02}.{}", number, ext));
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
