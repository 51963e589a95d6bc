use landmark_core::{
    config::Config,
    init,
    scene::Scene,
    ui::{self, Settings},
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Empty landmark slots to allocate (overrides LANDMARK_SLOTS)
    #[arg(long)]
    slots: Option<usize>,

    /// Place this many landmarks on a ring before starting
    #[arg(long, default_value_t = 0)]
    seed: usize,

    /// Height of the mesh dome (overrides LANDMARK_MESH_AMPLITUDE)
    #[arg(long)]
    amplitude: Option<f32>,

    /// Start in snap placement mode
    #[arg(long)]
    snap: bool,

    /// Start with the group selection box enabled
    #[arg(long)]
    group: bool,

    /// Print the effective settings and exit
    #[arg(long)]
    show_settings: bool,
}

fn main() -> Result<()> {
    // Setup
    init();
    let args = Args::parse();

    // Load config and apply CLI overrides
    let loaded = Config::load().context("Failed to load configuration")?;
    let config = Config::builder()
        .with_landmark_slots(args.slots.unwrap_or(loaded.landmark_slots))
        .with_marker_radius(loaded.marker_radius)
        .with_mesh_amplitude(args.amplitude.unwrap_or(loaded.mesh_amplitude))
        .with_log_filter(loaded.log_filter)
        .build()
        .context("Invalid command-line overrides")?;

    init_logging(&config.log_filter);

    let mut settings = Settings::load();
    settings.snap_mode |= args.snap;
    settings.group_selection |= args.group;

    if args.show_settings {
        println!("{:#?}", config);
        println!("{:#?}", settings);
        return Ok(());
    }

    let mut scene = Scene::from_config(&config).context("Failed to build scene")?;
    scene.seed_ring(args.seed);
    tracing::info!(
        "Starting annotator with {} landmark(s), snap={}, group={}",
        args.seed + config.landmark_slots,
        settings.snap_mode,
        settings.group_selection
    );

    ui::run_annotator(scene, settings)?;
    Ok(())
}

/// Logs to stderr; `RUST_LOG` takes precedence over the configured filter.
fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
