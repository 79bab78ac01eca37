use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use siteplan::config::{ConfigError, Variant, ViewerConfig};
use siteplan::engine::{EngineCore, HostEvent};
use siteplan::frame_loop::{FixedRateClock, RenderLoop};
use siteplan::model::PlaceholderLoader;
use siteplan::session::{SessionError, SessionScript};
use siteplan::svg::SvgSurface;
use siteplan::viewport::CameraRig;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("cannot read model file {path}: {source}")]
    ModelRead { path: PathBuf, source: io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "siteplan", about = "Replay a site-planning session and render it to SVG")]
struct Cli {
    /// JSON session script; an empty session when omitted.
    #[arg(long, env = "SITEPLAN_SCRIPT")]
    script: Option<PathBuf>,

    /// Building model file to load before the session starts.
    #[arg(long, env = "SITEPLAN_MODEL")]
    model: Option<PathBuf>,

    /// Where the rendered frame is written.
    #[arg(long, env = "SITEPLAN_OUT", default_value = "siteplan.svg")]
    out: PathBuf,

    /// Number of frames to run; defaults to just past the last scripted event.
    #[arg(long, env = "SITEPLAN_FRAMES")]
    frames: Option<u64>,
}

/// A model file read from disk, ready for the loader.
struct ModelFile {
    name: String,
    bytes: Vec<u8>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_env()?;
    let script = match &cli.script {
        Some(path) => SessionScript::load(path)?,
        None => SessionScript::default(),
    };
    let model = cli.model.as_deref().map(read_model).transpose()?;

    match config.variant {
        Variant::Flat => run(EngineCore::flat(&config), &config, &cli, script, model.as_ref()),
        Variant::Orbit => run(EngineCore::orbit(&config), &config, &cli, script, model.as_ref()),
    }
    Ok(())
}

fn read_model(path: &Path) -> Result<ModelFile, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ModelRead { path: path.to_path_buf(), source })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(ModelFile { name, bytes })
}

fn run<R: CameraRig>(
    mut engine: EngineCore<R>,
    config: &ViewerConfig,
    cli: &Cli,
    script: SessionScript,
    model: Option<&ModelFile>,
) {
    // Size the viewport before framing the model.
    engine.handle(HostEvent::Resize { width: script.viewport.width, height: script.viewport.height });
    if let Some(file) = model {
        engine.load_model(&PlaceholderLoader, &file.name, &file.bytes);
        eprintln!("{}", engine.upload_status().message());
    }

    let frames = cli.frames.unwrap_or_else(|| script.frames_needed());
    let mut queue = script.into_queue();
    let clock = FixedRateClock::new(config.frame_rate, Some(frames));
    let mut render = RenderLoop::new(clock, SvgSurface::to_file(&cli.out));
    let stats = render.run(&mut engine, &mut queue);

    eprintln!(
        "rendered {} frames ({} failed) to {}",
        stats.frames,
        stats.failed_presents,
        cli.out.display()
    );
    for row in engine.rows() {
        println!("{}\t{}\t{}", row.id, row.label, row.duration_text);
    }
    engine.teardown();
}
