use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use midisketch::Config;
use midisketch::controller::{self, ControllerConnection, ControllerSender, controller_channel};
use midisketch::draw::CairoCanvas;
use midisketch::export::{ExportOutcome, MAX_SUPERSAMPLE_FACTOR, PngExporter};
use midisketch::input::DrawingSession;
use midisketch::replay::EventScript;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MIDISKETCH_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "midisketch")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Freehand sketching with line width driven by a MIDI pressure controller"
)]
struct Cli {
    /// Replay pointer, color and controller events from a JSON script
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Export the finished canvas (format from the extension, PNG when there is none)
    #[arg(long, short = 'o', value_name = "FILE", requires = "script")]
    output: Option<PathBuf>,

    /// MIDI input port to open (defaults to the configured device, then the first port)
    #[arg(long, value_name = "NAME")]
    device: Option<String>,

    /// Export supersampling factor (1-8)
    #[arg(long, value_name = "N")]
    supersample: Option<u32>,

    /// Do not open a MIDI input
    #[arg(long, action = ArgAction::SetTrue)]
    no_midi: bool,

    /// Read settings from this file instead of ~/.config/midisketch/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// List available MIDI input ports and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "script")]
    list_ports: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.list_ports {
        let ports = controller::list_input_ports()?;
        println!("Available MIDI input ports:");
        for name in ports {
            println!("{name}");
        }
    } else if let Some(script) = cli.script.as_deref() {
        run_script(&cli, script)?;
    } else {
        // No flags: show usage
        println!("midisketch: Freehand sketching with MIDI-controlled line width");
        println!();
        println!("Usage:");
        println!("  midisketch --script events.json [--output sketch.png]");
        println!("  midisketch --list-ports       List MIDI input ports");
        println!("  midisketch --help             Show help");
        println!();
        println!("Width control:");
        println!("  Channel pressure (aftertouch) on the configured channel (default 4)");
        println!("  sets the line width, from 1 px at 0 to 30 px at 127.");
        println!();
        println!("Configuration:");
        println!("  ~/.config/midisketch/config.toml");
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config: {err:#}. Using defaults.");
            Config::default()
        }),
    };

    if let Some(factor) = cli.supersample {
        config.export.supersample_factor = factor.clamp(1, MAX_SUPERSAMPLE_FACTOR);
        if config.export.supersample_factor != factor {
            log::warn!(
                "Supersample factor {factor} out of range, using {}",
                config.export.supersample_factor
            );
        }
    }
    if let Some(device) = &cli.device {
        config.controller.device_name = Some(device.clone());
    }
    if cli.no_midi {
        config.controller.enabled = false;
    }
    Ok(config)
}

fn open_controller(config: &Config, sender: ControllerSender) -> Option<ControllerConnection> {
    if !config.controller.enabled {
        log::info!("MIDI input disabled");
        return None;
    }

    match controller::connect(config.controller.device_name.as_deref(), sender) {
        Ok(connection) => {
            log::info!(
                "Listening for aftertouch on '{}' channel {}",
                connection.port_name(),
                config.controller.channel
            );
            Some(connection)
        }
        Err(err) => {
            log::warn!("{err}");
            eprintln!("No MIDI input found. Line width will not be controlled by MIDI.");
            None
        }
    }
}

fn run_script(cli: &Cli, script_path: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let variant = config.variant();
    log::info!(
        "Variant: themed_buttons={}, color_picker={}, supersample x{}",
        variant.themed_buttons,
        variant.color_picker,
        variant.supersample_factor
    );

    let script = EventScript::load(script_path)?.with_save_config(config.file_save_config());

    let region = config.canvas_region();
    let background = config.background();
    let canvas = CairoCanvas::new(region, background).context("Failed to create canvas")?;
    let exporter = PngExporter::new(variant.supersample_factor, background);
    let mut session = DrawingSession::with_defaults(
        Box::new(canvas),
        Box::new(exporter),
        config.session_settings(),
    );

    let (sender, mut inbox) = controller_channel(config.controller.queue_capacity);
    let connection = open_controller(&config, sender);

    let summary = script.apply(&mut session, Some(&mut inbox));

    // Stop the MIDI callback before reporting.
    drop(connection);
    if inbox.dropped() > 0 {
        log::warn!(
            "{} controller messages dropped while the session was busy",
            inbox.dropped()
        );
    }

    if let Some(output) = &cli.output {
        match session.export(Some(output.as_path())) {
            ExportOutcome::Saved(path) => println!("Saved {}", path.display()),
            ExportOutcome::Cancelled(reason) => bail!("Export cancelled: {reason}"),
            ExportOutcome::Failed(reason) => bail!("{reason}"),
        }
    }

    println!("Replayed {}: {summary}", script_path.display());
    Ok(())
}
