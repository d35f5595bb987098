use std::path::PathBuf;

use anyhow::{Context, Result};
use audioscope::{
    list_input_devices, open_input, run_scope, AxisSource, CaptureDevice, Interpretation,
    ScopeConfig, ToneCapture, VisualizationMode,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "audioscope")]
#[command(about = "Realtime audio oscilloscope: XY, polar and time traces from live input")]
#[command(version)]
struct Cli {
    /// List available input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Input device name (defaults to the system default input)
    #[arg(short, long)]
    device: Option<String>,

    /// Use a synthetic stereo sine pair instead of an input device, e.g. `--tone 300,400`
    #[arg(long, value_parser = parse_tone)]
    tone: Option<TonePair>,

    /// Sample rate of the synthetic tone in Hz
    #[arg(long, default_value = "48000")]
    tone_rate: u32,

    /// JSON file with initial settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recording window length in milliseconds
    #[arg(long)]
    interval: Option<u32>,

    /// Maximum number of points kept on screen
    #[arg(long)]
    max_points: Option<usize>,

    #[arg(long, value_enum)]
    x_source: Option<AxisSource>,

    #[arg(long, value_enum)]
    y_source: Option<AxisSource>,

    #[arg(long, value_enum)]
    interpretation: Option<Interpretation>,

    #[arg(long, value_enum)]
    mode: Option<VisualizationMode>,

    /// Amplification applied to both axes
    #[arg(long)]
    amplification: Option<f32>,

    /// Disable vertical synchronization
    #[arg(long)]
    no_vsync: bool,
}

#[derive(Clone, Copy, Debug)]
struct TonePair {
    left: f64,
    right: f64,
}

fn parse_tone(s: &str) -> Result<TonePair, String> {
    let (l, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LEFT_HZ,RIGHT_HZ, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid frequency '{v}': {e}"))
    };
    Ok(TonePair {
        left: parse(l)?,
        right: parse(r)?,
    })
}

impl Cli {
    fn scope_config(&self) -> Result<ScopeConfig> {
        let mut cfg = match &self.config {
            Some(path) => ScopeConfig::load(path)?,
            None => ScopeConfig::default(),
        };
        if let Some(device) = &self.device {
            cfg.device = Some(device.clone());
        }
        if let Some(v) = self.interval {
            cfg.recording_interval_ms = v;
        }
        if let Some(v) = self.max_points {
            cfg.max_points = v;
        }
        if let Some(v) = self.x_source {
            cfg.x_source = v;
        }
        if let Some(v) = self.y_source {
            cfg.y_source = v;
        }
        if let Some(v) = self.interpretation {
            cfg.interpretation = v;
        }
        if let Some(v) = self.mode {
            cfg.mode = v;
        }
        if let Some(v) = self.amplification {
            cfg.x_amplification = v;
            cfg.y_amplification = v;
        }
        if self.no_vsync {
            cfg.vsync = false;
        }
        Ok(cfg.clamped())
    }
}

fn print_devices() -> Result<()> {
    let devices = list_input_devices().context("Failed to list input devices")?;
    if devices.is_empty() {
        println!("No input devices found");
    }
    for dev in devices {
        println!(
            "{}{} ({} Hz, {} ch)",
            dev.name,
            if dev.is_default { " [default]" } else { "" },
            dev.sample_rate,
            dev.channels
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_devices {
        return print_devices();
    }

    let cfg = cli.scope_config()?;
    let device: Box<dyn CaptureDevice> = match cli.tone {
        Some(tone) => Box::new(ToneCapture::new(cli.tone_rate, tone.left, tone.right)),
        None => open_input(cfg.device.as_deref()).context("Failed to open capture device")?,
    };

    run_scope(device, cfg).context("Oscilloscope terminated with an error")
}
