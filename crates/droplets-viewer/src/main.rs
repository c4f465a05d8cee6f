use std::time::Duration;

use clap::Parser;
use winit::dpi::LogicalSize;

use droplets_engine::coords::Vec2;
use droplets_engine::logging::{LoggingConfig, init_logging};
use droplets_engine::render::GpuInit;
use droplets_engine::window::{HeadlessConfig, HeadlessDriver, Runtime, RuntimeConfig};

#[derive(Parser, Debug)]
#[command(name = "droplets", version, about = "Full-screen droplets shader effect")]
struct Cli {
    /// Window title
    #[arg(long, default_value = "droplets")]
    title: String,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Opaque window instead of a transparent one
    #[arg(long)]
    opaque: bool,

    /// Prefer the integrated GPU
    #[arg(long)]
    low_power: bool,

    /// Present without waiting for vsync where the platform allows it
    #[arg(long)]
    no_vsync: bool,

    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,

    /// Run without a display for a fixed number of ticks
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Simulated tick spacing in headless mode, in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log_filter.clone(),
        ..Default::default()
    });

    if cli.headless {
        let driver = HeadlessDriver::new(HeadlessConfig {
            ticks: cli.ticks,
            tick_interval: Duration::from_millis(cli.tick_ms),
        });
        let (w, h) = (cli.width as f32, cli.height as f32);
        // Synthetic pointer: a slow ellipse around the window center.
        let report = driver.run(|tick| {
            let t = tick as f32 * 0.05;
            Vec2::new(w * (0.5 + 0.3 * t.cos()), h * (0.5 + 0.3 * t.sin()))
        });
        println!(
            "{} ticks: {} rendered, {} throttled, newest pointer ({:.1}, {:.1})",
            report.ticks, report.accepted, report.throttled, report.trail[0].x, report.trail[0].y
        );
        return Ok(());
    }

    let config = RuntimeConfig {
        title: cli.title,
        initial_size: LogicalSize::new(cli.width, cli.height),
        transparent: !cli.opaque,
    };

    let gpu_init = GpuInit {
        power_preference: if cli.low_power {
            wgpu::PowerPreference::LowPower
        } else {
            wgpu::PowerPreference::HighPerformance
        },
        present_mode: if cli.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        },
        ..GpuInit::default()
    };

    log::info!("starting droplets ({}x{})", cli.width, cli.height);
    Runtime::run(config, gpu_init)
}
