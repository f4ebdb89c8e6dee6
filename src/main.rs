//! Lifeshade CLI: Game of Life window/headless runner and Sobel edge filter.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lifeshade::config::Config;
use lifeshade::frame::Frame;
use lifeshade::output::{OutputBackend, SnapshotOutput, WindowConfig, WindowRenderer};
use lifeshade::pacing::{FramePacer, RateCounter};
use lifeshade::{filter, BoardInitializer, Simulation};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Where finished generations go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Display in a window (default)
    Window,
    /// No window; run until Ctrl-C or the generation limit
    Headless,
}

/// Toroidal Game of Life and image edge filter.
#[derive(Parser, Debug)]
#[command(name = "lifeshade")]
#[command(about = "Game of Life on a torus, seeded from Perlin noise")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Game of Life simulation
    Life(LifeArgs),
    /// Apply a Sobel edge filter to an image file
    Edges {
        /// Input image
        input: PathBuf,
        /// Output image (format from extension)
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct LifeArgs {
    /// YAML config file; command-line values take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Board height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Target generations per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for reproducible boards (reset reproduces the same board)
    #[arg(long)]
    seed: Option<u64>,

    /// Noise octaves
    #[arg(long)]
    octaves: Option<u32>,

    /// Noise-space step between cells
    #[arg(long)]
    increment: Option<f32>,

    /// Output mode
    #[arg(long, value_enum, default_value = "window")]
    output: OutputMode,

    /// Stop after this many generations
    #[arg(long)]
    generations: Option<u64>,

    /// Write PNG snapshots into this directory
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Snapshot every N generations
    #[arg(long, default_value = "1")]
    snapshot_every: u64,
}

impl LifeArgs {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config from {:?}", path);
                Config::load(path)?
            }
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(octaves) = self.octaves {
            config.noise.octaves = octaves;
        }
        if let Some(increment) = self.increment {
            config.noise.increment = increment;
        }
        config.validate()?;
        Ok(config)
    }

    fn snapshots(&self) -> Result<Option<SnapshotOutput>> {
        self.snapshot_dir
            .as_ref()
            .map(|dir| SnapshotOutput::new(dir, self.snapshot_every))
            .transpose()
    }

    fn limit_reached(&self, generation: u64) -> bool {
        self.generations.is_some_and(|limit| generation >= limit)
    }
}

fn build_simulation(config: &Config) -> Result<Simulation> {
    let initializer = BoardInitializer::new(config.seed).with_params(config.noise);
    let simulation = Simulation::new(config.width, config.height, initializer)?;
    info!(
        "Board {}x{} seeded (population {})",
        config.width,
        config.height,
        simulation.population()
    );
    Ok(simulation)
}

/// The window is sized to the board.
fn window_config_for(config: &Config) -> Result<WindowConfig> {
    Ok(WindowConfig {
        title: config.window_title.clone(),
        width: u32::try_from(config.width)
            .map_err(|_| anyhow!("Board width {} does not fit a window", config.width))?,
        height: u32::try_from(config.height)
            .map_err(|_| anyhow!("Board height {} does not fit a window", config.height))?,
    })
}

/// Application state for the event loop.
struct LifeApp {
    args: LifeArgs,
    window_config: WindowConfig,
    window: Option<Arc<Window>>,
    renderer: Option<WindowRenderer>,
    simulation: Simulation,
    snapshots: Option<SnapshotOutput>,
    pacer: FramePacer,
    rate: RateCounter,
    needs_present: bool,
}

impl LifeApp {
    fn new(args: LifeArgs, config: &Config) -> Result<Self> {
        let window_config = window_config_for(config)?;
        let simulation = build_simulation(config)?;
        let mut snapshots = args.snapshots()?;
        if let Some(out) = &mut snapshots {
            out.present(simulation.current(), simulation.generation())?;
        }
        Ok(Self {
            args,
            window_config,
            window: None,
            renderer: None,
            simulation,
            snapshots,
            pacer: FramePacer::new(config.fps),
            rate: RateCounter::default(),
            needs_present: true,
        })
    }

    fn advance(&mut self) -> Result<()> {
        self.simulation.tick()?;
        let generation = self.simulation.generation();
        if let Some(out) = &mut self.snapshots {
            out.present(self.simulation.current(), generation)?;
        }
        if let Some(rate) = self.rate.record(Instant::now()) {
            debug!(
                "[Perf] {:.2} generations/s (generation {}, population {})",
                rate,
                generation,
                self.simulation.population()
            );
        }
        self.needs_present = true;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.simulation.reset()?;
        self.needs_present = true;
        if let Some(out) = &mut self.snapshots {
            out.start_run()?;
            out.present(self.simulation.current(), self.simulation.generation())?;
        }
        Ok(())
    }

    fn draw(&mut self) {
        if !self.needs_present {
            return;
        }
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if let Err(e) = renderer.present(self.simulation.current(), self.simulation.generation()) {
            error!("Render error: {}", e);
        }
        self.needs_present = false;
    }
}

impl ApplicationHandler for LifeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.window = Some(window.clone());

                let (w, h) = (self.window_config.width, self.window_config.height);
                match WindowRenderer::new(window, w, h) {
                    Ok(renderer) => {
                        self.renderer = Some(renderer);
                        info!("Window created successfully");
                    }
                    Err(e) => {
                        error!("Failed to create renderer: {}", e);
                        event_loop.exit();
                    }
                }
            }
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Character("r") | Key::Character("R") => {
                        if let Err(e) = self.reset() {
                            error!("Reset failed: {}", e);
                        }
                    }
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                    self.needs_present = true;
                }
            }
            WindowEvent::RedrawRequested => {
                if self.pacer.due(Instant::now()) {
                    if self.args.limit_reached(self.simulation.generation()) {
                        info!("Reached {} generations", self.simulation.generation());
                        event_loop.exit();
                        return;
                    }
                    if let Err(e) = self.advance() {
                        error!("Tick failed: {}", e);
                        event_loop.exit();
                        return;
                    }
                }
                self.draw();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Life(args) => {
            let config = args.resolve_config()?;
            info!("Starting Lifeshade...");
            match args.output {
                OutputMode::Window => run_window_mode(args, &config)?,
                OutputMode::Headless => run_headless_mode(args, &config)?,
            }
        }
        Command::Edges { input, output } => run_edges(&input, &output)?,
    }

    Ok(())
}

/// Run in window output mode (default).
fn run_window_mode(args: LifeArgs, config: &Config) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = LifeApp::new(args, config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Run without a window until interrupted or the generation limit is hit.
fn run_headless_mode(args: LifeArgs, config: &Config) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received interrupt signal, shutting down...");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut simulation = build_simulation(config)?;
    let mut snapshots = args.snapshots()?;
    if let Some(out) = &mut snapshots {
        out.present(simulation.current(), 0)?;
    }

    let pacer = FramePacer::new(config.fps);
    let mut rate = RateCounter::default();
    info!("Running headless at {} generations/s", config.fps);

    while running.load(Ordering::SeqCst) && !args.limit_reached(simulation.generation()) {
        let frame_start = Instant::now();

        simulation.tick()?;
        let generation = simulation.generation();
        if let Some(out) = &mut snapshots {
            out.present(simulation.current(), generation)?;
        }

        let now = Instant::now();
        if let Some(rate) = rate.record(now) {
            debug!(
                "[Perf] {:.2} generations/s (generation {}, population {})",
                rate,
                generation,
                simulation.population()
            );
        }

        if let Some(rest) = pacer.remaining(frame_start, Instant::now()) {
            thread::sleep(rest);
        }
    }

    info!(
        "Stopped at generation {} (population {})",
        simulation.generation(),
        simulation.population()
    );
    if let Some(out) = &snapshots {
        info!("Wrote {} snapshots to {:?}", out.written(), out.dir());
    }
    Ok(())
}

/// Filter one image through the Sobel operator.
fn run_edges(input: &Path, output: &Path) -> Result<()> {
    let frame = Frame::open(input)?;
    if frame.width == 0 || frame.height == 0 {
        return Err(anyhow!("Image {:?} is empty", input));
    }
    info!("Loaded {:?} ({}x{})", input, frame.width, frame.height);

    let start = Instant::now();
    let edges = filter::sobel(&frame);
    debug!("[Perf] Sobel filter: {:?}", start.elapsed());

    edges.save(output)?;
    info!("Wrote edges to {:?}", output);
    Ok(())
}
