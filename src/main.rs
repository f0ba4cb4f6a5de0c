use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slider::constants::*;
use slider::scan::load_sorted_image_paths;
use slider::surface::log::LogSurface;
use slider::{KeyboardMode, ProgressBarMode, SlideshowController, SliderOptions};

#[derive(Parser, Debug)]
#[command(name = "slider", version, about = "Cycle through the images of a directory")]
struct Cli {
    /// Directory holding the slides
    image_directory: PathBuf,

    /// TOML file with slideshow options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds each slide is shown
    #[arg(short, long)]
    interval: Option<u64>,

    /// Glob over file names selecting the slides
    #[arg(long)]
    selector: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, value_enum)]
    progress_bar: Option<ProgressBarMode>,

    #[arg(long, value_enum)]
    keyboard: Option<KeyboardMode>,

    /// Do not advance automatically
    #[arg(long)]
    no_autoplay: bool,

    /// Run without a window for this many seconds, logging every slide change
    #[arg(long)]
    headless_secs: Option<u64>,
}

impl Cli {
    fn options(&self) -> Result<SliderOptions> {
        let mut options = match &self.config {
            Some(path) => SliderOptions::load(path)?,
            None => SliderOptions::default(),
        };
        if let Some(interval) = self.interval {
            options.interval_ms = interval;
        }
        if let Some(selector) = &self.selector {
            options.selector = selector.clone();
        }
        if self.width.is_some() {
            options.width = self.width;
        }
        if self.height.is_some() {
            options.height = self.height;
        }
        if let Some(mode) = self.progress_bar {
            options.progress_bar = mode;
        }
        if let Some(mode) = self.keyboard {
            options.keyboard = mode;
        }
        if self.no_autoplay {
            options.auto_play = false;
        }
        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let options = cli.options()?;

    let slides = load_sorted_image_paths(&cli.image_directory, &options.selector_matcher()?)
        .with_context(|| format!("Error loading images from '{}'", cli.image_directory.display()))?;
    info!(dir = %cli.image_directory.display(), slides = slides.len(), "slides loaded");

    match cli.headless_secs {
        Some(secs) => run_headless(slides, options, secs),
        None => run_window(&cli.image_directory, slides, options),
    }
}

fn run_headless(slides: slider::slides::SlideSet<PathBuf>, options: SliderOptions, secs: u64) -> Result<()> {
    let count = slides.len();
    let surface = LogSurface::new(slides, &options);
    let mut controller = SlideshowController::new(surface, count, options)?;

    let budget_ms = headless_budget_ms(secs);
    let mut elapsed_ms = 0;
    while elapsed_ms < budget_ms {
        controller.tick(FRAME_TIME_MS);
        elapsed_ms += FRAME_TIME_MS;
    }
    controller.destroy();
    Ok(())
}

fn headless_budget_ms(secs: u64) -> u64 {
    secs.saturating_mul(1000)
}

#[cfg(not(feature = "window"))]
fn run_window(_dir: &Path, _slides: slider::slides::SlideSet<PathBuf>, _options: SliderOptions) -> Result<()> {
    anyhow::bail!("built without the `window` feature, pass --headless-secs to run without a window")
}

#[cfg(feature = "window")]
fn run_window(dir: &Path, slides: slider::slides::SlideSet<PathBuf>, options: SliderOptions) -> Result<()> {
    use raylib::prelude::*;
    use slider::NavKey;
    use slider::surface::window::RaylibSurface;

    let title = format!("{} - {}", options.element_name("wrapper"), dir.display());
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let surface = RaylibSurface::load(&mut rl, &thread, &slides);
    let count = surface.slide_count();
    let mut controller =
        SlideshowController::new(surface, count, options).context("No slides were created successfully")?;

    const KEYS: [(KeyboardKey, NavKey); 5] = [
        (KeyboardKey::KEY_LEFT, NavKey::Left),
        (KeyboardKey::KEY_UP, NavKey::Up),
        (KeyboardKey::KEY_RIGHT, NavKey::Right),
        (KeyboardKey::KEY_DOWN, NavKey::Down),
        (KeyboardKey::KEY_SPACE, NavKey::Space),
    ];

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = FRAME_TIME_MS;

        let (width, height) = (rl.get_screen_width(), rl.get_screen_height());
        controller.surface_mut().set_viewport(width, height);

        for (key, nav) in KEYS {
            if rl.is_key_pressed(key) {
                controller.handle_key(nav);
            }
        }

        controller.tick(dt);
        controller.surface_mut().update(dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        controller.surface().draw(&mut d);
    }

    controller.destroy();
    Ok(())
}
