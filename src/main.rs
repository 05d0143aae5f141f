use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;
use tokio::runtime::Builder as TokioRuntimeBuilder;
use tracing::{info, warn};

use showcase::config::{CarouselConfig, SlideshowConfig, TransitionTiming};
use showcase::models::{MediaSet, ScanConfig};
use showcase::presenter::{ChannelPresenter, Offset, Surface, SurfaceOp, TransitionDriver};
use showcase::shell::{Reply, ShellCommand, HELP};
use showcase::slideshow::{Autoplay, Cursor, SlidePresenter, Slideshow};
use showcase::CarouselController;

struct Args {
    dir: PathBuf,
    recursive: bool,
    autoplay: bool,
}

fn parse_args() -> Result<Args> {
    let mut dir: Option<PathBuf> = None;
    let mut recursive = false;
    let mut autoplay = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--recursive" | "-r" => recursive = true,
            "--autoplay" => autoplay = true,
            "--help" | "-h" => {
                println!("usage: showcase [--recursive] [--autoplay] <dir>\n{HELP}");
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => bail!("Unknown option {arg}"),
            _ => {
                if dir.replace(PathBuf::from(&arg)).is_some() {
                    bail!("Only one media directory may be given");
                }
            }
        }
    }

    let dir = dir.context(
        "Missing media directory (usage: showcase [--recursive] [--autoplay] <dir>)",
    )?;
    Ok(Args {
        dir,
        recursive,
        autoplay,
    })
}

/// Prints surface operations as they would be drawn.
struct TerminalSurface;

impl Surface for TerminalSurface {
    fn apply(&mut self, op: SurfaceOp) {
        let line = match op {
            SurfaceOp::ShowItem(item) => format!("show    {item}"),
            SurfaceOp::Indicator {
                one_based_index,
                total,
            } => format!("counter {one_based_index} / {total}"),
            SurfaceOp::Transform {
                offset,
                opacity,
                animated,
            } => {
                let offset = match offset {
                    Offset::Neutral => "neutral".to_string(),
                    Offset::Drag { axis, pixels } => format!("{axis:?} {pixels:+.0}px"),
                    Offset::OffScreen(direction) => format!("off-screen {direction:?}"),
                };
                let mode = if animated { "animated" } else { "instant" };
                format!("move    {offset} opacity {opacity:.2} ({mode})")
            }
            SurfaceOp::ScrollLocked(locked) => {
                format!("scroll  {}", if locked { "locked" } else { "unlocked" })
            }
            SurfaceOp::ModalVisible(visible) => {
                format!("modal   {}", if visible { "shown" } else { "hidden" })
            }
        };
        println!("  | {line}");
    }
}

struct TerminalSlides;

impl SlidePresenter for TerminalSlides {
    fn show_slide(&mut self, index: usize) {
        println!("  * hero slide {}", index + 1);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        println!("  * hero cursor {cursor:?}");
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let scan_config = ScanConfig {
        recursive: args.recursive,
        ..ScanConfig::default()
    };
    let media = MediaSet::scan(&args.dir, &scan_config)
        .with_context(|| format!("Failed to read media from {:?}", args.dir))?;
    if media.is_empty() {
        warn!(dir = ?args.dir, "No images found; the viewer will ignore every command");
    }

    let runtime = TokioRuntimeBuilder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;
    let guard = runtime.enter();

    let (presenter, commands) = ChannelPresenter::new();
    let driver = TransitionDriver::new(TerminalSurface, TransitionTiming::from_env());
    runtime.spawn(driver.run(commands));

    let slide_count = media.len();
    let autoplay = args.autoplay.then(|| {
        let hero = Arc::new(Mutex::new(Slideshow::with_config(
            slide_count,
            SlideshowConfig::from_env(),
            TerminalSlides,
        )));
        Autoplay::start(hero)
    });

    let mut carousel = CarouselController::with_config(
        media.into_items(),
        CarouselConfig::from_env(),
        presenter,
    );
    info!(items = carousel.len(), "Viewer ready");
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ShellCommand>() {
            Ok(command) => match command.apply(&mut carousel) {
                Reply::Continue => {}
                Reply::Print(text) => println!("{text}"),
                Reply::Quit => break,
            },
            Err(err) => println!("error: {err}"),
        }
        stdout.flush().ok();
    }

    // Dropping the controller closes the command channel and ends the driver.
    drop(carousel);
    drop(autoplay);
    drop(guard);
    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("showcase=info".parse().unwrap()),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("showcase: {err:#}");
        std::process::exit(1);
    }
}
