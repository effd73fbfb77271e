use subcarousel::clock::{frame_interval, Clock, MediaClock};
use subcarousel::serialiser;
use subcarousel::terminal::TerminalRenderer;
use subcarousel::{Change, Config, MediaKind, Session};

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use log::info;

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Play SRT subtitles as a scrolling five-line carousel")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The subtitle file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "TEXT",
        help = "The media label shown in the title. Defaults to the input file name."
    )]
    label: Option<String>,
    #[arg(long, help = "Treat the media as video. The label still comes from --label when given.")]
    video: bool,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Start playback at the given position.",
        default_value_t = 0.0
    )]
    start: f64,
    #[arg(long, value_name = "RATE", help = "Playback rate, overriding the configured one.")]
    speed: Option<f64>,
    #[arg(long, help = "Print the caption groups instead of playing them.")]
    groups: bool,
    #[arg(short, long, value_name = "FILE", help = "Read configuration from the given file.")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Log carousel transitions.")]
    verbose: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let mut session = Session::new(&config);
    if session.load_track(&data) == 0 {
        return Err(anyhow!("You appear to have supplied an empty file."));
    }

    if cli.groups {
        serialiser::serialise(session.engine().track().groups(), io::stdout())?;
        return Ok(());
    }

    let kind = if cli.video {
        MediaKind::Video
    } else {
        MediaKind::Audio
    };
    session.load_media(kind, &media_file_name(&cli.input), None);
    if let Some(label) = &cli.label {
        session.set_media_label(label);
    }

    play(&mut session, &config, cli.start, cli.speed.unwrap_or(config.playback_rate))
}

/// The file name the media label falls back to. Standard input is `stdin`.
fn media_file_name(input: &str) -> String {
    if input == "-" {
        return "stdin".to_string();
    }
    Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdin".to_string())
}

/// Plays the track against the wall clock until the last caption has ended.
fn play(session: &mut Session, config: &Config, start: f64, rate: f64) -> Result<()> {
    if !(rate > 0.0) {
        return Err(anyhow!("The playback rate must be positive, got {}", rate));
    }

    let mut clock = MediaClock::new();
    clock.set_rate(rate);
    clock.seek(start);

    let mut renderer = TerminalRenderer::from_env();
    let mut stdout = io::stdout();
    let end = session.engine().track().duration();
    let interval = frame_interval(config.tick_interval_ms);

    session.time_changed(clock.current_time(), &mut renderer);
    session.play();
    clock.play();
    renderer.draw(&mut stdout, &session.title_line(), clock.current_time())?;
    info!("Playing from {:.3}s to {:.3}s at {}x", start, end, rate);

    while clock.current_time() <= end {
        if session.tick(&clock, &mut renderer) != Change::NoChange {
            renderer.draw(&mut stdout, &session.title_line(), clock.current_time())?;
        }
        std::thread::sleep(interval);
    }

    clock.pause();
    session.pause();
    renderer.draw(&mut stdout, &session.title_line(), clock.current_time())?;
    Ok(())
}
