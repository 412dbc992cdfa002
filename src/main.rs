mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::app::App;
use flappy::config::AppConfig;
use flappy::constants::{DEFAULT_LEADERBOARD_LIMIT, TICK_MS};
use flappy::input::map_key;
use flappy::leaderboard::LeaderboardService;
use flappy::logging;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Play { offline: bool, wide_gap: bool },
    Scores { limit: usize },
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut offline = false;
    let mut wide_gap = false;
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--offline" => offline = true,
            "--wide-gap" => wide_gap = true,
            "scores" => {
                let limit = match iter.next() {
                    Some(n) => n
                        .parse()
                        .map_err(|_| format!("Invalid score count: {}", n))?,
                    None => DEFAULT_LEADERBOARD_LIMIT,
                };
                return Ok(Command::Scores { limit });
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Play { offline, wide_gap })
}

fn print_help() {
    println!("Flappy - terminal Flappy Bird with a global leaderboard\n");
    println!("Usage: flappy [OPTIONS] [COMMAND]\n");
    println!("Commands:");
    println!("  scores [N]   Print the top N scores (default {})\n", DEFAULT_LEADERBOARD_LIMIT);
    println!("Options:");
    println!("  --offline    Keep scores in ~/.flappy/leaderboard.json");
    println!("  --wide-gap   Wider pipe gaps (touch-screen layout)");
    println!("  --version    Show version information");
    println!("  --help       Show this help message\n");
    println!("Environment:");
    println!("  SUPABASE_URL, SUPABASE_SERVICE_ROLE_KEY (or SUPABASE_ANON_KEY)");
    println!("  FLAPPY_LOG   Log filter, e.g. debug (logs go to ~/.flappy/flappy.log)");
}

fn print_scores(limit: usize) {
    logging::init_stderr();
    let service = LeaderboardService::from_config(&AppConfig::load());
    let entries = service.fetch_top_scores(limit);

    if entries.is_empty() {
        println!("No scores yet");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>6}  {}",
            i + 1,
            entry.username,
            entry.score,
            entry.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let (offline, wide_gap) = match parse_args(&args) {
        Ok(Command::Play { offline, wide_gap }) => (offline, wide_gap),
        Ok(Command::Scores { limit }) => {
            print_scores(limit);
            std::process::exit(0);
        }
        Ok(Command::Version) => {
            println!("flappy {}", VERSION);
            std::process::exit(0);
        }
        Ok(Command::Help) => {
            print_help();
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    match logging::init() {
        Ok(path) => tracing::info!(version = VERSION, log = %path.display(), "starting"),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    let mut config = AppConfig::load();
    config.offline |= offline;
    if wide_gap {
        config.game = config.game.with_wide_gap();
    }

    let service = Arc::new(LeaderboardService::from_config(&config));
    let mut app = App::new(config.game, service);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    tracing::info!("exiting");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let started = Instant::now();
    let mut last_frame = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key, app.state()) {
                    app.handle_input(input, started.elapsed().as_millis() as u64);
                }
            }
        }

        let now = Instant::now();
        app.update(now.duration_since(last_frame).as_millis() as u64);
        last_frame = now;
    }

    Ok(())
}
