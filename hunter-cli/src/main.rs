mod autoplay;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use autoplay::{AutoplayStrategy, run_autoplay};
use hunter_game::session::GAME_OVER;
use hunter_game::{Command, Difficulty, GameConfig, GameSession, Item, SessionStatus, ShopMode};
use report::{RunReport, generate_console_report, generate_json_report};

#[derive(Debug, Parser)]
#[command(name = "hunter-cli", version = "0.1.0")]
#[command(
    about = "Treasure Hunter - roam from town to town in search of the crown, the trophy and the gem"
)]
struct Args {
    /// Hunter name (prompted when omitted in interactive play)
    #[arg(long)]
    name: Option<String>,

    /// Difficulty: normal, hard or easy (prompted when omitted in interactive play)
    #[arg(long)]
    mode: Option<Difficulty>,

    /// Start with every item and extra gold
    #[arg(long)]
    test_kit: bool,

    /// Seed for every random draw; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let a policy play for at most this many turns
    #[arg(long, value_name = "TURNS")]
    autoplay: Option<u32>,

    /// Autoplay strategy
    #[arg(long, value_enum, default_value_t = AutoplayStrategy::Explorer)]
    strategy: AutoplayStrategy,

    /// Autoplay report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the autoplay report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Include the turn-by-turn log in console reports
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("session seed {seed}");

    if let Some(max_turns) = args.autoplay {
        return run_autoplay_mode(&args, config, seed, max_turns);
    }

    let mut input = stdin().lock();
    let mut out = stdout().lock();
    play_interactive(&args, config, seed, &mut input, &mut out)
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    GameConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn announce_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Welcome to {}!", "TREASURE HUNTER".bright_cyan().bold())?;
    writeln!(out, "Going hunting for the big treasure, eh?")?;
    Ok(())
}

fn run_autoplay_mode(args: &Args, config: GameConfig, seed: u64, max_turns: u32) -> Result<()> {
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| args.strategy.label().to_string());
    let difficulty = args.mode.unwrap_or_default();
    let mut session =
        GameSession::new(name, difficulty, seed, config).context("invalid game configuration")?;
    if args.test_kit {
        session.enable_test_kit();
    }

    let mut policy = args.strategy.create_policy(seed);
    let turns = run_autoplay(&mut session, policy.as_mut(), max_turns);
    let report = RunReport {
        strategy: args.strategy,
        max_turns,
        summary: session.summary(),
        turns,
    };
    if report.hit_turn_limit() {
        log::info!("autoplay stopped at the {max_turns}-turn limit");
    }

    let mut out = report_writer(args.output.as_deref())?;
    if args.report == "json" {
        generate_json_report(&mut out, &report)?;
    } else {
        announce_banner(&mut out)?;
        generate_console_report(&mut out, &report, args.verbose)?;
    }
    out.flush()?;
    Ok(())
}

fn play_interactive(
    args: &Args,
    config: GameConfig,
    seed: u64,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    announce_banner(out)?;

    let name = match &args.name {
        Some(name) => name.clone(),
        None => {
            let typed = prompt(input, out, "What's your name, Hunter? ")?.unwrap_or_default();
            if typed.is_empty() {
                "Hunter".to_string()
            } else {
                typed
            }
        }
    };

    let (difficulty, typed_test) = match args.mode {
        Some(mode) => (mode, false),
        None => ask_difficulty(input, out)?,
    };

    let mut session =
        GameSession::new(name, difficulty, seed, config).context("invalid game configuration")?;
    if args.test_kit || typed_test {
        session.enable_test_kit();
    }

    loop {
        writeln!(out)?;
        if let Some(departure) = session.departure_news() {
            writeln!(out, "{departure}")?;
        }
        writeln!(out, "{}", session.latest_news())?;
        if session.status().is_over() {
            break;
        }

        writeln!(out, "***")?;
        writeln!(out, "{}", session.hunter())?;
        writeln!(out, "{}", session.town())?;
        show_menu(out)?;

        let Some(line) = prompt(input, out, "What's your next move? ")? else {
            session.apply(Command::Exit);
            continue;
        };
        match Command::parse(&line) {
            Some(Command::Shop { mode, pick: None }) => {
                let pick = pick_item(&session, mode, input, out)?;
                session.apply(Command::Shop { mode, pick });
            }
            Some(command) => {
                session.apply(command);
            }
            None => {
                session.apply_input(&line);
            }
        }
    }

    if session.status() == SessionStatus::Bankrupt {
        writeln!(out, "{}", GAME_OVER.red())?;
    }
    out.flush()?;
    Ok(())
}

fn ask_difficulty(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(Difficulty, bool)> {
    let hard = prompt(input, out, "Hard mode? (y/n): ")?
        .unwrap_or_default()
        .to_lowercase();
    if hard == "y" {
        return Ok((Difficulty::Hard, false));
    }
    let typed_test = hard == "test";
    let easy = prompt(input, out, "Easy mode? (y/n): ")?
        .unwrap_or_default()
        .to_lowercase();
    let difficulty = if easy == "y" {
        Difficulty::Easy
    } else {
        Difficulty::Normal
    };
    Ok((difficulty, typed_test))
}

fn show_menu(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "(B)uy something at the shop.")?;
    writeln!(out, "(S)ell something at the shop.")?;
    writeln!(out, "(M)ove on to a different town.")?;
    writeln!(out, "(L)ook for trouble!")?;
    writeln!(out, "(D)ig for gold!")?;
    writeln!(out, "(H)unt for treasure!")?;
    writeln!(out, "Give up the hunt and e(X)it.")?;
    writeln!(out)?;
    Ok(())
}

/// Show the price list and ask for one item. Blank or unknown input walks out.
fn pick_item(
    session: &GameSession,
    mode: ShopMode,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<Item>> {
    let shop = session.town().shop();
    let heading = match mode {
        ShopMode::Buy => "Here's what we've got for sale:",
        ShopMode::Sell => "Here's what we'll pay for your gear:",
    };
    writeln!(out, "{}", heading.yellow())?;
    for (item, price) in shop.listing(mode) {
        writeln!(out, "  {:<8} {price} gold", item.label())?;
    }
    let question = match mode {
        ShopMode::Buy => "What're you lookin' to buy? ",
        ShopMode::Sell => "What're you lookin' to sell? ",
    };
    let Some(answer) = prompt(input, out, question)? else {
        return Ok(None);
    };
    if answer.is_empty() {
        return Ok(None);
    }
    match answer.parse::<Item>() {
        Ok(item) => Ok(Some(item)),
        Err(err) => {
            writeln!(out, "{}", err.to_string().yellow())?;
            Ok(None)
        }
    }
}

/// Print `question` and read one trimmed line; `None` at end of input.
fn prompt(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Buffered destination for an autoplay report: the `--output` file, or stdout.
fn report_writer(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };
    Ok(BufWriter::new(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn base_args() -> Args {
        Args {
            name: None,
            mode: None,
            test_kit: false,
            seed: Some(1337),
            config: None,
            autoplay: None,
            strategy: AutoplayStrategy::Explorer,
            report: "console".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn play(args: &Args, script: &str) -> String {
        colored::control::set_override(false);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        play_interactive(args, GameConfig::default(), 1337, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn interactive_prompts_then_exits() {
        let text = play(&base_args(), "Ivan\nn\nn\nz\nx\n");
        assert!(text.contains("What's your name, Hunter?"));
        assert!(text.contains("Welcome to town, Ivan."));
        assert!(text.contains("(H)unt for treasure!"));
        assert!(text.contains("Yikes! That's an invalid option! Try again."));
        assert!(text.contains("Fare thee well, Ivan!"));
    }

    #[test]
    fn typing_test_at_hard_prompt_grants_kit() {
        let text = play(&base_args(), "Tess\ntest\ny\ns\nsword\nd\nx\n");
        assert!(text.contains("Easy mode? (y/n)"));
        assert!(text.contains("Tess has 100 gold"));
        assert!(text.contains("You sold your Sword for 10 gold."));
        assert!(text.contains("You dug"));
    }

    #[test]
    fn shop_visit_lists_prices_and_trades() {
        let args = Args {
            name: Some("Ivan".to_string()),
            mode: Some(Difficulty::Normal),
            ..base_args()
        };
        let text = play(&args, "b\nrope\ns\n\nx\n");
        assert!(text.contains("Here's what we've got for sale:"));
        assert!(text.contains("Ye' got yerself a Rope for 4 gold. Come again soon."));
        assert!(text.contains("You have left the shop."));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let args = Args {
            name: Some("Ivan".to_string()),
            mode: Some(Difficulty::Easy),
            ..base_args()
        };
        let text = play(&args, "");
        assert!(text.contains("Fare thee well, Ivan!"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/hunter.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn report_writer_fills_the_output_file() {
        let path = std::env::temp_dir().join(format!("hunter-report-{}.txt", std::process::id()));
        let mut out = report_writer(Some(&path)).unwrap();
        writeln!(out, "turns: 3").unwrap();
        out.flush().unwrap();
        drop(out);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "turns: 3\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn report_writer_rejects_a_missing_directory() {
        let Err(err) = report_writer(Some(Path::new("/nonexistent/dir/report.json"))) else {
            panic!("a missing directory should not yield a writer");
        };
        assert!(err.to_string().contains("failed to create"));
    }

    #[test]
    fn no_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
