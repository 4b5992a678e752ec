#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::Write;

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use log::{info, warn};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, Rng, SeedableRng};
#[cfg(feature = "std")]
use tictactoe::{
    init_logging,
    player::{read_line, stdin_input, SharedInput},
    AiPlayer, CliPlayer, Game, GameView, NetConfig, Outcome, Player, RemotePlayer, Session,
    Symbol, TerminalView, TurnCoordinator, DEFAULT_PORT,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Cpu,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Two players taking turns at this terminal.
    Local,
    /// Play X against the computer.
    Cpu {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Host a networked game and wait for one opponent to connect.
    Host {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Symbol to play; picked at random when omitted.
        #[arg(long, value_parser = parse_symbol)]
        symbol: Option<Symbol>,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Exchange display names with the opponent (both sides must pass it).
        #[arg(long)]
        name: Option<String>,
    },
    /// Join a game hosted at ADDRESS (an IPv4/IPv6 literal, prompted for when omitted).
    Join {
        address: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long)]
        name: Option<String>,
    },
}

#[cfg(feature = "std")]
fn parse_symbol(s: &str) -> Result<Symbol, String> {
    let mut chars = s.trim().chars();
    match (chars.next().and_then(Symbol::from_char), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(format!("'{}' is not a symbol, use X or O", s)),
    }
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
#[cfg(feature = "std")]
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl-C handling unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(feature = "std")]
async fn prompt(input: &SharedInput, text: &str) -> anyhow::Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    // The default Ctrl-C handler is gone once a game has started.
    tokio::select! {
        line = read_line(input) => Ok(line?.map(|line| line.trim().to_string())),
        _ = interrupted() => Ok(None),
    }
}

#[cfg(feature = "std")]
async fn play_again(input: &SharedInput) -> anyhow::Result<bool> {
    let answer = prompt(input, "Play again? (y/n): ").await?;
    Ok(matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")))
}

#[cfg(feature = "std")]
async fn play(game: &mut Game, view: &mut dyn GameView) -> Outcome {
    game.play_until(view, interrupted()).await
}

#[cfg(feature = "std")]
fn local_seat(player: PlayerType, name: &str, input: &SharedInput, rng: &mut SmallRng) -> Box<dyn Player> {
    match player {
        PlayerType::Human => Box::new(CliPlayer::shared(name, input.clone())),
        PlayerType::Cpu => Box::new(AiPlayer::new(SmallRng::from_rng(rng))),
    }
}

#[cfg(feature = "std")]
async fn run_networked(session: Session, player: PlayerType, input: &SharedInput, rng: &mut SmallRng) {
    let local = session.local();
    println!("You are playing {}.", local);
    let turns = session.turns();
    let me = local_seat(player, "You", input, rng);
    let them: Box<dyn Player> = Box::new(RemotePlayer::new(session));
    let (x, o) = match local {
        Symbol::X => (me, them),
        Symbol::O => (them, me),
    };
    let mut game = Game::new(turns, x, o);
    let mut view = TerminalView::new(Some(local));
    play(&mut game, &mut view).await;
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let input = stdin_input();

    match cli.command {
        Commands::Local => {
            let x = Box::new(CliPlayer::shared("Player X", input.clone()));
            let o = Box::new(CliPlayer::shared("Player O", input.clone()));
            let mut game = Game::new(TurnCoordinator::new(Symbol::X), x, o);
            let mut view = TerminalView::new(None);
            loop {
                let outcome = play(&mut game, &mut view).await;
                if matches!(outcome, Outcome::Aborted) || !play_again(&input).await? {
                    break;
                }
                game.new_game();
            }
        }
        Commands::Cpu { seed } => {
            let mut rng = make_rng(seed);
            let human = Box::new(CliPlayer::shared("You", input.clone()));
            let cpu = Box::new(AiPlayer::new(SmallRng::from_rng(&mut rng)));
            let turns = TurnCoordinator::new(Symbol::X).with_local(Symbol::X);
            let mut game = Game::new(turns, human, cpu);
            let mut view = TerminalView::new(Some(Symbol::X));
            loop {
                let first = if rng.random_bool(0.5) { Symbol::X } else { Symbol::O };
                game.restart_with(first);
                match first {
                    Symbol::X => println!("You go first."),
                    Symbol::O => println!("The CPU goes first."),
                }
                let outcome = play(&mut game, &mut view).await;
                if matches!(outcome, Outcome::Aborted) || !play_again(&input).await? {
                    break;
                }
            }
        }
        Commands::Host {
            port,
            symbol,
            player,
            seed,
            name,
        } => {
            let mut rng = make_rng(seed);
            let local = symbol.unwrap_or_else(|| {
                if rng.random_bool(0.5) {
                    Symbol::X
                } else {
                    Symbol::O
                }
            });
            let config = NetConfig::default().with_port(port).with_name(name);
            let listener = Session::listen(&config)
                .await
                .with_context(|| format!("could not listen on port {}", port))?;
            let reachable = Session::advertised_addr(&listener)
                .await
                .context("could not read the listening address")?;
            println!("Your IP is: {}.", reachable.ip());
            println!("Waiting for a player to connect on port {}...", reachable.port());
            let session = Session::accept(&listener, local, &config)
                .await
                .context("opponent failed to join")?;
            println!("Player connected!");
            run_networked(session, player, &input, &mut rng).await;
        }
        Commands::Join {
            address,
            port,
            player,
            seed,
            name,
        } => {
            let mut rng = make_rng(seed);
            let config = NetConfig::default().with_port(port).with_name(name);
            let mut address = address;
            let session = loop {
                let host = match address.take() {
                    Some(host) => host,
                    None => match prompt(&input, "Enter host IP address: ").await? {
                        Some(host) => host,
                        None => return Ok(()),
                    },
                };
                println!("Connecting to {}:{}...", host, port);
                match Session::join(&host, &config).await {
                    Ok(session) => break session,
                    Err(e) if e.is_recoverable() => {
                        info!("join attempt failed: {}", e);
                        println!("{}. Please try again.", e);
                    }
                    Err(e) => return Err(e).context("could not join the game"),
                }
            };
            println!("Connected successfully!");
            run_networked(session, player, &input, &mut rng).await;
        }
    }
    Ok(())
}
