use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;
use tictactoe::{
    AiPlayer, Game, GameResult, InMemoryTransport, NullView, Outcome, Player, RemotePlayer,
    Session, Symbol,
};

fn seat(session: Session, rng: SmallRng) -> Game {
    let local = session.local();
    let turns = session.turns();
    let me: Box<dyn Player> = Box::new(AiPlayer::new(rng));
    let them: Box<dyn Player> = Box::new(RemotePlayer::new(session));
    match local {
        Symbol::X => Game::new(turns, me, them),
        Symbol::O => Game::new(turns, them, me),
    }
}

fn result_name(outcome: &Outcome) -> anyhow::Result<&'static str> {
    match outcome.result() {
        Some(GameResult::Winner(Symbol::X)) => Ok("X"),
        Some(GameResult::Winner(Symbol::O)) => Ok("O"),
        Some(GameResult::Tie) => Ok("tie"),
        _ => anyhow::bail!("game did not finish: {:?}", outcome),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tictactoe::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let rng2 = SmallRng::seed_from_u64(seed2);
    let host_symbol = if rng1.random_bool(0.5) { Symbol::X } else { Symbol::O };

    let (t1, t2) = InMemoryTransport::pair();
    let (host, joiner) = tokio::try_join!(
        Session::negotiate_host(Box::new(t1), host_symbol, None),
        Session::negotiate_join(Box::new(t2), None),
    )?;

    let mut host_game = seat(host, rng1);
    let mut join_game = seat(joiner, rng2);
    let mut host_view = NullView;
    let mut join_view = NullView;
    let (host_outcome, join_outcome) = tokio::join!(
        host_game.play(&mut host_view),
        join_game.play(&mut join_view),
    );

    let result = result_name(&host_outcome)?;
    anyhow::ensure!(
        result == result_name(&join_outcome)?,
        "peers disagree: {:?} vs {:?}",
        host_outcome,
        join_outcome
    );

    let summary = json!({
        "host": host_symbol,
        "joiner": host_symbol.opponent(),
        "result": result,
        "moves": host_game.moves(),
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
