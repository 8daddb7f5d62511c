#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use nonaga::{
    init_logging, play_local, transport::in_memory::InMemoryTransport, ui, AiPlayer, CliPlayer,
    GameDocument, Player, PlayerId, PlayerNode, Replica, SessionEnd,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Hot-seat game in the terminal.
    Local {
        /// Let the AI play the second seat.
        #[arg(long)]
        vs_ai: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Stop after this many turns")]
        max_turns: Option<u32>,
    },
    /// AI vs AI in one process; prints a JSON summary.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
        #[arg(long, default_value_t = 1)]
        games: u32,
    },
    /// Two AI replicas exchanging snapshots in memory; prints a JSON summary.
    Replicated {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn end_json(end: SessionEnd) -> serde_json::Value {
    match end {
        SessionEnd::Won(p) => serde_json::json!({"result": "won", "player": p.number()}),
        SessionEnd::TurnLimit => serde_json::json!({"result": "turn_limit"}),
        SessionEnd::Resigned(p) => serde_json::json!({"result": "resigned", "player": p.number()}),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            vs_ai,
            seed,
            max_turns,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            let second: Box<dyn Player> = if vs_ai {
                Box::new(AiPlayer::new())
            } else {
                Box::new(CliPlayer::new())
            };
            let mut players: [Box<dyn Player>; 2] = [Box::new(CliPlayer::new()), second];
            let finished = play_local(&mut players, &mut rng, max_turns)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            ui::print_state(&finished.state, &[]);
            match finished.end {
                SessionEnd::Won(p) => println!("\nPlayer {} wins after {} turns.", p.number(), finished.turns),
                SessionEnd::TurnLimit => println!("\nTurn limit reached after {} turns.", finished.turns),
                SessionEnd::Resigned(p) => println!("\nPlayer {} left the game.", p.number()),
            }
        }
        Commands::Sim {
            seed,
            max_turns,
            games,
        } => {
            let mut rng = make_rng(seed);
            let mut results = Vec::new();
            let mut wins = [0u32; 2];
            for game in 0..games {
                let mut players: [Box<dyn Player>; 2] =
                    [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())];
                let finished = play_local(&mut players, &mut rng, Some(max_turns))
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                if let SessionEnd::Won(p) = finished.end {
                    wins[usize::from(p.number() - 1)] += 1;
                }
                results.push(serde_json::json!({
                    "game": game,
                    "turns": finished.turns,
                    "end": end_json(finished.end),
                    "final": GameDocument::from(&finished.state),
                }));
            }
            let summary = serde_json::json!({
                "seed": seed,
                "games": games,
                "wins": {"1": wins[0], "2": wins[1]},
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Replicated { seed, max_turns } => {
            let mut rng1 = make_rng(seed);
            let mut rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));
            let (t1, t2) = InMemoryTransport::pair();

            let mut node1 = PlayerNode::new(
                Box::new(AiPlayer::new()),
                Replica::new(Some(PlayerId::One)),
                Box::new(t1),
            )
            .with_max_turns(max_turns);
            let mut node2 = PlayerNode::new(
                Box::new(AiPlayer::new()),
                Replica::new(Some(PlayerId::Two)),
                Box::new(t2),
            )
            .with_max_turns(max_turns);

            let (end1, end2) = tokio::join!(node1.run(&mut rng1, true), node2.run(&mut rng2, false));
            let (end1, end2) = (end1?, end2?);
            let agreed = node1.replica().state() == node2.replica().state();
            let summary = serde_json::json!({
                "seed": seed,
                "ends": [end_json(end1), end_json(end2)],
                "published": [node1.replica().published(), node2.replica().published()],
                "replicas_agree": agreed,
                "final": GameDocument::from(node1.replica().state()),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
