use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diamond_heist_core::*;

mod autoplay;
mod config;

use config::SimConfig;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print board size, boss flag and bomb count per level
    Curve {
        #[arg(short, long, default_value_t = 40)]
        max_level: Level,
    },
    /// Generate and print the board for one level
    Board {
        #[arg(short, long)]
        level: Level,

        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Measure rarity rates over many bomb-free boards
    Rarity {
        #[arg(short, long, default_value_t = 100)]
        boards: u32,

        #[arg(long, default_value_t = 10)]
        size: Coord,

        /// Use boss-level odds
        #[arg(long)]
        boss: bool,

        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play seeded games with a fixed policy and print the resulting profile
    Autoplay {
        /// TOML file with simulation settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        games: Option<u32>,

        /// Cash out after this many diamonds on a board
        #[arg(long)]
        cash_out_after: Option<u32>,

        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match args.command {
        Command::Curve { max_level } => print_curve(max_level),
        Command::Board { level, seed } => print_board(level, seed_or_clock(seed)),
        Command::Rarity {
            boards,
            size,
            boss,
            seed,
        } => print_rarity(boards, size, boss, seed_or_clock(seed)),
        Command::Autoplay {
            config,
            games,
            cash_out_after,
            seed,
            json,
        } => {
            let mut sim = match config {
                Some(path) => SimConfig::load(&path)?,
                None => SimConfig::default(),
            };
            if let Some(games) = games {
                sim.games = games;
            }
            if let Some(cash_out_after) = cash_out_after {
                sim.cash_out_after = cash_out_after;
            }
            let sim = sim.validate()?;
            let seed = seed_or_clock(seed.or(sim.seed));
            let today = chrono::Local::now().date_naive();
            let report = autoplay::run(&sim, seed, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
    }
}

fn seed_or_clock(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::debug!("seed: {}", seed);
    seed
}

fn print_curve(max_level: Level) -> Result<()> {
    println!("{:>5} {:>4} {:>4} {:>5}", "level", "size", "boss", "bombs");
    for level in 1..=max_level {
        let plan = LevelPlan::for_level(level)
            .with_context(|| format!("Level {} has no plan", level))?;
        println!(
            "{:>5} {:>4} {:>4} {:>5}",
            plan.level,
            plan.board_size,
            if plan.is_boss { "yes" } else { "" },
            plan.bombs
        );
    }
    Ok(())
}

fn print_board(level: Level, seed: u64) -> Result<()> {
    let config = BoardConfig::for_level(level).context("Invalid level")?;
    let board = RandomBoardGenerator::new(SeededRandom::new(seed))
        .generate(config)
        .context("Board generation failed")?;
    let counts = board.kind_counts();
    println!(
        "level {} ({}x{}{}), seed {}",
        level,
        config.size,
        config.size,
        if config.is_boss { ", boss" } else { "" },
        seed
    );
    println!("{}", board);
    println!(
        "bombs {}, diamonds {}, rare {}, super {}",
        counts.bombs, counts.diamonds, counts.rare_diamonds, counts.super_diamonds
    );
    Ok(())
}

fn print_rarity(boards: u32, size: Coord, boss: bool, seed: u64) -> Result<()> {
    let mut rng = SeededRandom::new(seed);
    // (cells, rare, super)
    let mut totals = (0u64, 0u64, 0u64);
    for _ in 0..boards {
        let counts = generate_board(size, 0, boss, &mut rng)
            .context("Board generation failed")?
            .kind_counts();
        totals.0 += u64::from(counts.all_diamonds());
        totals.1 += u64::from(counts.rare_diamonds);
        totals.2 += u64::from(counts.super_diamonds);
    }

    let (cells, rare, super_) = totals;
    let expected = RarityOdds::for_board(boss);
    let percent = |count: u64| 100.0 * count as f64 / cells.max(1) as f64;
    println!("{} cells over {} boards, seed {}", cells, boards, seed);
    println!(
        "super {:>6.2}% (expected {:.2}%)",
        percent(super_),
        100.0 * expected.super_below
    );
    println!(
        "rare  {:>6.2}% (expected {:.2}%)",
        percent(rare),
        100.0 * (expected.rare_below - expected.super_below)
    );
    Ok(())
}

fn print_report(report: &autoplay::AutoplayReport) {
    let profile = &report.profile;
    println!("seed {}", report.seed);
    println!(
        "games {} (cashed out {}, lost {}), highest level {}",
        report.games, report.cashed_out, report.lost, report.highest_level
    );
    println!(
        "total score {}, rewards claimed {}, best {}",
        profile.total_score,
        report.rewards_claimed,
        report.high_scores.best().unwrap_or_default()
    );
    println!(
        "player level {} ({} xp, {} to next), diamonds {}",
        profile.level,
        profile.xp,
        profile.xp_to_next_level(),
        profile.diamonds_collected
    );
    let skins: Vec<&str> = profile.unlocked_skins.iter().collect();
    println!("skins: {}", skins.join(", "));
    for achievement in profile.achievements.iter().filter(|a| a.unlocked) {
        println!("{} {}", achievement.icon, achievement.title);
    }
}
