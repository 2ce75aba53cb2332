//! Command handlers

use crate::{Cli, Commands};
use anyhow::{Context as _, Result};
use colored::*;
use market_gateway::{
    MarketConfig, MarketGateway, MarketSnapshot, PlayerLockInput, ScheduleMarketGateway,
    StaticMarketGateway,
};
use performance_engine::{
    derive_series, fetch_performance, ppr_points_by_player, PlayerStatSeries, RawStatLine,
    SeriesPerformance, SleeperStatsProvider, StatsConfig,
};
use position_ledger::{
    JsonFileGateway, LedgerConfig, Position, PositionId, PositionLedger, TradeAction,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = LedgerConfig::from_env()?;
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }

    match cli.command {
        Commands::Open { ref player_id, ref name, action, price } => {
            let market = market_gateway(&cli)?.fetch_status().await?;
            let mut ledger = load_ledger(&config).await?;

            let position = ledger.open(player_id, name, action, price, &market).await?;
            info!("Opened position {} on {}", position.id(), position.player_id());
            print_position(&position, cli.json)
        }

        Commands::Close { ref position_id, price } => {
            let market = market_gateway(&cli)?.fetch_status().await?;
            let mut ledger = load_ledger(&config).await?;

            let position =
                ledger.close(&PositionId::from(position_id.as_str()), price, &market).await?;
            info!("Closed position {}", position.id());
            print_position(&position, cli.json)
        }

        Commands::Positions { active } => {
            let ledger = load_ledger(&config).await?;
            let positions: Vec<&Position> = if active {
                ledger.active_positions()
            } else {
                ledger.positions().iter().collect()
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&positions)?);
            } else if positions.is_empty() {
                println!("No positions");
            } else {
                print_table(&positions);
            }
            Ok(())
        }

        Commands::Summary { recent, ref marks } => {
            let ledger = load_ledger(&config).await?;
            let summary = ledger.summary(recent.unwrap_or(config.recent_transactions));
            let unrealized = match marks {
                Some(path) => {
                    let marks: HashMap<String, f64> = read_json(path)?;
                    Some(ledger.total_unrealized_pl(&marks))
                }
                None => None,
            };

            if cli.json {
                let mut value = serde_json::to_value(&summary)?;
                if let (Some(unrealized), Some(object)) = (unrealized, value.as_object_mut()) {
                    object.insert("total_unrealized_pl".to_string(), unrealized.into());
                }
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{} {}", "Realized P/L:".bold(), format_pl(summary.total_realized_pl));
            if let Some(unrealized) = unrealized {
                println!("{} {}", "Unrealized P/L:".bold(), format_pl(unrealized));
            }
            println!("{} {} of {}", "Active:".bold(), summary.active_count, summary.total_count);

            if !summary.recent.is_empty() {
                println!();
                println!("{}", "Recent transactions".bold());
                print_table(&summary.recent.iter().collect::<Vec<_>>());
            }
            Ok(())
        }

        Commands::Performance { ref file, ref player_id } => {
            let performance = match (file, player_id) {
                (Some(path), _) => {
                    let series: PlayerStatSeries = read_json(path)?;
                    series.validate()?;
                    derive_series(&series)
                }
                (None, Some(player_id)) => {
                    let provider = SleeperStatsProvider::new(StatsConfig::from_env()?)?;
                    fetch_performance(&provider, player_id).await?
                }
                (None, None) => anyhow::bail!("either --file or --player-id is required"),
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&performance)?);
            } else {
                print_performance(&performance);
            }
            Ok(())
        }

        Commands::Score { ref file } => {
            let lines: HashMap<String, RawStatLine> = read_json(file)?;
            let points = ppr_points_by_player(&lines);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                let mut ranked: Vec<_> = points.into_iter().collect();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                for (player_id, points) in ranked {
                    println!("{:<12} {:>8.2}", player_id, points);
                }
            }
            Ok(())
        }

        Commands::Market => {
            let snapshot = market_gateway(&cli)?.fetch_status().await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_market(&snapshot, cli.market.is_none())?;
            }
            Ok(())
        }
    }
}

async fn load_ledger(config: &LedgerConfig) -> Result<PositionLedger<JsonFileGateway>> {
    debug!("Using ledger store {}", config.store_path.display());
    Ok(PositionLedger::load(JsonFileGateway::from_config(config)).await?)
}

fn market_gateway(cli: &Cli) -> Result<Box<dyn MarketGateway>> {
    if let Some(path) = &cli.market {
        let gateway = StaticMarketGateway::from_json_file(path)
            .with_context(|| format!("reading market snapshot {}", path.display()))?;
        return Ok(Box::new(gateway));
    }

    let mut gateway = ScheduleMarketGateway::new(MarketConfig::from_env()?)?;
    if let Some(path) = &cli.locks {
        let players: Vec<PlayerLockInput> = read_json(path)?;
        gateway = gateway.with_players(players);
    }
    Ok(Box::new(gateway))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn format_pl(value: f64) -> ColoredString {
    let text = format!("{:+.2}", value);
    if value > 0.0 {
        text.green()
    } else if value < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

fn print_position(position: &Position, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(position)?);
    } else {
        print_table(&[position]);
    }
    Ok(())
}

fn print_table(positions: &[&Position]) {
    println!(
        "{:<38} {:<22} {:<5} {:>9} {:>9} {:>9}",
        "ID", "PLAYER", "SIDE", "ENTRY", "EXIT", "P/L"
    );

    for position in positions {
        let action = match position.action() {
            TradeAction::Buy => "BUY".green(),
            TradeAction::Sell => "SELL".red(),
        };
        let exit = position.exit_price().map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".into());
        let pl = position.realized_pl().map(format_pl).unwrap_or_else(|| "-".normal());

        println!(
            "{:<38} {:<22} {:<5} {:>9.2} {:>9} {:>9}",
            position.id(),
            position.player_name(),
            action,
            position.entry_price(),
            exit,
            pl
        );
    }
}

fn print_performance(performance: &SeriesPerformance) {
    println!("{:>4} {:>8} {:>9} {:>8}", "WEEK", "ACTUAL", "PROJECTED", "DIFF");

    for delta in &performance.weekly_deltas {
        println!(
            "{:>4} {:>8.2} {:>9.2} {:>8}",
            delta.week,
            delta.actual,
            delta.projected,
            format_pl(delta.diff)
        );
    }

    println!();
    println!("{} {}", "Season average diff:".bold(), format_pl(performance.season_average_diff));
    match performance.best_week_actual {
        Some(best) => println!("{} {:.2}", "Best week:".bold(), best),
        None => println!("{} -", "Best week:".bold()),
    }
    println!(
        "{} {} over, {} under",
        "Weeks:".bold(),
        performance.weeks_over(),
        performance.weeks_under()
    );
}

fn print_market(snapshot: &MarketSnapshot, from_calendar: bool) -> Result<()> {
    let status = if snapshot.is_open { "OPEN".green() } else { "CLOSED".red() };
    println!("{} {}", "Week:".bold(), snapshot.current_week);
    println!("{} {}", "Market:".bold(), status);

    if from_calendar {
        let gateway = ScheduleMarketGateway::new(MarketConfig::from_env()?)?;
        let now = chrono::Local::now().naive_local();
        if let Some(remaining) = gateway.schedule().time_until_close(now) {
            println!(
                "{} {}h {}m",
                "Closes in:".bold(),
                remaining.num_hours(),
                remaining.num_minutes() % 60
            );
        }
    }

    if !snapshot.locked_player_ids.is_empty() {
        let mut locked: Vec<&str> =
            snapshot.locked_player_ids.iter().map(String::as_str).collect();
        locked.sort_unstable();
        println!("{} {}", "Locked:".bold(), locked.join(", "));
    }
    Ok(())
}
