use clap::{Parser, Subcommand, builder::PossibleValuesParser};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    engine::MatchingEngine,
    orders::Side,
    state::AppState,
    workload::{WorkloadConfig, run_workload},
};

/// Simple CLI to drive the matching engine
#[derive(Parser)]
#[command(name = "Matching Engine CLI")]
#[command(
    version = "0.1",
    about = "Continuous price-time priority matching for a single instrument"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one order to an empty book and show fills plus the resulting book
    Submit {
        ///BUY or SELL
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,

        /// Limit price in ticks (must be > 0)
        price: u64,

        /// Quantity (must be > 0)
        quantity: u64,

        /// Print the submission result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stream random orders into the engine, then display what rests
    Run {
        /// Stop after this many orders
        #[arg(long, default_value_t = 50)]
        orders: u64,

        /// Poisson arrival rate, orders per second
        #[arg(long, default_value_t = 1.0)]
        rate_hz: f64,

        /// Starting mid-price in ticks
        #[arg(long, default_value_t = 75)]
        base_price: u64,

        /// Std-dev of the per-order mid-price drift
        #[arg(long, default_value_t = 2.0)]
        noise_sigma: f64,

        /// Mean order size
        #[arg(long, default_value_t = 50.0)]
        mean_qty: f64,
    },
}

fn parse_side(side_str: &str) -> Side {
    match side_str {
        "buy" => Side::Buy,
        "sell" => Side::Sell,
        _ => unreachable!(),
    }
}

fn handle_submit(side_str: String, price: u64, quantity: u64, json: bool) -> anyhow::Result<()> {
    let side = parse_side(&side_str);
    let mut engine = MatchingEngine::default();
    let result = engine.submit(side, price, quantity)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.trades.is_empty() {
        println!("No trades occurred.");
    } else {
        println!("Trades:");
        for t in &result.trades {
            println!(
                "  buy #{} x sell #{} {} @ {}",
                t.buy_order_id, t.sell_order_id, t.quantity, t.price
            );
        }
    }
    print_book(&engine);
    Ok(())
}

async fn handle_run(cfg: WorkloadConfig) -> anyhow::Result<()> {
    let state = AppState::new();
    let cancel = shutdown_token();
    run_workload(state.clone(), cfg, cancel).await?;

    let engine = state.engine.lock().unwrap();
    print_book(&engine);
    Ok(())
}

fn print_book(engine: &MatchingEngine) {
    println!("------ Order Book ------");
    println!("Bids (highest first):");
    let bids = engine.snapshot(Side::Buy);
    if bids.is_empty() {
        println!("  (no buy orders)");
    }
    for entry in bids {
        println!("  #{} {} @ {}", entry.order_id, entry.quantity, entry.price);
    }

    println!("Asks (lowest first):");
    let asks = engine.snapshot(Side::Sell);
    if asks.is_empty() {
        println!("  (no sell orders)");
    }
    for entry in asks {
        println!("  #{} {} @ {}", entry.order_id, entry.quantity, entry.price);
    }
    println!("--------------------------");
}

/// Cancellation token wired to Ctrl-C, handed to the workload loop.
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let tc = token.clone();
    //spawn once to listen for ctrl-c
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tc.cancel();
        }
    });
    token
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Submit {
            side,
            price,
            quantity,
            json,
        } => handle_submit(side, price, quantity, json),
        Commands::Run {
            orders,
            rate_hz,
            base_price,
            noise_sigma,
            mean_qty,
        } => {
            handle_run(WorkloadConfig {
                orders: Some(orders),
                rate_hz,
                base_price,
                noise_sigma,
                mean_qty,
            })
            .await
        }
    }
}
