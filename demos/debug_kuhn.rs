//! Debug script for Kuhn Poker CFR: prints the convergence trace.

use kuhn_cfr::cfr::{CfrTrainer, StrategyReport, TrainConfig};

fn bet(report: &StrategyReport, key: &str) -> f64 {
    report.find(key).map_or(f64::NAN, |entry| entry.strategy[1])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = TrainConfig::default().with_seed(42).with_iterations(10_000);
    let mut trainer = CfrTrainer::new(config)?;

    // Run iterations and print progress
    for _ in 0..10 {
        trainer.train()?;
        let report = trainer.report();

        println!("After {} iterations:", trainer.iteration());
        println!("  Expected value (P1): {:.4}", report.player1_value);
        println!("  Jack  (P1 root): Bet={:.3}", bet(&report, "0 "));
        println!("  Queen (P1 root): Bet={:.3}", bet(&report, "1 "));
        println!("  King  (P1 root): Bet={:.3}", bet(&report, "2 "));

        // Also check P2's strategies facing bet
        println!("  P2 Jack facing bet:  Call={:.3}", bet(&report, "0 b"));
        println!("  P2 Queen facing bet: Call={:.3}", bet(&report, "1 b"));
        println!("  P2 King facing bet:  Call={:.3}", bet(&report, "2 b"));
        println!("  Exploitability: {:.5}", trainer.exploitability()?);
        println!();
    }

    println!("Total info sets: {}", trainer.registry().len());

    // Expected Nash equilibrium:
    println!("\nExpected Nash Equilibrium:");
    println!("  P1 EV: -1/18 = {:.4}", -1.0 / 18.0);
    println!("  P1 Jack:  Bet=α (0 <= α <= 1/3)");
    println!("  P1 Queen: Bet=0.000");
    println!("  P1 King:  Bet=3α");
    println!("  P2 Jack vs bet:  Call=0.000");
    println!("  P2 Queen vs bet: Call=0.333");
    println!("  P2 King vs bet:  Call=1.000");

    Ok(())
}
