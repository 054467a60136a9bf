// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Evaluates random 7 cards hands and prints the frequency of each category.
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_sample -- --hands 1000000 --seed 42
// ```
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Instant;

use agmp_eval::{Deck, HandRank, HandValue};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of hands to evaluate.
    #[clap(long, default_value_t = 1_000_000)]
    hands: usize,
    /// Random generator seed.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let now = Instant::now();
    let mut counts = [0usize; 9];

    for _ in 0..cli.hands {
        let mut deck = Deck::new_and_shuffled(&mut rng);
        let hand = deck.deal_array::<7>();
        let rank = HandValue::eval(&hand).rank();
        counts[rank as usize] += 1;
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    let ranks = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
    ];

    for rank in ranks {
        let count = counts[rank as usize];
        let pct = 100.0 * count as f64 / total.max(1) as f64;
        println!("{:<16} {count:>10} {pct:>7.3}%", format!("{rank}:"));
    }
}
