// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, anyhow};
use crossterm::{
    execute,
    style::{self, Stylize},
};
use std::{
    io::{self, BufRead, Write},
    ops::RangeInclusive,
    thread,
};
use tokio::sync::mpsc;

use agmp_core::{
    message::PlayResponse,
    poker::{Card, Suit, Winner},
};

use crate::client::Decisions;

/// Decisions read from the terminal.
pub struct Terminal {
    lines: mpsc::UnboundedReceiver<String>,
    stdout: io::Stdout,
}

impl Terminal {
    /// Creates a terminal that reads from stdin.
    ///
    /// Lines are read on a dedicated thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            lines: rx,
            stdout: io::stdout(),
        }
    }

    fn print_cards(&mut self, label: &str, cards: &[Option<Card>]) -> Result<()> {
        execute!(self.stdout, style::Print(format!("{label:<8}")))?;

        for card in cards {
            let text = match card {
                Some(card) => {
                    let text = format!("{card} ");
                    match card.suit() {
                        Suit::Diamonds | Suit::Hearts => text.red().bold(),
                        Suit::Clubs | Suit::Spades => text.white().bold(),
                    }
                }
                None => "-- ".to_string().dark_grey(),
            };

            execute!(self.stdout, style::PrintStyledContent(text))?;
        }

        execute!(self.stdout, style::Print("\n"))?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Decisions for Terminal {
    fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.stdout, "{text}")?;
        Ok(())
    }

    fn show_table(&mut self, res: &PlayResponse) -> Result<()> {
        writeln!(self.stdout)?;
        self.print_cards("Player:", &res.cards.player)?;
        self.print_cards("Dealer:", &res.cards.dealer)?;
        self.print_cards("Board:", &res.cards.board)?;

        let chips = format!(
            "Ante: {}  Pot: {}  Bet: {}  Bank: {}\n",
            res.ante, res.pot, res.bet, res.bank
        );
        execute!(self.stdout, style::PrintStyledContent(chips.dark_green()))?;

        let winner = match res.winner {
            Winner::NotSet => None,
            Winner::Player => Some("You win!".to_string().green().bold()),
            Winner::Draw => Some("Draw.".to_string().yellow().bold()),
            Winner::Dealer => Some("Dealer wins.".to_string().red().bold()),
        };

        if let Some(winner) = winner {
            execute!(
                self.stdout,
                style::PrintStyledContent(winner),
                style::Print("\n")
            )?;
        }

        Ok(())
    }

    async fn select(&mut self, prompt: &str, range: RangeInclusive<u32>) -> Result<u32> {
        loop {
            write!(self.stdout, "{prompt} ")?;
            self.stdout.flush()?;

            let line = self
                .lines
                .recv()
                .await
                .ok_or_else(|| anyhow!("Input closed"))?;

            match line.trim().parse::<u32>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.show("Invalid Selection. Try again.")?,
            }
        }
    }
}
