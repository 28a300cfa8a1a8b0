//! Comparison report

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    evaluation::{Evaluation, cashback},
    money::format_amount,
    observer::StoreObserver,
    persistence::KeyValueStore,
    promotions::Promotion,
    random::RandomSource,
    store::PromotionStore,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Side-by-side comparison of every promotion against the base amount.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    promotions: &'a [Promotion],
    base_amount: i64,
    evaluation: Evaluation,
    currency: &'static Currency,
}

impl<'a> Report<'a> {
    /// Create a report from its parts.
    pub fn new(
        promotions: &'a [Promotion],
        base_amount: i64,
        evaluation: Evaluation,
        currency: &'static Currency,
    ) -> Self {
        Self {
            promotions,
            base_amount,
            evaluation,
            currency,
        }
    }

    /// Snapshot the current state of `store`.
    pub fn from_store<P, R, O>(store: &'a PromotionStore<P, R, O>, currency: &'static Currency) -> Self
    where
        P: KeyValueStore,
        R: RandomSource,
        O: StoreObserver,
    {
        Self::new(
            store.promotions(),
            store.base_amount(),
            store.evaluation(),
            currency,
        )
    }

    /// The winning promotion, if any.
    pub fn winner(&self) -> Option<&'a Promotion> {
        self.evaluation.winner(self.promotions)
    }

    /// Write the comparison table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.promotions.is_empty() {
            writeln!(out, "\nNo providers yet. Add one with `cashbacc add`.")?;
        } else {
            let table = self.build_table();

            writeln!(out, "\n{}", dim_borders(&table))?;
        }

        self.write_summary(&mut out)
    }

    fn build_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["", "Provider", "Rate", "Max", "Cashback"]);

        for (index, promotion) in self.promotions.iter().enumerate() {
            let marker = if self.evaluation.index() == Some(index) {
                "★"
            } else {
                ""
            };

            builder.push_record([
                format!("#{:<3}{marker}", index + 1),
                promotion.name.clone(),
                format!("{}%", promotion.discount_percentage),
                format_amount(promotion.max_discount_amount, self.currency),
                format_amount(cashback(promotion, self.base_amount), self.currency),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')));

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        if let Some(index) = self.evaluation.index() {
            // header is row 0
            for col in 1..5 {
                table.modify((index + 1, col), Color::FG_GREEN);
            }
        }

        table.to_string()
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let amount = self.evaluation.amount();
        let after = self.base_amount.saturating_sub(amount);

        let rows = [
            (" Price:", format_amount(self.base_amount, self.currency)),
            (
                " Best cashback:",
                match self.winner() {
                    Some(winner) => format!("{} ({})", format_amount(amount, self.currency), winner.name),
                    None => format_amount(amount, self.currency),
                },
            ),
            (" You pay:", format_amount(after, self.currency)),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, "{label:<label_width$}  {value}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

const BORDER_COLOR: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

fn is_box_drawing(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Dims the table borders so the amounts stand out.
fn dim_borders(table: &str) -> String {
    let chars: Vec<char> = table.chars().collect();

    chars
        .chunk_by(|a, b| is_box_drawing(*a) == is_box_drawing(*b))
        .map(|run| {
            let text: String = run.iter().collect();

            if run.first().copied().is_some_and(is_box_drawing) {
                format!("{BORDER_COLOR}{text}{RESET}")
            } else {
                text
            }
        })
        .collect()
}
