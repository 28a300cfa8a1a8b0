use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;
use tracing::debug;

use cashbacc::{
    analytics::{AnalyticsAction, AnalyticsSink, TracingAnalytics},
    evaluation::Evaluation,
    fixtures::PromotionsFixture,
    metadata::SITE,
    money::parse_currency,
    observer::StoreObserver,
    persistence::{FileStore, KeyValueStore},
    promotions::{Promotion, PromotionUpdate},
    random::{RandomSource, RngSource},
    report::Report,
    store::{PromotionStore, StoreOptions},
};

use crate::cli::config::Config;

pub(crate) mod config;
pub(crate) mod logging;

#[derive(Debug, Parser)]
#[command(
    name = "cashbacc",
    about = "Compare cashback promotions and find the biggest one",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: Config,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the comparison (default)
    Show,

    /// Set the price before cashback
    Base(BaseArgs),

    /// Add a provider with a generated name and random terms
    Add,

    /// Change a provider's name, rate or cap
    Update(UpdateArgs),

    /// Remove a provider
    Remove(RemoveArgs),

    /// Replace the providers with a YAML preset
    Import(ImportArgs),

    /// About this calculator
    About,

    /// Print a link for sharing the calculator
    Share,

    /// Print the donation link
    Donate,
}

#[derive(Debug, Args)]
struct BaseArgs {
    /// Price; anything that is not a whole number counts as 0
    #[arg(allow_hyphen_values = true)]
    amount: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Provider position as shown in the table (starting at 1)
    position: usize,

    /// New provider name
    #[arg(long)]
    name: Option<String>,

    /// New cashback rate in percent, clamped to 0..=100
    #[arg(long, allow_hyphen_values = true)]
    percentage: Option<String>,

    /// New cashback cap
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Provider position as shown in the table (starting at 1)
    position: usize,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// YAML preset file
    path: PathBuf,
}

impl Cli {
    pub(crate) fn run(self, mut out: impl io::Write) -> Result<(), String> {
        let analytics = TracingAnalytics;
        let command = self.command.unwrap_or(Commands::Show);

        let about = match command {
            Commands::About => Some((AnalyticsAction::OpenModal, SITE.to_string())),
            Commands::Share => Some((AnalyticsAction::Share, SITE.share_url())),
            Commands::Donate => Some((AnalyticsAction::AddToCart, SITE.donation_url.to_string())),
            _ => None,
        };

        if let Some((action, text)) = about {
            analytics.record_event(action);

            return writeln!(out, "{text}").map_err(|error| write_error(&error));
        }

        let currency = parse_currency(&self.config.currency).map_err(|error| error.to_string())?;

        let persistence = FileStore::open(&self.config.state).map_err(|error| {
            format!(
                "failed to open state file {}: {error}",
                self.config.state.display()
            )
        })?;

        let options = StoreOptions {
            cache_evaluation: self.config.cache_discount,
        };

        analytics.record_pageview("/");

        match self.config.seed {
            Some(seed) => execute(
                PromotionStore::open(persistence, RngSource::seeded(seed), TracingObserver, options),
                command,
                currency,
                out,
            ),
            None => execute(
                PromotionStore::open(persistence, RngSource::thread(), TracingObserver, options),
                command,
                currency,
                out,
            ),
        }
    }
}

fn execute<P, R>(
    mut store: PromotionStore<P, R, TracingObserver>,
    command: Commands,
    currency: &'static Currency,
    mut out: impl io::Write,
) -> Result<(), String>
where
    P: KeyValueStore,
    R: RandomSource,
{
    match command {
        Commands::Show | Commands::About | Commands::Share | Commands::Donate => {}
        Commands::Base(args) => {
            store.set_base_amount(&args.amount);
        }
        Commands::Add => {
            let index = store.add_promotion();

            if let Some(promotion) = store.promotions().get(index) {
                writeln!(out, "Added {}", promotion.name)
                    .map_err(|error| write_error(&error))?;
            }
        }
        Commands::Update(args) => {
            let update = update_from_args(&args);

            if let Some(index) = args.position.checked_sub(1) {
                store.update_promotion(index, &update);
            }
        }
        Commands::Remove(args) => {
            let removed: Option<Promotion> = args
                .position
                .checked_sub(1)
                .and_then(|index| store.remove_promotion(index));

            if let Some(promotion) = removed {
                writeln!(out, "Removed {}", promotion.name)
                    .map_err(|error| write_error(&error))?;
            }
        }
        Commands::Import(args) => {
            let fixture = PromotionsFixture::from_path(&args.path).map_err(|error| {
                format!("failed to import {}: {error}", args.path.display())
            })?;

            store.import(&fixture);
        }
    }

    Report::from_store(&store, currency)
        .write_to(out)
        .map_err(|error| error.to_string())
}

fn update_from_args(args: &UpdateArgs) -> PromotionUpdate {
    let mut update = PromotionUpdate::default();

    if let Some(name) = &args.name {
        update = update.name(name.clone());
    }

    if let Some(raw) = &args.percentage {
        update = update.raw_discount_percentage(raw);
    }

    if let Some(raw) = &args.max {
        update = update.raw_max_discount_amount(raw);
    }

    update
}

fn write_error(error: &io::Error) -> String {
    format!("failed to write output: {error}")
}

/// Logs every recomputed evaluation.
#[derive(Debug, Clone, Copy)]
struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn on_evaluation(&mut self, promotions: &[Promotion], base_amount: i64, evaluation: &Evaluation) {
        debug!(
            providers = promotions.len(),
            base_amount,
            amount = evaluation.amount(),
            index = evaluation.sentinel_index(),
            "evaluation updated"
        );
    }
}
