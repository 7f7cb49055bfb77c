use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use finsight_core::goals::GOAL_CATEGORIES;
use finsight_core::search::{DateRange, TransactionFilter};
use finsight_core::{BankLink, Direction, Goal, Period, Session, Transaction, BANKS};
use finsight_ingest::{ReceiptScanner, RecognitionError, ScanOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod assistant;
mod config;
mod logging;
mod ocr;
mod receipt;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "finsight",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINSIGHT_BUILD_SHA"), ")"),
    about = "Personal finance tracker: dashboards, receipt scanning and a spoken-question assistant"
)]
struct Cli {
    /// JSON snapshot to use instead of the demo data
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Balance, this month's totals and recent transactions
    Summary,

    /// Linked accounts and balances
    Accounts,

    /// Savings goals and progress
    Goals {
        #[command(subcommand)]
        command: Option<GoalsCommand>,
    },

    /// Link a bank account (pick a bank, confirm with the OTP), or skip.
    /// With no options, lists the supported banks.
    Link {
        /// hdfc | icici | sbi | axis | kotak
        #[arg(long)]
        bank: Option<String>,

        /// 6-digit code sent by the bank
        #[arg(long, requires = "bank")]
        otp: Option<String>,

        /// Continue without linking (demo data)
        #[arg(long, conflicts_with_all = ["bank", "otp"])]
        skip: bool,
    },

    /// Budgets and how close each is to its limit
    Budgets,

    /// Upcoming and overdue bills
    Bills,

    /// Search transactions
    Search {
        /// Matches description or category (case-insensitive)
        #[arg(long, short, default_value = "")]
        query: String,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// credit | debit
        #[arg(long = "type")]
        direction: Option<Direction>,

        /// all | today | week | month | year
        #[arg(long, default_value = "all")]
        range: DateRange,

        /// Also write the matching rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Spending breakdown and trends
    Insights {
        /// week | month | year
        #[arg(long, default_value = "month")]
        period: Period,
    },

    /// Extract an expense from a receipt image
    Scan {
        file: PathBuf,

        /// FILE is already-recognized receipt text, not an image
        #[arg(long)]
        text: bool,

        /// Print the extracted expense as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the assistant one question
    Ask {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Interactive assistant; each line is one question
    Assistant,

    /// Manage ~/.finsight/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GoalsCommand {
    /// Add a goal for this session
    Add {
        title: String,

        /// Target amount in rupees
        #[arg(long)]
        target: f64,

        /// YYYY-MM-DD
        #[arg(long)]
        deadline: NaiveDate,

        #[arg(
            long,
            default_value = "Savings",
            value_parser = PossibleValuesParser::new(GOAL_CATEGORIES.iter().copied())
        )]
        category: String,

        /// Amount already saved
        #[arg(long, default_value_t = 0.0)]
        saved: f64,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let command = match cli.command {
        Command::Config { command } => {
            return match command {
                ConfigCommand::Init => config::init_config(),
                ConfigCommand::Show => show_config(),
            };
        }
        Command::Link { bank, otp, skip } => return link_bank(bank.as_deref(), otp.as_deref(), skip),
        other => other,
    };

    let cfg = config::load_config()?;
    let today = match cli.today {
        Some(d) => d,
        None => finsight_core::time::today_in(cfg.timezone()?),
    };
    debug!(%today, "resolved today");

    let mut session = load_session(cli.data.as_deref(), &cfg)?;

    match command {
        Command::Summary => report::print_summary(session.snapshot(), today),
        Command::Accounts => report::print_accounts(session.snapshot()),
        Command::Goals { command } => {
            if let Some(GoalsCommand::Add {
                title,
                target,
                deadline,
                category,
                saved,
            }) = command
            {
                let goal = Goal {
                    id: format!("goal-{}", session.snapshot().goals.len() + 1),
                    title,
                    target_amount: target,
                    current_amount: saved,
                    deadline,
                    category,
                };
                session.add_goal(goal)?;
                println!("Goal added for this session (not saved).\n");
            }
            report::print_goals(session.snapshot(), today);
        }
        Command::Budgets => report::print_budgets(session.snapshot()),
        Command::Bills => report::print_bills(session.snapshot(), today),

        Command::Search {
            query,
            category,
            direction,
            range,
            csv,
        } => {
            let filter = TransactionFilter {
                query,
                category,
                direction,
                range,
            };
            let snap = session.snapshot();
            let results = filter.apply(&snap.transactions, today);
            report::print_search(snap, &results);
            if let Some(out) = csv {
                write_csv(&out, &results)?;
                println!("Wrote {} rows to {}", results.len(), out.display());
            }
        }

        Command::Insights { period } => report::print_insights(session.snapshot(), period, today),

        Command::Scan { file, text, json } => {
            scan_receipt(&mut session, &cfg, &file, text, json, today)?;
        }

        Command::Ask { words } => {
            let question = words.join(" ");
            println!("{}", finsight_assistant::interpret(&question, session.snapshot()));
        }

        Command::Assistant => {
            assistant::run_assistant(session.snapshot(), cfg.speech.clone()).await?;
        }

        // handled before any data is loaded
        Command::Config { .. } | Command::Link { .. } => {}
    }

    Ok(())
}

/// `--data`, then `[data] snapshot`, then a freshly linked demo bank.
fn load_session(data: Option<&Path>, cfg: &Config) -> Result<Session> {
    let path = data.map(Path::to_path_buf).or_else(|| cfg.data.snapshot.clone());
    match path {
        Some(p) => {
            if !p.exists() {
                bail!("snapshot not found: {} (pass --data <path>)", p.display());
            }
            info!(file = %p.display(), "loading snapshot");
            Ok(Session::with_snapshot(state::read_snapshot(&p)?))
        }
        None => {
            let mut session = Session::new();
            session.link_bank(Utc::now());
            Ok(session)
        }
    }
}

fn scan_receipt(
    session: &mut Session,
    cfg: &Config,
    file: &Path,
    is_text: bool,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let result = if is_text {
        let text = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
        Ok(ReceiptScanner::new(NoRecognizer)?.extract(text, today))
    } else {
        let image = fs::read(file).with_context(|| format!("read {}", file.display()))?;
        match ocr::TesseractRecognizer::locate(&cfg.ocr.lang) {
            Ok(recognizer) => ReceiptScanner::new(recognizer)?.scan(&image, today),
            Err(e) => Err(e),
        }
    };

    let message = receipt::scan_message(&result);
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(file = %file.display(), error = %e, "scan failed");
            bail!("{message}");
        }
    };
    let ScanOutcome::Extracted { expense, .. } = outcome else {
        println!("{message}");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&expense)?);
    } else {
        println!("{message}");
    }

    let id = format!("scan-{}", Utc::now().timestamp_millis());
    session.add_transaction(expense.into_transaction(id, "Receipt"));
    if let Some(t) = session.snapshot().transactions.first() {
        println!("Added for this session (not saved): {}", report::txn_line(t));
    }
    Ok(())
}

fn link_bank(bank: Option<&str>, otp: Option<&str>, skip: bool) -> Result<()> {
    let mut link = BankLink::new();
    if skip {
        link.skip();
    } else if let Some(id) = bank {
        let chosen = link.select_bank(id)?;
        let Some(code) = otp else {
            println!("Selected {}. Re-run with --otp <6 digits> to confirm.", chosen.name);
            return Ok(());
        };
        link.submit_otp(code)?;
    } else {
        for b in BANKS {
            println!("{:<6} {}", b.id, b.name);
        }
        return Ok(());
    }

    let mut session = Session::new();
    session.complete_link(&link, Utc::now())?;
    match link {
        BankLink::Linked { bank: Some(b) } => println!("{} linked successfully!\n", b.name),
        _ => println!("Skipped bank linking; showing demo data.\n"),
    }
    report::print_accounts(session.snapshot());
    Ok(())
}

/// Stand-in recognizer for text that was recognized elsewhere.
struct NoRecognizer;

impl finsight_ingest::TextRecognizer for NoRecognizer {
    fn recognize(&self, _image: &[u8]) -> Result<String, RecognitionError> {
        Err(RecognitionError::Unavailable("text input only".to_string()))
    }
}

fn show_config() -> Result<()> {
    let cfg = config::load_config()?;
    let path = config::config_path()?;
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# defaults (no {})", path.display());
    }
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

fn write_csv(path: &Path, rows: &[&Transaction]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for t in rows {
        w.serialize(t)?;
    }
    w.flush()?;
    Ok(())
}
