use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sonhos_app::app::{
    render_goal_table, render_month_grid, render_pick, render_plan, render_presets, run_pick,
};
use sonhos_app::config::AppConfig;
use sonhos_app::csv_loader;
use sonhos_app::logging::init_logging;
use sonhos_app::models::GoalForm;
use sonhos_app::utils::{parse_date, parse_month};
use sonhos_core::table::{Pagination, RowsPerPage, filter_by_range};
use sonhos_core::{DateRange, DateRangeSelector, MonthGrid, PresetPeriod, WeekdaySet};
use tracing::{debug, info};

/// Plan daily savings for goals and pick date ranges.
///
/// Settings are read from `sonhos.toml` in the working directory when it
/// exists; flags given here take precedence.
#[derive(Parser, Debug)]
#[command(name = "sonhos")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides config; RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Daily savings needed to reach an amount between two dates
    Plan {
        /// Amount with Brazilian separators, e.g. "1.000,00"
        #[arg(short, long)]
        amount: String,

        /// First day (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        start: String,

        /// Target day (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        end: String,

        /// Comma-separated weekday names (defaults to the configured workdays)
        #[arg(short, long, value_delimiter = ',')]
        workdays: Vec<String>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        importance: String,
    },

    /// List the preset periods and the ranges they resolve to
    Presets {
        /// Reference day (defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Print a month's calendar grid
    Calendar {
        /// Month to show, YYYY-MM
        #[arg(short, long)]
        month: String,

        /// Highlight a range starting here
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// Highlight a range ending here
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Replay clicks on the range picker and print the result
    Pick {
        /// Start of the range the picker opens on
        #[arg(long)]
        from: String,

        /// End of the range the picker opens on
        #[arg(long)]
        to: String,

        /// Day clicked on the calendar (repeatable)
        #[arg(long = "click")]
        clicks: Vec<String>,

        /// Preset chosen after the clicks, by id or label
        #[arg(long)]
        preset: Option<String>,

        /// Reference day for presets (defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Load goals from CSV and print one page of them
    Goals {
        /// CSV file with one goal per row
        #[arg(short, long)]
        file: PathBuf,

        /// Only goals starting on or after this day
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Only goals starting on or before this day
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Rows per page: 10, 25, 50 or 100
        #[arg(long)]
        rows: Option<usize>,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    Ok(parse_date(s)?)
}

fn today_or(s: Option<&str>) -> Result<NaiveDate> {
    match s {
        Some(s) => parse_day(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_range(
    from: &str,
    to: &str,
) -> Result<DateRange> {
    Ok(DateRange::between(parse_day(from)?, parse_day(to)?))
}

fn run(
    command: Command,
    config: &AppConfig,
) -> Result<String> {
    match command {
        Command::Plan {
            amount,
            start,
            end,
            workdays,
            description,
            importance,
        } => {
            let workdays = if workdays.is_empty() {
                config.default_workdays
            } else {
                WeekdaySet::parse_names(workdays.iter().map(|s| s.trim()))
                    .context("Invalid --workdays")?
            };
            let form = GoalForm {
                description,
                importance,
                start_date: Some(parse_day(&start)?),
                target_date: Some(parse_day(&end)?),
                amount,
                workdays,
                ..GoalForm::new(Local::now().date_naive())
            };
            Ok(render_plan(&form))
        }

        Command::Presets { today } => Ok(render_presets(today_or(today.as_deref())?)),

        Command::Calendar { month, start, end } => {
            let month = parse_month(&month)?;
            let highlight = match (start, end) {
                (Some(start), Some(end)) => Some((parse_day(&start)?, parse_day(&end)?)),
                _ => None,
            };
            let grid = MonthGrid::new(month, config.week_start, highlight);
            Ok(render_month_grid(&grid))
        }

        Command::Pick {
            from,
            to,
            clicks,
            preset,
            today,
        } => {
            let current = parse_range(&from, &to)?;
            let clicks = clicks
                .iter()
                .map(|s| parse_day(s))
                .collect::<Result<Vec<_>>>()?;
            let preset = match preset {
                Some(name) => match PresetPeriod::parse(&name) {
                    Some(preset) => Some(preset),
                    None => bail!("Unknown preset: {name}"),
                },
                None => None,
            };
            let today = today_or(today.as_deref())?;

            let mut selector = DateRangeSelector::new(config.week_start);
            let outcome = run_pick(&mut selector, current, &clicks, preset, today);
            Ok(render_pick(&outcome))
        }

        Command::Goals {
            file,
            from,
            to,
            rows,
            page,
        } => {
            let forms = csv_loader::load_from_file(&file, config.default_workdays)
                .with_context(|| format!("Failed to load goals from: {}", file.display()))?;

            let goals = forms
                .iter()
                .enumerate()
                .map(|(idx, form)| {
                    form.submit()
                        .with_context(|| format!("Invalid goal on row {}", idx + 1))
                })
                .collect::<Result<Vec<_>>>()?;
            info!(count = goals.len(), "goals loaded");

            let range = match (from, to) {
                (Some(from), Some(to)) => Some(parse_range(&from, &to)?),
                _ => None,
            };

            let rows_per_page = match rows {
                Some(count) => RowsPerPage::from_count(count)
                    .with_context(|| format!("Unsupported page size: {count}"))?,
                None => config.rows_per_page,
            };
            let mut pagination = Pagination::new(rows_per_page);
            let visible = match &range {
                Some(range) => filter_by_range(&goals, range).len(),
                None => goals.len(),
            };
            pagination.go_to(page, visible);

            Ok(render_goal_table(&goals, range.as_ref(), &pagination))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    let output = run(cli.command, &config)?;
    print!("{output}");
    Ok(())
}
