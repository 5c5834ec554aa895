use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::engine::{FilterSet, SortOrder, SortState};
use crate::model::{GoalCategory, ParseEnumError, PaymentMethod, Status};

/// Track expenses, incomes and savings goals stored in a finance tracker backend.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to a YAML config file [default: finance_tracker.yaml if it exists]
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and log in
    Register,

    /// Log in with email and password
    Login,

    /// Forget the stored session
    Logout,

    /// Show profile, totals and all records
    Dashboard,

    /// List expenses
    Expenses(ListArgs),

    /// Add an expense
    AddExpense,

    /// List incomes
    Incomes(ListArgs),

    /// Add an income
    AddIncome,

    /// List savings goals
    Goals(ListArgs),

    /// Add a savings goal
    AddGoal,

    /// Set how much has been saved towards a goal
    GoalProgress {
        /// ID of the goal, as shown by `goals`
        id: String,

        /// The new total saved so far
        progress: Decimal,
    },

    /// Delete an expense, income or goal
    Delete {
        #[clap(value_enum)]
        kind: RecordKind,

        /// ID of the record, as shown by the list commands
        id: String,

        /// Don't ask for confirmation
        #[clap(long)]
        yes: bool,
    },

    /// Monthly totals, breakdowns, goal progress and budget comparison
    Report,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Expense,
    Income,
    Goal,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
            RecordKind::Goal => "goal",
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Column to sort by, e.g. date, amount, status
    #[clap(long)]
    pub sort: Option<String>,

    /// asc or desc [default: asc when --sort is given, otherwise the view's default]
    #[clap(long)]
    pub order: Option<SortOrder>,

    /// Only show records with this status
    #[clap(long)]
    pub status: Option<Status>,

    /// Only show records with this category (the source for incomes)
    #[clap(long)]
    pub category: Option<String>,

    /// Only show records paid this way
    #[clap(long)]
    pub payment_method: Option<PaymentMethod>,

    /// Page to show, starting at 1
    #[clap(long, default_value_t = 1)]
    pub page: usize,

    /// Write all matching records (not just the page) to this CSV file
    #[clap(long)]
    pub export: Option<PathBuf>,

    /// Open the exported CSV file with the default application
    #[clap(long, requires = "export")]
    pub open: bool,
}

impl ListArgs {
    /// Applies `--sort` and `--order` on top of the view's default.
    pub fn sort_state<F>(&self, default: SortState<F>) -> Result<SortState<F>>
    where
        F: Copy + PartialEq + FromStr<Err = ParseEnumError>,
    {
        let mut state = default;
        if let Some(field) = &self.sort {
            state = SortState::new(field.parse()?, SortOrder::Asc);
        }
        if let Some(order) = self.order {
            state.order = order;
        }
        Ok(state)
    }

    pub fn filters(&self) -> FilterSet {
        FilterSet {
            status: self.status,
            category: self.category.clone(),
            payment_method: self.payment_method,
        }
    }
}

/// Goals can only be filtered by category, checked up front so typos don't silently match nothing.
pub fn validate_goal_category(category: Option<&str>) -> Result<()> {
    if let Some(category) = category.filter(|category| !category.trim().is_empty()) {
        category.parse::<GoalCategory>()?;
    }
    Ok(())
}

pub fn parse() -> Args {
    Args::parse()
}
