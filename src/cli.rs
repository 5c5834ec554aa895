use anyhow::{anyhow, bail, ensure, Context as _, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;

use crate::api::{self, ApiClient, ApiError, Credentials, Registration};
use crate::args::{self, Args, Command, ListArgs, RecordKind};
use crate::config::Config;
use crate::engine::SortOrder;
use crate::export::{self, Column};
use crate::fetch::{FetchState, ProfileFetcher};
use crate::model::{
    ExpenseDraft, GoalDraft, IncomeDraft, MonthlyAnalytics, NewGoal, RecordId, UserProfile,
    ValidationError,
};
use crate::session::{BearerToken, Session, SessionFile};
use crate::terminal::{self, with_spinner};
use crate::views::{self, Report};

mod forms;
mod render;

use render::{style_error, style_success};

const NOT_LOGGED_IN: &str = "You are not logged in. Run `finance-tracker login` first.";
const LOGIN_FAILED: &str = "Invalid email or password. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const DASHBOARD_FAILED: &str = "Failed to load dashboard. Please try again later.";
const EXPENSES_FAILED: &str = "Failed to fetch expenses. Please try again later.";
const INCOMES_FAILED: &str = "Failed to fetch incomes. Please try again later.";
const GOALS_FAILED: &str = "Failed to fetch goals. Please try again later.";
const REPORT_FAILED: &str = "Failed to load reports. Please try again later.";
const ADD_EXPENSE_FAILED: &str = "Failed to add expense. Please try again.";
const ADD_INCOME_FAILED: &str = "Something went wrong. Please try again.";
const ADD_GOAL_FAILED: &str = "Failed to add goal";
const UPDATE_GOAL_FAILED: &str = "Failed to update goal. Please try again.";
const DELETE_FAILED: &str = "Failed to delete. Please try again.";

pub async fn main(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    let cli = Cli::new(config).await?;
    match args.command {
        Command::Register => cli.main_register().await,
        Command::Login => cli.main_login().await,
        Command::Logout => cli.main_logout().await,
        Command::Dashboard => cli.main_dashboard().await,
        Command::Expenses(list) => cli.main_expenses(&list).await,
        Command::AddExpense => cli.main_add_expense().await,
        Command::Incomes(list) => cli.main_incomes(&list).await,
        Command::AddIncome => cli.main_add_income().await,
        Command::Goals(list) => cli.main_goals(&list).await,
        Command::AddGoal => cli.main_add_goal().await,
        Command::GoalProgress { id, progress } => {
            cli.main_goal_progress(RecordId(id), progress).await
        }
        Command::Delete { kind, id, yes } => cli.main_delete(kind, RecordId(id), yes).await,
        Command::Report => cli.main_report().await,
    }
}

pub struct Cli {
    config: Config,
    session: Arc<Session>,
    session_file: SessionFile,
    api: ApiClient,
}

impl Cli {
    pub async fn new(config: Config) -> Result<Self> {
        let session_file = SessionFile::new(config.session_file.clone());
        // Login and logout replace an unreadable session file.
        let token = session_file.load().await.unwrap_or_else(|err| {
            log::warn!("Ignoring the stored session: {err:#}");
            None
        });
        if let Some(token) = &token {
            warn_if_expired(token);
        }
        let session = Arc::new(Session::new(token));
        let api = ApiClient::new(&config.api_base_url, session.clone())
            .context("Failed to set up the API client")?;
        Ok(Self {
            config,
            session,
            session_file,
            api,
        })
    }

    pub async fn main_register(&self) -> Result<()> {
        let username = terminal::prompt("Username")?;
        let email = terminal::prompt("Email")?;
        let password = terminal::prompt_password("Password")?;
        let total_money = terminal::prompt_parsed::<Decimal>("Money you have right now [default: 0]")?
            .unwrap_or(Decimal::ZERO);
        let registration = Registration {
            username,
            email,
            password,
            total_money,
        };
        let token = with_spinner("Registering...", api::register(&self.api, &registration))
            .await
            .map_err(|err| {
                log::error!("Registration failed: {err}");
                anyhow!(REGISTER_FAILED)
            })?;
        self.start_session(token).await?;
        println!(
            "{}",
            style_success(&format!("Welcome, {}!", registration.username))
        );
        Ok(())
    }

    pub async fn main_login(&self) -> Result<()> {
        let email = terminal::prompt("Email")?;
        let password = terminal::prompt_password("Password")?;
        let credentials = Credentials { email, password };
        let token = with_spinner("Logging in...", api::login(&self.api, &credentials))
            .await
            .map_err(|err| {
                log::error!("Login failed: {err}");
                anyhow!(LOGIN_FAILED)
            })?;
        self.start_session(token).await?;
        println!(
            "{}",
            style_success(&format!("Logged in as {}", credentials.email))
        );
        Ok(())
    }

    pub async fn main_logout(&self) -> Result<()> {
        self.session.invalidate();
        self.session_file
            .clear()
            .await
            .context("Failed to remove session")?;
        println!("Logged out");
        Ok(())
    }

    pub async fn main_dashboard(&self) -> Result<()> {
        let profile = self.load_profile(DASHBOARD_FAILED).await?;
        render::print_dashboard(&profile);
        Ok(())
    }

    pub async fn main_expenses(&self, list: &ListArgs) -> Result<()> {
        let mut view = views::expenses_view(self.config.page_sizes.expenses);
        view.sort = list.sort_state(view.sort)?;
        view.filters = list.filters();
        view.page = list.page;

        let profile = self.load_profile(EXPENSES_FAILED).await?;
        let page = view.render(&profile.expenses);
        render::print_expenses(
            &page,
            &sorted_by(view.sort.field.as_str(), view.sort.order),
        );
        if let Some(path) = &list.export {
            let expenses = view.arranged(&profile.expenses);
            write_csv(path, &expenses, &export::expense_columns(), list.open).await?;
        }
        Ok(())
    }

    pub async fn main_incomes(&self, list: &ListArgs) -> Result<()> {
        let mut view = views::incomes_view(self.config.page_sizes.incomes);
        view.sort = list.sort_state(view.sort)?;
        view.filters = list.filters();
        view.page = list.page;

        let profile = self.load_profile(INCOMES_FAILED).await?;
        let page = view.render(&profile.incomes);
        render::print_incomes(
            &page,
            &sorted_by(view.sort.field.as_str(), view.sort.order),
        );
        if let Some(path) = &list.export {
            let incomes = view.arranged(&profile.incomes);
            write_csv(path, &incomes, &export::income_columns(), list.open).await?;
        }
        Ok(())
    }

    pub async fn main_goals(&self, list: &ListArgs) -> Result<()> {
        ensure!(
            list.status.is_none() && list.payment_method.is_none(),
            "Goals can only be filtered by --category"
        );
        ensure!(list.export.is_none(), "Goals can't be exported");
        args::validate_goal_category(list.category.as_deref())?;
        let mut view = views::goals_view(self.config.page_sizes.goals);
        view.sort = list.sort_state(view.sort)?;
        view.filters = list.filters();
        view.page = list.page;

        let profile = self.load_profile(GOALS_FAILED).await?;
        let page = view.render(&profile.goals);
        render::print_goals(
            &page,
            &sorted_by(view.sort.field.as_str(), view.sort.order),
        );
        Ok(())
    }

    pub async fn main_add_expense(&self) -> Result<()> {
        let Some(expense) = validated(forms::expense_draft, ExpenseDraft::validate)? else {
            return Ok(());
        };
        let added = with_spinner("Adding expense...", api::add_expense(&self.api, &expense))
            .await
            .map_err(|err| failure(err, ADD_EXPENSE_FAILED))?;
        println!(
            "{}",
            style_success(&format!(
                "Added expense {} ({:.2})",
                added.id, added.amount
            ))
        );
        Ok(())
    }

    pub async fn main_add_income(&self) -> Result<()> {
        let Some(income) = validated(forms::income_draft, IncomeDraft::validate)? else {
            return Ok(());
        };
        let added = with_spinner("Adding income...", api::add_income(&self.api, &income))
            .await
            .map_err(|err| failure(err, ADD_INCOME_FAILED))?;
        println!(
            "{}",
            style_success(&format!(
                "Added income {} ({:.2})",
                added.id, added.amount
            ))
        );
        Ok(())
    }

    pub async fn main_add_goal(&self) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let validate = |draft: GoalDraft| draft.validate(today);
        let Some(goal) = validated(forms::goal_draft, validate)? else {
            return Ok(());
        };
        let added = with_spinner("Adding goal...", api::add_goal(&self.api, &goal))
            .await
            .map_err(|err| match err {
                // The Record Store explains what's wrong with a goal
                ApiError::Status { status, message } => {
                    log::error!("Failed to add goal: {status} - {message}");
                    anyhow!(message)
                }
                err => failure(err, ADD_GOAL_FAILED),
            })?;
        println!(
            "{}",
            style_success(&format!("Added goal {} ({})", added.title, added.id))
        );
        Ok(())
    }

    pub async fn main_goal_progress(&self, id: RecordId, progress: Decimal) -> Result<()> {
        ensure!(progress >= Decimal::ZERO, ValidationError::NegativeAmount);
        let profile = self.load_profile(GOALS_FAILED).await?;
        let goal = profile
            .goals
            .into_iter()
            .find(|goal| goal.id == id)
            .ok_or_else(|| anyhow!("No goal with ID {id}"))?;
        let update = NewGoal {
            title: goal.title,
            target_amount: goal.target_amount,
            current_progress: progress,
            deadline: goal.deadline,
            category: goal.category,
        };
        let updated = with_spinner("Updating goal...", api::update_goal(&self.api, &id, &update))
            .await
            .map_err(|err| failure(err, UPDATE_GOAL_FAILED))?;
        let percent = updated
            .percent_complete()
            .map(|percent| format!(" ({percent}%)"))
            .unwrap_or_default();
        println!(
            "{}",
            style_success(&format!(
                "{}: {:.2} of {:.2}{percent}",
                updated.title, updated.current_progress, updated.target_amount
            ))
        );
        Ok(())
    }

    pub async fn main_delete(&self, kind: RecordKind, id: RecordId, yes: bool) -> Result<()> {
        if !yes && !terminal::prompt_yes_no(&format!("Delete {} {id}?", kind.as_str()), false)? {
            return Ok(());
        }
        let delete = async {
            match kind {
                RecordKind::Expense => api::delete_expense(&self.api, &id).await,
                RecordKind::Income => api::delete_income(&self.api, &id).await,
                RecordKind::Goal => api::delete_goal(&self.api, &id).await,
            }
        };
        with_spinner("Deleting...", delete)
            .await
            .map_err(|err| failure(err, DELETE_FAILED))?;
        println!("Deleted {} {id}", kind.as_str());
        Ok(())
    }

    pub async fn main_report(&self) -> Result<()> {
        let profile = self.load_profile(REPORT_FAILED).await?;
        let analytics = self.load_analytics().await?;
        render::print_report(&Report::build(&profile, analytics.as_ref()));
        Ok(())
    }

    async fn start_session(&self, token: BearerToken) -> Result<()> {
        self.session_file
            .save(&token)
            .await
            .context("Failed to save session")?;
        self.session.set(token);
        Ok(())
    }

    /// Verifies the session and fetches the profile. Ctrl-C abandons the request.
    async fn load_profile(&self, error_message: &'static str) -> Result<UserProfile> {
        let mut fetcher = ProfileFetcher::new(self.api.clone(), error_message);
        if with_spinner("Loading...", fetcher.load_until(ctrl_c()))
            .await
            .is_none()
        {
            bail!("Cancelled");
        }
        match fetcher.into_state() {
            FetchState::Ready(profile) => Ok(profile),
            FetchState::Unauthenticated => bail!(NOT_LOGGED_IN),
            FetchState::Error(message) => bail!(message),
            FetchState::Loading => bail!(error_message),
        }
    }

    /// The report is still useful without the budget section, so failures only get logged.
    async fn load_analytics(&self) -> Result<Option<MonthlyAnalytics>> {
        let analytics = tokio::select! {
            analytics = with_spinner("Loading analytics...", api::monthly(&self.api)) => analytics,
            () = ctrl_c() => bail!("Cancelled"),
        };
        match analytics {
            Ok(analytics) => Ok(Some(analytics)),
            Err(err) => {
                log::error!("Failed to load analytics: {err}");
                println!("{}", style_error("Budget comparison unavailable"));
                Ok(None)
            }
        }
    }
}

async fn write_csv<R>(path: &Path, records: &[R], columns: &[Column<R>], open: bool) -> Result<()> {
    let csv = export::export_to_csv(records, columns)?;
    tokio::fs::write(path, csv)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{}",
        style_success(&format!(
            "Exported {} records to {}",
            records.len(),
            path.display()
        ))
    );
    if open {
        open::that(path).with_context(|| format!("Failed to open {}", path.display()))?;
    }
    Ok(())
}

/// Asks for the form until it validates. Returns `None` if the user gives up.
fn validated<D, T>(
    form: impl Fn() -> Result<D>,
    validate: impl Fn(D) -> Result<T, ValidationError>,
) -> Result<Option<T>> {
    loop {
        match validate(form()?) {
            Ok(valid) => return Ok(Some(valid)),
            Err(err) => {
                println!("{}", style_error(&err.to_string()));
                if !terminal::prompt_yes_no("Try again?", true)? {
                    return Ok(None);
                }
            }
        }
    }
}

/// The user only sees `message`, the cause is logged.
fn failure(err: ApiError, message: &'static str) -> anyhow::Error {
    match err {
        ApiError::Unauthorized => anyhow!(NOT_LOGGED_IN),
        err => {
            log::error!("{message} ({err})");
            anyhow!(message)
        }
    }
}

fn warn_if_expired(token: &BearerToken) {
    match token.claims() {
        Ok(claims) if claims.is_expired(chrono::Utc::now()) => {
            log::warn!("Stored session expired at {:?}", claims.expires_at());
        }
        Ok(_) => {}
        Err(err) => log::warn!("Can't decode stored session token: {err:#}"),
    }
}

fn sorted_by(field: &str, order: SortOrder) -> String {
    format!("{field} {}", order.as_str())
}

/// Completes on Ctrl-C. If that can't be listened for, it never completes.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("Can't listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &tempfile::TempDir) -> Config {
        Config {
            session_file: dir.path().join("session.json"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn corrupted_session_file_starts_logged_out() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(&tempdir);
        tokio::fs::write(&config.session_file, b"garbage")
            .await
            .unwrap();

        let cli = Cli::new(config).await.unwrap();
        assert!(!cli.session.is_authenticated());

        cli.session_file.clear().await.unwrap();
        assert!(!tempdir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn stored_session_is_picked_up() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(&tempdir);
        SessionFile::new(config.session_file.clone())
            .save(&BearerToken::new("abc.def.ghi".to_string()))
            .await
            .unwrap();

        let cli = Cli::new(config).await.unwrap();
        assert!(cli.session.is_authenticated());
    }
}
