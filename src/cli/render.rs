use chrono::{DateTime, Utc};
use console::{style, Alignment, StyledObject};
use rust_decimal::Decimal;

use crate::engine::{BudgetComparison, Buckets, GoalProgress};
use crate::model::{Expense, Goal, Income, PaymentMethod, RecurringPeriod, Status, UserProfile};
use crate::terminal::{BulletPointPrinter, LineWriter, Table};
use crate::views::{DashboardSummary, Page, Report};

pub fn print_dashboard(profile: &UserProfile) {
    let summary = DashboardSummary::new(profile);
    println!("{}", style_header(&format!("Welcome, {}", profile.username)));
    println!("Email:        {}", profile.email);
    println!("Birthday:     {}", profile.dob.as_deref().unwrap_or("-"));
    println!("Total money:  {}", style_amount(summary.total_money));
    println!("Incomes:      {}", style_amount(summary.total_incomes));
    println!("Expenses:     {}", style_amount(-summary.total_expenses));
    println!("Net:          {}", style_amount(summary.net));
    println!();

    let printer = BulletPointPrinter::new_stdout();
    printer.print_item(style_header("Expenses"));
    printer.indent().print_items(&profile.expenses, print_expense_item);
    printer.print_item(style_header("Incomes"));
    printer.indent().print_items(&profile.incomes, print_income_item);
    printer.print_item(style_header("Goals"));
    printer.indent().print_items(&profile.goals, print_goal_item);
}

fn print_expense_item<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, expense: &Expense) {
    printer.print_item(format!(
        "{} {} {} {}",
        style_text(&expense.description),
        style_amount(-expense.amount),
        style_date(expense.date),
        style_category(&expense_categories(expense)),
    ));
}

fn print_income_item<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, income: &Income) {
    printer.print_item(format!(
        "{} {} {}",
        style_text(&income.source),
        style_amount(income.amount),
        style_date(income.date),
    ));
}

fn print_goal_item<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, goal: &Goal) {
    printer.print_item(format!(
        "{} {} of {} by {}",
        style(&goal.title).cyan().bold(),
        style_amount(goal.current_progress),
        style_amount(goal.target_amount),
        style_date(goal.deadline),
    ));
}

pub fn print_expenses(page: &Page<Expense>, sorted_by: &str) {
    let mut table = Table::new(&[
        ("ID", Alignment::Left),
        ("Description", Alignment::Left),
        ("Amount", Alignment::Right),
        ("Category", Alignment::Left),
        ("Payment Method", Alignment::Left),
        ("Recurring", Alignment::Left),
        ("Status", Alignment::Left),
        ("Date", Alignment::Left),
    ]);
    for expense in &page.items {
        table.add_row(vec![
            style_id(&expense.id.0).to_string(),
            style_text(&expense.description).to_string(),
            style_amount(expense.amount).to_string(),
            style_category(&expense_categories(expense)).to_string(),
            payment_method(expense.payment_method).to_string(),
            recurring(expense.recurrence()).to_string(),
            style_status(expense.status).to_string(),
            style_date(expense.date).to_string(),
        ]);
    }
    print_page(&table, page, sorted_by, "No expenses found.");
}

pub fn print_incomes(page: &Page<Income>, sorted_by: &str) {
    let mut table = Table::new(&[
        ("ID", Alignment::Left),
        ("Date", Alignment::Left),
        ("Source", Alignment::Left),
        ("Description", Alignment::Left),
        ("Payment", Alignment::Left),
        ("Recurring", Alignment::Left),
        ("Status", Alignment::Left),
        ("Notes", Alignment::Left),
        ("Amount", Alignment::Right),
    ]);
    for income in &page.items {
        table.add_row(vec![
            style_id(&income.id.0).to_string(),
            style_date(income.date).to_string(),
            style_category(income.source.as_deref().unwrap_or("")).to_string(),
            style_text(&income.description).to_string(),
            payment_method(income.payment_method).to_string(),
            recurring(income.recurrence()).to_string(),
            style_status(income.status).to_string(),
            income.notes.clone().unwrap_or_default(),
            style_amount(income.amount).to_string(),
        ]);
    }
    print_page(&table, page, sorted_by, "No incomes found.");
}

pub fn print_goals(page: &Page<Goal>, sorted_by: &str) {
    let mut table = Table::new(&[
        ("ID", Alignment::Left),
        ("Title", Alignment::Left),
        ("Target", Alignment::Right),
        ("Progress", Alignment::Right),
        ("Deadline", Alignment::Left),
        ("Category", Alignment::Left),
    ]);
    for goal in &page.items {
        table.add_row(vec![
            style_id(&goal.id.0).to_string(),
            style(&goal.title).cyan().bold().to_string(),
            format!("{:.2}", goal.target_amount),
            style_percent(goal.percent_complete()).to_string(),
            style_date(goal.deadline).to_string(),
            style_category(goal.category.as_str()).to_string(),
        ]);
    }
    print_page(&table, page, sorted_by, "No goals found.");
}

fn print_page<R>(table: &Table, page: &Page<R>, sorted_by: &str, empty: &str) {
    if table.is_empty() {
        println!("{}", style(empty).italic());
        return;
    }
    table.print();
    println!();
    println!(
        "{}",
        style(format!(
            "Page {} of {} ({} records, sorted by {})",
            page.page, page.page_count, page.total, sorted_by,
        ))
        .dim()
    );
    let mut hints = vec![];
    if page.has_previous {
        hints.push(format!("--page {} for previous", page.page - 1));
    }
    if page.has_next {
        hints.push(format!("--page {} for next", page.page + 1));
    }
    if !hints.is_empty() {
        println!("{}", style(hints.join(", ")).dim());
    }
}

pub fn print_report(report: &Report) {
    print_buckets("Monthly incomes", &report.monthly_incomes);
    print_buckets("Monthly expenses", &report.monthly_expenses);
    print_buckets("Spending by category", &report.spending_by_category);
    print_buckets("Income sources", &report.income_sources);
    print_goal_progress(&report.goal_progress);
    print_budget(&report.budget);
}

fn print_buckets(title: &str, buckets: &Buckets) {
    println!("{}", style_header(title));
    let mut table = Table::new(&[("", Alignment::Left), ("Amount", Alignment::Right)]);
    for (label, amount) in buckets.iter() {
        table.add_row(vec![label.to_string(), format!("{amount:.2}")]);
    }
    if table.is_empty() {
        println!("{}", style("(none)").italic());
    } else {
        table.add_row(vec![
            style("Total").bold().to_string(),
            style(format!("{:.2}", buckets.total())).bold().to_string(),
        ]);
        table.print();
    }
    println!();
}

fn print_goal_progress(goals: &[GoalProgress]) {
    println!("{}", style_header("Goal progress"));
    let mut table = Table::new(&[
        ("Goal", Alignment::Left),
        ("Saved", Alignment::Right),
        ("Target", Alignment::Right),
        ("Progress", Alignment::Right),
    ]);
    for goal in goals {
        table.add_row(vec![
            goal.title.clone(),
            format!("{:.2}", goal.current_progress),
            format!("{:.2}", goal.target_amount),
            style_percent(goal.percent_complete).to_string(),
        ]);
    }
    if table.is_empty() {
        println!("{}", style("(none)").italic());
    } else {
        table.print();
    }
    println!();
}

fn print_budget(budget: &[BudgetComparison]) {
    println!("{}", style_header("Budget vs actual"));
    if budget.is_empty() {
        println!("{}", style("Analytics unavailable").italic());
        return;
    }
    let mut table = Table::new(&[
        ("Category", Alignment::Left),
        ("Actual", Alignment::Right),
        ("Budget", Alignment::Right),
    ]);
    for row in budget {
        let actual = style(format!("{:.2}", row.actual));
        let actual = if row.actual > row.budget {
            actual.red()
        } else {
            actual.green()
        };
        table.add_row(vec![
            row.category.clone(),
            actual.to_string(),
            format!("{:.2}", row.budget),
        ]);
    }
    table.print();
}

fn expense_categories(expense: &Expense) -> String {
    if expense.category_tags.is_empty() {
        expense.category.clone().unwrap_or_default()
    } else {
        expense.category_tags.join(", ")
    }
}

fn payment_method(method: Option<PaymentMethod>) -> &'static str {
    method.map(|method| method.label()).unwrap_or("-")
}

fn recurring(period: Option<RecurringPeriod>) -> &'static str {
    period.map(|period| period.as_str()).unwrap_or("No")
}

pub fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

pub fn style_error(message: &str) -> StyledObject<&str> {
    style(message).red()
}

pub fn style_success(message: &str) -> StyledObject<&str> {
    style(message).green().bold()
}

fn style_id(id: &str) -> StyledObject<&str> {
    style(id).dim()
}

fn style_text(text: &Option<String>) -> StyledObject<&str> {
    style(text.as_deref().unwrap_or("")).italic()
}

fn style_category(category: &str) -> StyledObject<&str> {
    style(category).magenta()
}

fn style_date(date: Option<DateTime<Utc>>) -> StyledObject<String> {
    style(
        date.map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}

pub fn style_amount(amount: Decimal) -> StyledObject<String> {
    let result = style(format!("{amount:.2}")).bold();
    if amount < Decimal::ZERO {
        result.red()
    } else {
        result.green()
    }
}

fn style_status(status: Option<Status>) -> StyledObject<&'static str> {
    match status {
        Some(status @ (Status::Paid | Status::Received)) => style(status.label()).green(),
        Some(status @ Status::Overdue) => style(status.label()).red(),
        Some(status @ Status::Pending) => style(status.label()).yellow(),
        None => style("-"),
    }
}

fn style_percent(percent: Option<Decimal>) -> StyledObject<String> {
    match percent {
        Some(percent) if percent >= Decimal::ONE_HUNDRED => style(format!("{percent}%")).green(),
        Some(percent) => style(format!("{percent}%")),
        None => style("-".to_string()),
    }
}
