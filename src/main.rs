//! Choreboard CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use choreboard::cli::{Cli, Command, OutputFormat, TaskCommand, TemplateCommand, UserCommand};
use choreboard::config::Config;
use choreboard::domain::{Priority, Role, Task, TaskStatus, User};
use choreboard::expand::{Expander, InstantiateOptions};
use choreboard::store::{Store, TaskFilter};
use choreboard::{seed, session, stats};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("choreboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file, keep stdout for command output
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("choreboard.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let mut store = Store::open(config.storage.db_path()).context("Failed to open store")?;

    match cli.command {
        Command::Init => cmd_init(&mut store),
        Command::Task { command } => match command {
            TaskCommand::Add {
                title,
                category,
                priority,
                points,
                description,
                due,
                assign,
                recurring,
            } => {
                let session = session::resolve(&store, cli.acting_user.as_deref(), config.defaults.user.as_deref())?;
                cmd_task_add(
                    &store,
                    &session.user_id,
                    title,
                    category,
                    priority,
                    points.unwrap_or(config.defaults.points),
                    description,
                    due,
                    assign,
                    recurring,
                )
            }
            TaskCommand::List {
                status,
                category,
                priority,
                assign,
                format,
            } => cmd_task_list(&store, status, category, priority, assign, format),
            TaskCommand::Show { id } => cmd_task_show(&store, &id),
            TaskCommand::Edit {
                id,
                title,
                description,
                category,
                priority,
                points,
                due,
                assign,
            } => cmd_task_edit(&store, &id, title, description, category, priority, points, due, assign),
            TaskCommand::Start { id } => cmd_task_set_status(&store, &id, TaskStatus::InProgress),
            TaskCommand::Complete { id } => cmd_task_set_status(&store, &id, TaskStatus::Completed),
            TaskCommand::Cancel { id } => cmd_task_set_status(&store, &id, TaskStatus::Cancelled),
            TaskCommand::Remove { id } => cmd_task_remove(&store, &id),
        },
        Command::Template { command } => match command {
            TemplateCommand::List { format } => cmd_template_list(&store, format),
            TemplateCommand::Show { id, format } => cmd_template_show(&store, &id, format),
            TemplateCommand::Use {
                id,
                assign,
                start_date,
                format,
            } => {
                let session = session::resolve(&store, cli.acting_user.as_deref(), config.defaults.user.as_deref())?;
                let caller_id = session.user_id.clone();
                cmd_template_use(&mut store, &id, assign, start_date, &caller_id, format)
            }
        },
        Command::User { command } => match command {
            UserCommand::Add {
                username,
                display_name,
                admin,
            } => cmd_user_add(&store, username, display_name, admin),
            UserCommand::List { format } => cmd_user_list(&store, format),
        },
        Command::Categories { format } => cmd_categories(&store, format),
        Command::Stats { user, format } => cmd_stats(&store, user, format),
    }
}

/// Initialize the store and seed builtins
fn cmd_init(store: &mut Store) -> Result<()> {
    let created = seed::seed(store)?;
    if created == 0 {
        println!("Store already initialized.");
    } else {
        println!("Initialized store with {} builtin templates.", created);
        println!("Add a household member next: cb user add <username>");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_task_add(
    store: &Store,
    caller_id: &str,
    title: String,
    category: String,
    priority: Priority,
    points: u32,
    description: Option<String>,
    due: Option<chrono::NaiveDate>,
    assign: Option<String>,
    recurring: Option<String>,
) -> Result<()> {
    let mut task = Task::new(title, category, caller_id)
        .with_priority(priority)
        .with_points(points);
    if let Some(description) = description {
        task = task.with_description(description);
    }
    if let Some(due) = due {
        task = task.with_due_date(due);
    }
    if let Some(username) = assign {
        task = task.assigned_to(resolve_username(store, &username)?);
    }
    if let Some(pattern) = recurring {
        task = task.recurring(pattern);
    }

    store.create_task(&task)?;
    println!("Created task {}", task.id.bold());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_task_edit(
    store: &Store,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<Priority>,
    points: Option<u32>,
    due: Option<chrono::NaiveDate>,
    assign: Option<String>,
) -> Result<()> {
    let mut task = store
        .get_task(id)?
        .ok_or_else(|| eyre::eyre!("Task not found: {}", id))?;

    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = description {
        task.description = Some(description);
    }
    if let Some(category) = category {
        task.category = category;
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }
    if let Some(points) = points {
        task.points = points;
    }
    if let Some(due) = due {
        task.due_date = Some(due);
    }
    if let Some(username) = assign {
        task.assigned_to = Some(resolve_username(store, &username)?);
    }
    task.touch();

    store.update_task(&task)?;
    println!("Updated task {}", task.id.bold());
    Ok(())
}

fn cmd_task_list(
    store: &Store,
    status: Option<TaskStatus>,
    category: Option<String>,
    priority: Option<Priority>,
    assign: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let assigned_to = assign.map(|username| resolve_username(store, &username)).transpose()?;
    let filter = TaskFilter {
        status,
        category,
        priority,
        assigned_to,
    };
    let tasks = store.list_tasks(&filter)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
        OutputFormat::Text => {
            if tasks.is_empty() {
                println!("No tasks.");
                return Ok(());
            }
            for task in &tasks {
                print_task_line(task);
            }
        }
    }
    Ok(())
}

fn cmd_task_show(store: &Store, id: &str) -> Result<()> {
    let task = store
        .get_task(id)?
        .ok_or_else(|| eyre::eyre!("Task not found: {}", id))?;

    println!("{}", task.title.bold());
    println!("  id:       {}", task.id);
    println!("  status:   {}", colored_status(task.status));
    println!("  priority: {}", colored_priority(task.priority));
    println!("  category: {}", task.category);
    println!("  points:   {}", task.points);
    if let Some(description) = &task.description {
        println!("  notes:    {}", description);
    }
    if let Some(due) = task.due_date {
        println!("  due:      {}", due);
    }
    if let Some(assigned_to) = &task.assigned_to {
        println!("  assigned: {}", display_user(store, assigned_to));
    }
    if let Some(depends_on) = &task.depends_on {
        println!("  after:    {}", depends_on);
    }
    if let Some(template_id) = &task.template_id {
        println!("  template: {}", template_id);
    }
    println!("  creator:  {}", display_user(store, &task.created_by));
    Ok(())
}

fn cmd_task_set_status(store: &Store, id: &str, status: TaskStatus) -> Result<()> {
    let mut task = store
        .get_task(id)?
        .ok_or_else(|| eyre::eyre!("Task not found: {}", id))?;
    task.set_status(status);
    store.update_task(&task)?;

    match status {
        TaskStatus::Completed => println!("✓ {} (+{} points)", task.title, task.points),
        _ => println!("{} is now {}", task.title, colored_status(status)),
    }
    Ok(())
}

fn cmd_task_remove(store: &Store, id: &str) -> Result<()> {
    store.delete_task(id)?;
    println!("Removed task {}", id);
    Ok(())
}

fn cmd_template_list(store: &Store, format: OutputFormat) -> Result<()> {
    let templates = store.list_templates()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&templates)?),
        OutputFormat::Text => {
            if templates.is_empty() {
                println!("No templates. Run: cb init");
                return Ok(());
            }
            for template in &templates {
                let icon = template.icon.as_deref().unwrap_or("·");
                println!(
                    "{} {}  {} ({} steps)",
                    icon,
                    template.name.bold(),
                    template.id.dimmed(),
                    template.tasks.len()
                );
            }
        }
    }
    Ok(())
}

fn cmd_template_show(store: &Store, id: &str, format: OutputFormat) -> Result<()> {
    let template = store
        .get_template(id)?
        .ok_or_else(|| eyre::eyre!("Template not found: {}", id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&template)?),
        OutputFormat::Text => {
            println!("{}  {}", template.name.bold(), template.id.dimmed());
            if let Some(description) = &template.description {
                println!("{}", description);
            }
            println!();
            for bp in &template.tasks {
                let dep = bp
                    .depends_on_order
                    .map(|o| format!(" (after step {})", o))
                    .unwrap_or_default();
                println!(
                    "  {}. {} [{}] {}pt{}",
                    bp.order,
                    bp.title,
                    colored_priority(bp.priority),
                    bp.points,
                    dep.dimmed()
                );
            }
        }
    }
    Ok(())
}

fn cmd_template_use(
    store: &mut Store,
    id: &str,
    assign: Option<String>,
    start_date: Option<chrono::NaiveDate>,
    caller_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let assigned_to = assign.map(|username| resolve_username(store, &username)).transpose()?;
    let options = InstantiateOptions { assigned_to, start_date };

    let result = Expander::new(store).instantiate(id, &options, caller_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            println!("Created {} tasks:", result.count);
            for task in &result.tasks {
                print_task_line(task);
            }
        }
    }
    Ok(())
}

fn cmd_user_add(store: &Store, username: String, display_name: Option<String>, admin: bool) -> Result<()> {
    let mut user = User::new(username);
    if let Some(name) = display_name {
        user = user.with_display_name(name);
    }
    if admin {
        user = user.with_role(Role::Admin);
    }
    store.create_user(&user)?;
    println!("Added {} ({})", user.display().bold(), user.id);
    Ok(())
}

fn cmd_user_list(store: &Store, format: OutputFormat) -> Result<()> {
    let users = store.list_users()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Text => {
            if users.is_empty() {
                println!("No members. Add one: cb user add <username>");
                return Ok(());
            }
            for user in &users {
                let role = if user.role == Role::Admin { " [admin]" } else { "" };
                println!("{}  {}{}", user.display().bold(), user.username.dimmed(), role);
            }
        }
    }
    Ok(())
}

fn cmd_categories(store: &Store, format: OutputFormat) -> Result<()> {
    let categories = store.list_categories()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Text => {
            for category in &categories {
                let icon = category.icon.as_deref().unwrap_or("·");
                println!("{} {}", icon, category.name);
            }
        }
    }
    Ok(())
}

fn cmd_stats(store: &Store, user: Option<String>, format: OutputFormat) -> Result<()> {
    let user_id = user.map(|username| resolve_username(store, &username)).transpose()?;
    let today = chrono::Local::now().date_naive();
    let stats = stats::task_stats(store, user_id.as_deref(), today)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Task Statistics");
            println!("---------------");
            println!("Total:       {}", stats.total);
            println!("  Pending:     {}", stats.pending);
            println!("  In progress: {}", stats.in_progress);
            println!("  Completed:   {}", stats.completed);
            println!("  Cancelled:   {}", stats.cancelled);
            println!();
            println!("Active:      {}", stats.active);
            println!("Completion:  {}%", stats.completion_rate);
            println!("Urgent open: {}", stats.urgent);
            println!("Due today:   {}", stats.due_today);
            println!("Overdue:     {}", stats.overdue);
            if !stats.by_category.is_empty() {
                println!();
                println!("By category:");
                for row in &stats.by_category {
                    println!("  {:12} {}", row.category, row.count);
                }
            }
            if !stats.by_priority.is_empty() {
                println!();
                println!("By priority:");
                for row in &stats.by_priority {
                    println!("  {:12} {}", row.priority.as_str(), row.count);
                }
            }
        }
    }
    Ok(())
}

/// Resolve a username to a user id; unknown names are an error here, at the
/// boundary, so the core never sees them
fn resolve_username(store: &Store, username: &str) -> Result<String> {
    let user = store
        .find_user_by_username(username)?
        .ok_or_else(|| eyre::eyre!("Unknown user: {}", username))?;
    Ok(user.id)
}

fn display_user(store: &Store, user_id: &str) -> String {
    match store.get_user(user_id) {
        Ok(Some(user)) => user.display().to_string(),
        _ => user_id.to_string(),
    }
}

fn print_task_line(task: &Task) {
    let due = task.due_date.map(|d| format!("  due {}", d)).unwrap_or_default();
    println!(
        "{} [{}] {}  {}{}",
        colored_status(task.status),
        colored_priority(task.priority),
        task.title.bold(),
        task.id.dimmed(),
        due.dimmed()
    );
}

fn colored_status(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Pending => status.as_str().normal(),
        TaskStatus::InProgress => status.as_str().cyan(),
        TaskStatus::Completed => status.as_str().green(),
        TaskStatus::Cancelled => status.as_str().dimmed(),
    }
}

fn colored_priority(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::Low => priority.as_str().dimmed(),
        Priority::Medium => priority.as_str().normal(),
        Priority::High => priority.as_str().yellow(),
        Priority::Urgent => priority.as_str().red().bold(),
    }
}
