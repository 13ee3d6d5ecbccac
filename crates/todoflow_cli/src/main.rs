use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use todoflow_cli::cli::{
    Cli, Command, ConfigOverrideTarget, FilterCommand, SessionCommand, SessionLine,
    parse_config_override,
};
use todoflow_cli::render::{dashboard_json, render_dashboard};
use todoflow_core::config::{self, Config, ConfigOverrides, LandingTheme};
use todoflow_core::dashboard::{self, DashboardView};
use todoflow_core::error::AppError;
use todoflow_core::form::{EditDialog, TodoForm};
use todoflow_core::landing::LandingPage;
use todoflow_core::model::{
    NewTodo, Priority, PriorityFilter, StatusFilter, Todo, TodoId, TodoPatch, parse_due_date,
};
use todoflow_core::notice::{Notice, NoticeLevel, Notifier};
use todoflow_core::session::{Screen, Session};
use todoflow_core::store::{JsonFileStore, TodoStore};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TODOFLOW_LOG";

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("[ok] {notice}"),
            NoticeLevel::Info => println!("[info] {notice}"),
            NoticeLevel::Error => eprintln!("[error] {notice}"),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn load_config(raw_overrides: &[String]) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "ignoring unreadable config");
    }

    let mut overrides = ConfigOverrides::default();
    for raw in raw_overrides {
        let parsed = parse_config_override(raw).map_err(AppError::validation)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::StatusFilter => {
                overrides.status_filter = Some(parsed.value.parse()?);
            }
            ConfigOverrideTarget::PriorityFilter => {
                overrides.priority_filter = Some(parsed.value.parse()?);
            }
        }
    }

    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, AppError> {
    raw.map(str::parse).transpose()
}

fn print_todo_json(todo: &Todo) -> Result<(), AppError> {
    println!("{}", serde_json::to_value(todo)?);
    Ok(())
}

fn print_landing(theme: LandingTheme, json: bool) {
    let page = LandingPage::new(theme);
    if json {
        println!(
            "{}",
            serde_json::json!({
                "theme": theme.name(),
                "headline": format!("{} {}", page.headline, page.highlight),
                "features": page.features.iter().map(|f| f.title).collect::<Vec<_>>(),
            })
        );
    } else {
        println!("{}", page.render());
    }
}

fn open_store(session: &Session) -> Result<JsonFileStore, AppError> {
    session.require()?;
    JsonFileStore::open()
}

fn run_command(
    command: Command,
    json: bool,
    config: &Config,
    session: &Session,
) -> Result<(), AppError> {
    match command {
        Command::Add {
            title,
            description,
            priority,
            due,
        } => {
            let mut store = open_store(session)?;
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::validation("title is required")),
            };
            let draft = NewTodo {
                title,
                description,
                priority: parse_priority(priority.as_deref())?.unwrap_or_default(),
                due_date: due.as_deref().map(parse_due_date).transpose()?,
            };

            let id = store.create(draft)?;
            let todo = store.get(&id)?;
            if json {
                print_todo_json(&todo)?;
            } else {
                println!("Added todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Edit {
            id,
            title,
            description,
            priority,
        } => {
            let mut store = open_store(session)?;
            let id: TodoId = id.parse()?;
            let patch = TodoPatch {
                title,
                description,
                priority: parse_priority(priority.as_deref())?,
            };
            if patch.is_empty() {
                return Err(AppError::validation(
                    "nothing to update (use --title, --description or --priority)",
                ));
            }

            store.update(&id, patch)?;
            let todo = store.get(&id)?;
            if json {
                print_todo_json(&todo)?;
            } else {
                println!("Updated todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Toggle { id } => {
            let mut store = open_store(session)?;
            let id: TodoId = id.parse()?;
            store.toggle(&id)?;
            let todo = store.get(&id)?;
            if json {
                print_todo_json(&todo)?;
            } else if todo.completed {
                println!("Completed todo: {} ({})", todo.title, todo.id);
            } else {
                println!("Reopened todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Delete { id } => {
            let mut store = open_store(session)?;
            let id: TodoId = id.parse()?;
            let todo = store.get(&id)?;
            store.remove(&id)?;
            if json {
                print_todo_json(&todo)?;
            } else {
                println!("Deleted todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::List { status, priority } => {
            let store = open_store(session)?;
            let status_filter = match status {
                Some(value) => value.parse()?,
                None => config.status_filter(),
            };
            let priority_filter = match priority {
                Some(value) => value.parse()?,
                None => config.priority_filter(),
            };

            let mut view = DashboardView::with_filters(status_filter, priority_filter);
            view.apply_push(store.list()?);
            if json {
                println!("{}", dashboard_json(&view)?);
            } else {
                println!("{}", session.welcome_line());
                println!("{}", render_dashboard(&view, &config.landing_theme().palette()));
            }
        }
        Command::Landing { theme } => {
            let theme = match theme.as_deref() {
                Some(name) => LandingTheme::from_name(name).ok_or_else(|| {
                    AppError::validation(format!("unknown theme '{}'", name.trim()))
                })?,
                None => config.landing_theme(),
            };
            print_landing(theme, json);
        }
    }

    Ok(())
}

/// Picks a todo by its 1-based position in the visible list, or by id.
fn resolve_target(view: &DashboardView, target: &str) -> Result<Todo, AppError> {
    if let Ok(position) = target.trim().parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| view.visible().get(index).map(|todo| (*todo).clone()))
            .ok_or_else(|| AppError::not_found(format!("no todo at position {position}")));
    }

    let id: TodoId = target.parse()?;
    view.find(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("todo {id} not found")))
}

fn run_session_command(
    command: SessionCommand,
    view: &mut DashboardView,
    store: &mut JsonFileStore,
    form: &mut TodoForm,
    notifier: &dyn Notifier,
) -> Result<bool, AppError> {
    match command {
        SessionCommand::Add {
            title,
            description,
            priority,
            due,
        } => {
            let priority = parse_priority(priority.as_deref())?;
            let due_date = due.as_deref().map(parse_due_date).transpose()?;

            // Each line is a complete form; nothing carries over from the last one.
            *form = TodoForm::new();
            form.open();
            form.title = title.unwrap_or_default();
            form.description = description.unwrap_or_default();
            form.priority = priority.unwrap_or_default();
            form.due_date = due_date;
            notifier.notify(&form.submit(store));
        }
        SessionCommand::Edit {
            target,
            title,
            description,
            priority,
        } => {
            let todo = resolve_target(view, &target)?;
            let mut dialog = EditDialog::for_todo(&todo);
            dialog.open_with(&todo);
            if let Some(title) = title {
                dialog.title = title;
            }
            if let Some(description) = description {
                dialog.description = description;
            }
            if let Some(priority) = parse_priority(priority.as_deref())? {
                dialog.priority = priority;
            }
            notifier.notify(&dialog.submit(store));
        }
        SessionCommand::Toggle { target } => {
            let todo = resolve_target(view, &target)?;
            notifier.notify(&dashboard::toggle_item(store, &todo));
        }
        SessionCommand::Delete { target } => {
            let todo = resolve_target(view, &target)?;
            notifier.notify(&dashboard::delete_item(store, &todo));
        }
        SessionCommand::Filter { filter } => {
            match filter {
                FilterCommand::Status { value } => {
                    view.set_status_filter(value.parse::<StatusFilter>()?);
                }
                FilterCommand::Priority { value } => {
                    view.set_priority_filter(value.parse::<PriorityFilter>()?);
                }
            }
            return Ok(true);
        }
        SessionCommand::List => return Ok(true),
    }

    Ok(false)
}

fn print_session_help() {
    let mut cmd = SessionLine::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive(config: &Config, session: &Session) -> Result<(), AppError> {
    let mut store = JsonFileStore::open()?;
    let subscription = store.subscribe()?;
    tracing::debug!(
        path = %store.path().display(),
        subscription = subscription.id(),
        "dashboard session started"
    );
    let mut view = DashboardView::with_filters(config.status_filter(), config.priority_filter());
    let mut form = TodoForm::new();
    let notifier = TerminalNotifier;
    let palette = config.landing_theme().palette();

    view.sync(&subscription);
    println!("{}", session.welcome_line());
    println!("{}", render_dashboard(&view, &palette));

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_session_help();
            continue;
        }

        let parsed = split_command_line(line).and_then(|args| {
            SessionLine::try_parse_from(args).map_err(normalize_parse_error)
        });
        let outcome = parsed.and_then(|parsed| {
            run_session_command(parsed.command, &mut view, &mut store, &mut form, &notifier)
        });

        let redraw = match outcome {
            Ok(redraw) => redraw,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                false
            }
        };

        if view.sync(&subscription) || redraw {
            println!("{}", render_dashboard(&view, &palette));
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli.config_override)?;
    let session = Session::from_env();

    match cli.command {
        Some(command) => run_command(command, cli.json, &config, &session),
        None => match session.screen(config.landing_theme()) {
            Screen::Landing(theme) => {
                print_landing(theme, cli.json);
                Ok(())
            }
            Screen::Dashboard => run_interactive(&config, &session),
        },
    }
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
