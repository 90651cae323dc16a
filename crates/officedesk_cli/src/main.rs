//! Command-line front end for the office desk core.
//!
//! # Responsibility
//! - Resolve configuration from flags and `OFFICEDESK_*` variables.
//! - Open the store, run one use-case, print plain `key=value` lines.

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use officedesk_core::db::{open_db, open_db_in_memory};
use officedesk_core::{
    authenticate, filter_appointments, init_logging, initialize, month_markers,
    Appointment, AppointmentFilter, AppointmentStatus, AppointmentWorkflow, ChatService, CoreConfig,
    NotificationCenter, Priority, PriorityFilter, ScheduleRequest, Session, SqliteKeyValueStore,
    StatusFilter, User, UserDirectory, UserRole,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "officedesk",
    about = "Appointments, chat and notifications for a small office",
    version
)]
struct Cli {
    /// SQLite file holding all collections. Falls back to `OFFICEDESK_DB`.
    #[arg(long = "db", value_name = "path", global = true)]
    db_path: Option<PathBuf>,
    /// Use a throwaway in-memory store.
    #[arg(long, global = true)]
    ephemeral: bool,
    /// Log level. Falls back to `OFFICEDESK_LOG_LEVEL`.
    #[arg(long, value_name = "level", global = true)]
    log_level: Option<String>,
    /// Absolute log directory. Falls back to `OFFICEDESK_LOG_DIR`.
    #[arg(long, value_name = "dir", global = true)]
    log_dir: Option<PathBuf>,
    #[command(flatten)]
    credentials: Credentials,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Credentials {
    /// Username for commands that act on behalf of a role.
    #[arg(long = "user", global = true)]
    username: Option<String>,
    #[arg(long, global = true)]
    password: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create missing collections.
    Init,
    /// Check credentials and print the resulting session.
    Login,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Appointments(AppointmentsCommand),
    /// Mark days of the month that have appointments.
    Calendar {
        /// Any day in the month, `YYYY-MM-DD`.
        #[arg(long, value_parser = parse_date)]
        month: NaiveDate,
    },
    #[command(subcommand)]
    Chat(ChatCommand),
    #[command(subcommand)]
    Notifications(NotificationsCommand),
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    List,
    Add(UserArgs),
    Update(UserArgs),
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Args)]
struct UserArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    username: String,
    #[arg(long = "new-password")]
    password: String,
    #[arg(long, default_value = "assistant")]
    role: UserRole,
}

#[derive(Debug, Subcommand)]
enum AppointmentsCommand {
    /// Filtered listing, newest first.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long, default_value = "all")]
        priority: PriorityFilter,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Appointments on one date.
    Day {
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    Schedule {
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "09:00")]
        time: String,
        #[arg(long)]
        person: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "normal")]
        priority: Priority,
    },
    /// Change date, time, person, notes or priority; status is kept.
    Edit(EditArgs),
    Status {
        #[arg(long)]
        id: String,
        #[arg(long)]
        to: AppointmentStatus,
    },
    Notes {
        #[arg(long)]
        id: String,
        #[arg(long)]
        text: String,
    },
}

#[derive(Debug, Default, Args)]
struct EditArgs {
    #[arg(long)]
    id: String,
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    person: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    priority: Option<Priority>,
}

impl EditArgs {
    /// `current` with every supplied flag applied.
    fn apply(self, current: Appointment) -> Appointment {
        Appointment {
            date: self
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or(current.date),
            time: self.time.unwrap_or(current.time),
            person_name: self.person.unwrap_or(current.person_name),
            notes: self.notes.unwrap_or(current.notes),
            priority: self.priority.unwrap_or(current.priority),
            ..current
        }
    }
}

#[derive(Debug, Subcommand)]
enum ChatCommand {
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        text: String,
    },
    Show {
        #[arg(long)]
        between: String,
        #[arg(long)]
        and: String,
    },
}

#[derive(Debug, Subcommand)]
enum NotificationsCommand {
    List {
        #[arg(long)]
        recipient: String,
    },
    Read {
        #[arg(long)]
        id: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli);
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)
            .with_context(|| format!("failed to start logging in {}", log_dir.display()))?;
    }

    let conn = if cli.ephemeral {
        open_db_in_memory().context("failed to open in-memory store")?
    } else {
        open_db(&config.db_path)
            .with_context(|| format!("failed to open {}", config.db_path.display()))?
    };
    let store = SqliteKeyValueStore::new(&conn);
    initialize(&store).context("failed to initialize collections")?;

    match cli.command {
        Command::Init => println!("status=ok db={}", config.db_path.display()),
        Command::Login => {
            let session = require_session(&store, &cli.credentials)?;
            println!("role={} name={}", session.role, session.name);
        }
        Command::Users(command) => run_users(&store, command)?,
        Command::Appointments(command) => run_appointments(&store, &cli.credentials, command)?,
        Command::Calendar { month } => {
            let workflow = AppointmentWorkflow::new(&store);
            for (day, marker) in month_markers(workflow.book(), month)? {
                println!("date={day} marker={marker:?}");
            }
        }
        Command::Chat(command) => run_chat(&store, command)?,
        Command::Notifications(command) => run_notifications(&store, command)?,
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(path) = &cli.db_path {
        config.db_path = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

fn require_session(
    store: &SqliteKeyValueStore<'_>,
    credentials: &Credentials,
) -> anyhow::Result<Session> {
    let username = credentials.username.as_deref().unwrap_or_default();
    let password = credentials.password.as_deref().unwrap_or_default();
    authenticate(&UserDirectory::new(store), username, password)?
        .ok_or_else(|| anyhow!("invalid credentials; pass --user and --password"))
}

fn run_users(store: &SqliteKeyValueStore<'_>, command: UsersCommand) -> anyhow::Result<()> {
    let directory = UserDirectory::new(store);
    match command {
        UsersCommand::List => {
            for user in directory.list()? {
                println!(
                    "id={} username={} name={} role={}",
                    user.id, user.username, user.name, user.role
                );
            }
        }
        UsersCommand::Add(args) => {
            let user = directory.create(user_from_args(args)?)?;
            println!("status=created id={}", user.id);
        }
        UsersCommand::Update(args) => {
            let user = directory.update(user_from_args(args)?)?;
            println!("status=updated id={}", user.id);
        }
        UsersCommand::Delete { id } => {
            directory.delete(&id)?;
            println!("status=deleted id={id}");
        }
    }
    Ok(())
}

fn user_from_args(args: UserArgs) -> anyhow::Result<User> {
    let user = User::new(args.id, args.name, args.username, args.password, args.role);
    if let Some(field) = user.missing_field() {
        bail!("required field `{field}` is empty");
    }
    Ok(user)
}

fn run_appointments(
    store: &SqliteKeyValueStore<'_>,
    credentials: &Credentials,
    command: AppointmentsCommand,
) -> anyhow::Result<()> {
    let workflow = AppointmentWorkflow::new(store);
    match command {
        AppointmentsCommand::List {
            search,
            status,
            priority,
            from,
            to,
        } => {
            let filter = AppointmentFilter {
                search_text: search,
                status,
                priority,
                date_from: from,
                date_to: to,
            };
            let appointments = workflow.book().list()?;
            for appointment in filter_appointments(&appointments, &filter) {
                print_appointment(&appointment);
            }
        }
        AppointmentsCommand::Day { date } => {
            let key = date.format("%Y-%m-%d").to_string();
            for appointment in workflow.book().list_by_date(&key)? {
                print_appointment(&appointment);
            }
        }
        AppointmentsCommand::Schedule {
            date,
            time,
            person,
            notes,
            priority,
        } => {
            let session = require_session(store, credentials)?;
            let request = ScheduleRequest {
                date: date.format("%Y-%m-%d").to_string(),
                time,
                person_name: person,
                notes,
                priority,
            };
            print_appointment(&workflow.schedule(&session, request)?);
        }
        AppointmentsCommand::Edit(args) => {
            let session = require_session(store, credentials)?;
            let current = workflow
                .book()
                .find_by_id(&args.id)?
                .ok_or_else(|| anyhow!("appointment `{}` not found", args.id))?;
            print_appointment(&workflow.edit(&session, args.apply(current))?);
        }
        AppointmentsCommand::Status { id, to } => {
            let session = require_session(store, credentials)?;
            print_appointment(&workflow.change_status(&session, &id, to)?);
        }
        AppointmentsCommand::Notes { id, text } => {
            print_appointment(&workflow.update_notes(&id, text)?);
        }
    }
    Ok(())
}

fn print_appointment(appointment: &Appointment) {
    println!(
        "id={} date={} time={} person={:?} priority={} status={} notes={:?}",
        appointment.id,
        appointment.date,
        appointment.time,
        appointment.person_name,
        appointment.priority,
        appointment.status,
        appointment.notes
    );
}

fn run_chat(store: &SqliteKeyValueStore<'_>, command: ChatCommand) -> anyhow::Result<()> {
    let chat = ChatService::new(store);
    match command {
        ChatCommand::Send { from, to, text } => match chat.send(&from, &to, text)? {
            Some(message) => println!("status=sent id={}", message.id),
            None => println!("status=skipped reason=blank_content"),
        },
        ChatCommand::Show { between, and } => {
            for message in chat.conversation(&between, &and)? {
                println!(
                    "[{}] {} -> {}: {}",
                    message.timestamp, message.sender, message.recipient, message.content
                );
            }
        }
    }
    Ok(())
}

fn run_notifications(
    store: &SqliteKeyValueStore<'_>,
    command: NotificationsCommand,
) -> anyhow::Result<()> {
    let center = NotificationCenter::new(store);
    match command {
        NotificationsCommand::List { recipient } => {
            println!("unread={}", center.unread_count(&recipient)?);
            for notification in center.list_for(&recipient)? {
                println!(
                    "id={} read={} timestamp={} title={:?} message={:?}",
                    notification.id,
                    notification.read,
                    notification.timestamp,
                    notification.title,
                    notification.message
                );
            }
        }
        NotificationsCommand::Read { id } => {
            center.mark_read(&id)?;
            println!("status=ok id={id}");
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{raw}`: {err}"))
}
