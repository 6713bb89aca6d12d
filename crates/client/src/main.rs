//! daybook-client CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daybook_client::cli::{Cli, Commands, OutputFormat};
use daybook_client::client::DaybookClient;
use daybook_client::output::{format_output, pretty};
use daybook_core::item::{
    CalendarPatch, EntryListFilter, EntryPatch, NewCalendar, NewEntry, NewTask, TaskListFilter,
    TaskPatch,
};
use daybook_core::remote::{CalendarApi, EntryApi, TaskApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybook_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = DaybookClient::new(&cli.base_url);

    match cli.command {
        Commands::Entries(entries_cmd) => {
            use daybook_client::cli::entries::EntriesAction;
            match entries_cmd.action {
                EntriesAction::List {
                    calendar_id,
                    task_id,
                    entry_type,
                    completed,
                    unscheduled,
                } => {
                    let mut filter = EntryListFilter::for_calendar(calendar_id);
                    filter.task_id = task_id;
                    filter.entry_type = entry_type.map(Into::into);
                    filter.is_completed = completed;
                    if unscheduled {
                        filter.has_timestamp = Some(false);
                    }
                    let entries = client.list_entries(&filter).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&entries, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_entries(&entries)),
                    }
                }
                EntriesAction::Get { id } => {
                    let entry = client.get_entry(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&entry, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_entry(&entry)),
                    }
                }
                EntriesAction::Create {
                    calendar_id,
                    title,
                    entry_type,
                    content,
                    timestamp,
                    priority,
                    tag,
                    color,
                    task_id,
                } => {
                    let mut input = NewEntry::new(calendar_id, title)
                        .with_entry_type(entry_type.into())
                        .with_priority(priority)
                        .with_tags(tag);
                    input.content = content;
                    input.timestamp = timestamp;
                    input.color = color;
                    input.task_id = task_id;

                    let entry = client.create_entry(&input).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&entry, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_entry(&entry))
                        }
                    }
                }
                EntriesAction::Update {
                    id,
                    title,
                    content,
                    timestamp,
                    priority,
                    color,
                } => {
                    let patch = EntryPatch {
                        title,
                        content,
                        timestamp,
                        priority,
                        color,
                        ..EntryPatch::default()
                    };
                    let entry = client.update_entry(id, &patch).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&entry, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_entry(&entry))
                        }
                    }
                }
                EntriesAction::Delete { id } => {
                    client.delete_entry(id).await?;
                    if !cli.quiet {
                        println!("Deleted entry {}", id);
                    }
                }
                EntriesAction::Complete { id, undo } => {
                    let entry = client.set_entry_completion(id, !undo).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&entry, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_entry(&entry))
                        }
                    }
                }
            }
        }
        Commands::Tasks(tasks_cmd) => {
            use daybook_client::cli::tasks::TasksAction;
            match tasks_cmd.action {
                TasksAction::List {
                    calendar_id,
                    status,
                } => {
                    let mut filter = TaskListFilter::for_calendar(calendar_id);
                    filter.status = status.map(Into::into);
                    let tasks = client.list_tasks(&filter).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&tasks, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_tasks(&tasks)),
                    }
                }
                TasksAction::Get { id } => {
                    let task = client.get_task(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_task(&task)),
                    }
                }
                TasksAction::Create {
                    calendar_id,
                    title,
                    description,
                    due_date,
                    color,
                } => {
                    let mut input = NewTask::new(calendar_id, title);
                    input.description = description;
                    input.due_date = due_date;
                    input.color = color;

                    let task = client.create_task(&input).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_task(&task))
                        }
                    }
                }
                TasksAction::Update {
                    id,
                    title,
                    description,
                    due_date,
                } => {
                    let patch = TaskPatch {
                        title,
                        description,
                        due_date,
                        ..TaskPatch::default()
                    };
                    let task = client.update_task(id, &patch).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_task(&task))
                        }
                    }
                }
                TasksAction::Delete { id } => {
                    client.delete_task(id).await?;
                    if !cli.quiet {
                        println!("Deleted task {}", id);
                    }
                }
                TasksAction::Complete { id } => {
                    let task = client
                        .set_task_status(id, daybook_core::item::TaskStatus::Completed)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Completed:\n{}", pretty::format_task(&task))
                        }
                    }
                }
                TasksAction::Reopen { id } => {
                    let task = client
                        .set_task_status(id, daybook_core::item::TaskStatus::Active)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Reopened:\n{}", pretty::format_task(&task))
                        }
                    }
                }
                TasksAction::Archive { id } => {
                    let task = client
                        .set_task_status(id, daybook_core::item::TaskStatus::Archived)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&task, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Archived:\n{}", pretty::format_task(&task))
                        }
                    }
                }
            }
        }
        Commands::Calendars(calendars_cmd) => {
            use daybook_client::cli::calendars::CalendarsAction;
            match calendars_cmd.action {
                CalendarsAction::List => {
                    let calendars = client.list_calendars().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&calendars, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_calendars(&calendars))
                        }
                    }
                }
                CalendarsAction::Get { id } => {
                    let calendar = client.get_calendar(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&calendar, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_calendar(&calendar)),
                    }
                }
                CalendarsAction::Create {
                    name,
                    color,
                    description,
                } => {
                    let calendar = client
                        .create_calendar(&NewCalendar {
                            name,
                            color,
                            description,
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&calendar, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_calendar(&calendar))
                        }
                    }
                }
                CalendarsAction::Update {
                    id,
                    name,
                    color,
                    description,
                } => {
                    let calendar = client
                        .update_calendar(
                            id,
                            &CalendarPatch {
                                name,
                                color,
                                description,
                            },
                        )
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&calendar, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_calendar(&calendar))
                        }
                    }
                }
                CalendarsAction::Delete { id } => {
                    client.delete_calendar(id).await?;
                    if !cli.quiet {
                        println!("Deleted calendar {}", id);
                    }
                }
            }
        }
        Commands::Health(health_cmd) => {
            use daybook_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Check => {
                    let health = client.health().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&health, cli.format)),
                        OutputFormat::Pretty => println!("Status: {}", health.status),
                    }
                }
            }
        }
    }

    Ok(())
}
