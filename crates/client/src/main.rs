//! `taskboard`: terminal client for the taskboard API.

use std::io::Write;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use taskboard_client::api::{ClientError, HttpApi};
use taskboard_client::board::Board;
use taskboard_client::models::{NewTask, TaskEdit};
use taskboard_client::render::{self, Action};
use taskboard_core::types::DbId;

/// Manage tasks and categories on a taskboard server
#[derive(Parser, Debug)]
#[command(name = "taskboard", author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the API
    #[arg(
        long,
        env = "TASKBOARD_API_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories
    Categories {
        /// Mark this category as the selected filter
        #[arg(long, value_name = "ID")]
        selected: Option<DbId>,
    },

    /// Add, rename or delete a category
    #[command(subcommand)]
    Category(CategoryCommand),

    /// List tasks, newest first
    Tasks {
        /// Only tasks in this category
        #[arg(long, value_name = "ID")]
        category: Option<DbId>,
    },

    /// Add, edit, toggle or delete a task
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Create a category
    Add { name: String },

    /// Rename a category
    Rename { id: DbId, name: String },

    /// Delete a category that no task references
    Delete {
        id: DbId,

        /// Delete without prompting for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Create a task
    Add {
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_name = "ID")]
        category: Option<DbId>,
    },

    /// Change fields of a task; omitted fields are left as they are
    Edit(EditArgs),

    /// Flip a task between pending and completed
    Toggle { id: DbId },

    /// Delete a task
    Delete {
        id: DbId,

        /// Delete without prompting for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct EditArgs {
    id: DbId,

    #[arg(long)]
    title: Option<String>,

    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,

    #[arg(long, value_name = "ID", conflicts_with = "clear_category")]
    category: Option<DbId>,

    /// Remove the task's description
    #[arg(long)]
    clear_description: bool,

    /// Move the task out of its category
    #[arg(long)]
    clear_category: bool,
}

impl EditArgs {
    fn into_edit(self) -> TaskEdit {
        let description = if self.clear_description {
            Some(None)
        } else {
            self.description.map(Some)
        };
        let category_id = if self.clear_category {
            Some(None)
        } else {
            self.category.map(Some)
        };

        TaskEdit {
            title: self.title,
            description,
            category_id,
            is_completed: None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let api = HttpApi::new(&cli.api_url).context("Failed to build HTTP client")?;
    let mut board = Board::new(api);

    if let Err((action, err)) = run(&mut board, cli.command).await {
        eprintln!("Error: {}", render::failure_message(action, &err));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

type Failure = (Action, ClientError);

fn fail(action: Action) -> impl FnOnce(ClientError) -> Failure {
    move |err| (action, err)
}

async fn run(board: &mut Board<HttpApi>, command: Command) -> Result<(), Failure> {
    match command {
        Command::Categories { selected } => {
            board.refresh_categories().await.map_err(fail(Action::LoadCategories))?;
            print!("{}", render::categories(board.categories(), selected));
        }

        Command::Tasks { category } => {
            board.refresh_categories().await.map_err(fail(Action::LoadCategories))?;
            board.select_category(category).await.map_err(fail(Action::LoadTasks))?;
            print_tasks(board);
        }

        Command::Category(CategoryCommand::Add { name }) => {
            let category = board.add_category(&name).await.map_err(fail(Action::AddCategory))?;
            println!("Created category {} ({})", category.id, category.name);
            print!("{}", render::categories(board.categories(), board.selected_category()));
        }

        Command::Category(CategoryCommand::Rename { id, name }) => {
            let category = board
                .rename_category(id, &name)
                .await
                .map_err(fail(Action::RenameCategory))?;
            println!("Renamed category {} to {}", category.id, category.name);
            print!("{}", render::categories(board.categories(), board.selected_category()));
        }

        Command::Category(CategoryCommand::Delete { id, yes }) => {
            if !yes && !confirm(&format!("Delete category {id}?")) {
                println!("Cancelled.");
                return Ok(());
            }
            board.delete_category(id).await.map_err(fail(Action::DeleteCategory))?;
            println!("Deleted category {id}");
            print!("{}", render::categories(board.categories(), board.selected_category()));
        }

        Command::Task(TaskCommand::Add {
            title,
            description,
            category,
        }) => {
            let task = NewTask {
                title,
                description,
                category_id: category,
            };
            let created = board.add_task(task).await.map_err(fail(Action::AddTask))?;
            println!("Created task {}", created.id);
            print_tasks(board);
        }

        Command::Task(TaskCommand::Edit(args)) => {
            let id = args.id;
            board
                .edit_task(id, args.into_edit())
                .await
                .map_err(fail(Action::EditTask))?;
            println!("Updated task {id}");
            print_tasks(board);
        }

        Command::Task(TaskCommand::Toggle { id }) => {
            let task = board.toggle_task(id).await.map_err(fail(Action::ToggleTask))?;
            let state = if task.is_completed { "completed" } else { "pending" };
            println!("Task {id} is now {state}");
            print_tasks(board);
        }

        Command::Task(TaskCommand::Delete { id, yes }) => {
            if !yes && !confirm(&format!("Delete task {id}?")) {
                println!("Cancelled.");
                return Ok(());
            }
            board.delete_task(id).await.map_err(fail(Action::DeleteTask))?;
            println!("Deleted task {id}");
            print_tasks(board);
        }
    }
    Ok(())
}

fn print_tasks(board: &Board<HttpApi>) {
    print!(
        "{}",
        render::tasks(&board.heading(), board.tasks(), board.is_loading())
    );
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` declines.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
