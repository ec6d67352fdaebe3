use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use ticklist::{api, client, db};

#[derive(Parser)]
#[command(name = "ticklist")]
#[command(about = "Single-resource todo list over an embedded document store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the ticklist server
    Serve {
        /// Address to bind; the default serves browser clients on any interface
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },
    /// List all todos
    List,
    /// Add a new todo
    Add {
        /// Text of the todo
        text: String,
    },
    /// Toggle a todo's completed flag
    Toggle {
        /// Todo id
        id: Uuid,
    },
    /// Delete a todo
    Rm {
        /// Todo id
        id: Uuid,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ticklist=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting ticklist server on port {}", port);

    let db = db::Database::open_default()?;
    db.migrate()?;

    let store: db::DynStore = Arc::new(db);
    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("ticklist server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_todos(todos: &[ticklist::models::Todo]) {
    if todos.is_empty() {
        println!("No todos yet. Add one with `ticklist add <text>`.");
        return;
    }
    for todo in todos {
        let mark = if todo.completed { "x" } else { " " };
        println!("[{}] {}  {}", mark, todo.id, todo.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(&host, port).await?,
        Some(Commands::List) => {
            let mut app = client::TodoApp::new(client::TodoClient::from_env());
            app.load().await;
            print_todos(&app.todos);
        }
        Some(Commands::Add { text }) => {
            let mut app = client::TodoApp::new(client::TodoClient::from_env());
            app.load().await;
            app.draft = text;
            app.add().await;
            print_todos(&app.todos);
        }
        Some(Commands::Toggle { id }) => {
            let mut app = client::TodoApp::new(client::TodoClient::from_env());
            app.load().await;
            app.toggle(id).await;
            print_todos(&app.todos);
        }
        Some(Commands::Rm { id }) => {
            let mut app = client::TodoApp::new(client::TodoClient::from_env());
            app.load().await;
            app.remove(id).await;
            print_todos(&app.todos);
        }
        None => serve("0.0.0.0", 5000).await?,
    }

    Ok(())
}
