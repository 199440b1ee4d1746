use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use devforum_backend::api::{
    AdminApi, AnswersApi, AuthApi, BadgesApi, CommentsApi, GroupsApi, HealthApi, ImagesApi,
    MessagesApi, ModerationApi, NotificationsApi, QuestionsApi, TagsApi, UsersApi,
};
use devforum_backend::app_data::AppData;
use devforum_backend::{cli, config};

#[derive(Parser)]
#[command(name = "devforum-backend", about = "Q&A forum backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Create an ADMIN account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    config::logging::init();

    let args = Cli::parse();
    let settings = config::Settings::from_env()?;

    let db = Database::connect(&settings.database_url).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            Migrator::up(&db, None).await?;
            tracing::info!("migrations applied");
        }
        Command::CreateAdmin {
            username,
            email,
            password,
        } => {
            Migrator::up(&db, None).await?;
            let admin = cli::bootstrap::create_admin(&db, username, email, password).await?;
            println!("created admin '{}' (id {})", admin.username, admin.id);
        }
        Command::Serve => {
            Migrator::up(&db, None).await?;

            let app = AppData::new(db, &settings);
            app.badge_service.seed_defaults().await?;

            let api_service = OpenApiService::new(
                (
                    HealthApi,
                    AuthApi::new(app.clone()),
                    QuestionsApi::new(app.clone()),
                    AnswersApi::new(app.clone()),
                    CommentsApi::new(app.clone()),
                    TagsApi::new(app.clone()),
                    ModerationApi::new(app.clone()),
                    AdminApi::new(app.clone()),
                    UsersApi::new(app.clone()),
                    MessagesApi::new(app.clone()),
                    NotificationsApi::new(app.clone()),
                    BadgesApi::new(app.clone()),
                    GroupsApi::new(app.clone()),
                    ImagesApi::new(app.clone()),
                ),
                "DevForum API",
                env!("CARGO_PKG_VERSION"),
            )
            .server(format!("http://{}/api", settings.bind_addr));

            let ui = api_service.swagger_ui();
            let route = Route::new().nest("/api", api_service).nest("/swagger", ui);

            tracing::info!(addr = %settings.bind_addr, "starting server");
            Server::new(TcpListener::bind(settings.bind_addr.clone()))
                .run(route)
                .await?;
        }
    }

    Ok(())
}
