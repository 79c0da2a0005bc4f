//! Application entry point.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use viper_boot::banner;
use viper_boot::error::AppError;
use viper_boot::logging::{init_logging, LogConfig};
use viper_boot::routes;
use viper_boot::{StudentApi, StudentController, StudentService};
use viper_boot_config::Settings;
use viper_boot_docs::{DocServer, OpenApiRegistry};
use viper_boot_schema::{Gender, Person};

#[derive(Parser)]
#[command(name = "viper-boot", version, about = "Student records API boilerplate")]
struct Cli {
    /// Directory containing the settings files.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Settings environment to activate.
    #[arg(long)]
    environment: Option<String>,

    /// Base OpenAPI document.
    #[arg(long, default_value = "openapi.json")]
    spec: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the OpenAPI document and serve the viewer (default).
    Docs,
    /// Run the CRUD operations against the placeholder service.
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    banner::print_banner();

    let mut settings = Settings::load(&cli.config_dir)?;
    if let Some(environment) = &cli.environment {
        settings.set_environment(environment);
    }
    init_logging(&LogConfig::for_environment(settings.environment()))?;

    let profile = settings
        .get_str("PROFILE")
        .unwrap_or_else(|_| "none".to_string());
    tracing::info!(
        environment = settings.environment(),
        profile,
        "settings resolved"
    );

    match cli.command.unwrap_or(Command::Docs) {
        Command::Docs => {
            let mut registry = OpenApiRegistry::from_file(&cli.spec)?;
            routes::register_routes(&mut registry)?;
            registry.write_doc()?;
            tracing::info!(file = viper_boot_docs::DOC_FILE, "wrote OpenAPI document");

            DocServer::new(registry.spec())?.serve().await?;
        }
        Command::Demo => {
            let url = settings.get_str("API.url")?;
            let service = StudentService::new(url)?;
            let controller = StudentController::new(service);
            run_demo(&controller).await?;
        }
    }

    Ok(())
}

/// Exercise every controller operation and print the JSON results.
async fn run_demo<S: StudentApi>(controller: &StudentController<S>) -> Result<(), AppError> {
    println!("{}", controller.get_all().await?);

    let id = Uuid::new_v4();
    println!("{}", controller.get(id).await?);
    println!("{}", controller.post(demo_person()).await?);
    println!("{}", controller.patch(id, demo_person()).await?);
    println!("{}", controller.delete(id).await?);
    Ok(())
}

fn demo_person() -> Person {
    Person {
        first_name: "James".to_string(),
        last_name: "Smith".to_string(),
        dob: NaiveDate::from_ymd_opt(1978, 10, 10).expect("valid date"),
        gender: Gender::Male,
    }
}
