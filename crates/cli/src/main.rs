use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Authors and books CRUD service
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Apply module migrations to the configured store
    Migrate,
    /// Print the route table
    Routes,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => shelf_app::app::serve(settings).await?,
        Command::Migrate => {
            let applied = shelf_app::app::migrate(&settings).await?;
            println!("applied {applied} migrations");
        }
        Command::Routes => {
            for entry in shelf_app::app::routes(&settings) {
                println!("{:<7} {:<24} {}", entry.method, entry.path, entry.summary);
            }
        }
        Command::Config => print_config(&settings),
    }

    Ok(())
}

fn print_config(settings: &Settings) {
    println!("environment      = {:?}", settings.environment);
    println!("server.address   = {}:{}", settings.server.host, settings.server.port);
    println!("server.timeout   = {}ms", settings.server.request_timeout_ms);
    println!("server.prefix    = {:?}", settings.server.api_prefix);
    println!("database.backend = {:?}", settings.database.backend);
    println!(
        "database.url     = {}",
        shelf_db::sanitize_url(&settings.database.endpoint)
    );
    println!(
        "database.scope   = {}/{}",
        settings.database.namespace, settings.database.database
    );
    println!("auth.ownership   = {:?}", settings.auth.ownership);
    println!("auth.header      = {}", settings.auth.caller_header);
    println!("telemetry.format = {:?}", settings.telemetry.log_format);
}
