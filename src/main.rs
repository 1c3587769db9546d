use doubles_rotation::config::{ServerConfig, Settings};
use doubles_rotation::display::{print_schedule, write_schedule_to_file};
use doubles_rotation::error::{ensure_enough_participants, validate};
use doubles_rotation::parser::{load_roster, load_settings};
use doubles_rotation::schedule::generate;
use doubles_rotation::web;
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn usage() {
    eprintln!("Usage:");
    eprintln!("  doubles-rotation <roster.csv|roster.json> [settings.json] [output.txt]");
    eprintln!("  doubles-rotation web [port]");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let server = ServerConfig::from_env(args.get(2).map(String::as_str));
        println!("Access the API at http://localhost:{}/api/health", server.port);
        web::start_server(server).await?;
        return Ok(());
    }

    let Some(roster_path) = args.get(1) else {
        usage();
        return Ok(());
    };

    info!("Loading roster from {}", roster_path);
    let participants = load_roster(roster_path)?;
    let settings = match args.get(2) {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    println!("Loaded {} participants", participants.len());

    ensure_enough_participants(&participants)?;
    validate(&participants, &settings.config, &settings.constraints)?;

    let rounds = generate(&participants, &settings.config, &settings.constraints);
    print_schedule(&rounds, &participants);

    let output = args.get(3).map(String::as_str).unwrap_or("schedule.txt");
    write_schedule_to_file(&rounds, output)?;
    println!("\nSchedule saved to {}", output);

    Ok(())
}
