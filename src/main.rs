use clap::Parser;
use jobclip::Clipper;
use jobclip::relay::PageAgentOutcome;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let clipper = Clipper::new(config);

    let outcome = run_command(&clipper, &args.command).await;
    if let Err(message) = outcome {
        println!("Error: {}", message);
        std::process::exit(1);
    }
}

/// Run one popup-level operation, mapping every failure to the status
/// string shown to the user
async fn run_command(clipper: &Clipper, command: &Command) -> Result<(), String> {
    match command {
        Command::Capture => {
            let record = clipper.capture().await.map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
            println!("{}", json);
            Ok(())
        }
        Command::Save => {
            println!("Analyzing page...");
            let record = clipper.save().await.map_err(|e| e.to_string())?;
            println!("Saved: {} at {}", record.position, record.company);
            Ok(())
        }
        Command::Connect => {
            println!("Waiting for a dashboard session...");
            match clipper.connect_session().await.map_err(|e| e.to_string())? {
                PageAgentOutcome::Delivered => {
                    println!("Connected successfully! You can now save postings.");
                    Ok(())
                }
                PageAgentOutcome::GaveUp => Err(
                    "No active session found. Log in to the dashboard in the browser and retry."
                        .to_string(),
                ),
            }
        }
        Command::Logout => {
            clipper.logout().map_err(|e| e.to_string())?;
            println!("Disconnected.");
            Ok(())
        }
    }
}
