use clap::Parser;
use estaciones::cli::{args::Args, commands};
use std::process;

/// Exit code used when the user interrupts with Ctrl+C
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(estaciones::Error::processing_interrupted("Interrupted by user"))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error @ estaciones::Error::ProcessingInterrupted { .. }) => {
            eprintln!("{}", error);
            process::exit(EXIT_INTERRUPTED);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Estaciones - Weather Station Feed Normalizer");
    println!("============================================");
    println!();
    println!("Turn the station list of a regional weather-station network into");
    println!("display-ready records for charts, maps and summary cards.");
    println!();
    println!("USAGE:");
    println!("    estaciones <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    normalize   Normalize an estaciones payload and print the ranked stations");
    println!("    lookup      Find a station by name");
    println!("    dashboard   Render cards, chart and map from a snapshot directory");
    println!("    legend      Print the temperature band legend");
    println!("    watch       Re-normalize a payload file on a fixed interval");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Top 10 stations as JSON, dark palette:");
    println!("    estaciones normalize -i estaciones.json -n 10 --theme dark --format json");
    println!();
    println!("    # Find a station:");
    println!("    estaciones lookup -i estaciones.json \"la toma\"");
    println!();
    println!("    # Render the dashboard from pronostico.json, estaciones.json and resumen.json:");
    println!("    estaciones dashboard --dir ./snapshot");
    println!();
    println!("    # Refresh every minute until Ctrl+C:");
    println!("    estaciones watch -i estaciones.json --interval 60");
    println!();
    println!("For detailed help on any command, use:");
    println!("    estaciones <COMMAND> --help");
}
