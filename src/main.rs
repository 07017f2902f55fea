// oncoscope - main.rs
// Interactive screening shell: load config and classifier, then read
// measurement lines and commands until quit.

use oncoscope::config_loader::load_config;
use oncoscope::errors::ScreenError;
use oncoscope::session::ScreeningSession;
use oncoscope::verdict::TumorLabel;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    let banner = r#"
 ██████╗ ███╗   ██╗ ██████╗ ██████╗ ███████╗ ██████╗ ██████╗ ██████╗ ███████╗
██╔═══██╗████╗  ██║██╔════╝██╔═══██╗██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝
██║   ██║██╔██╗ ██║██║     ██║   ██║███████╗██║     ██║   ██║██████╔╝█████╗
██║   ██║██║╚██╗██║██║     ██║   ██║╚════██║██║     ██║   ██║██╔═══╝ ██╔══╝
╚██████╔╝██║ ╚████║╚██████╗╚██████╔╝███████║╚██████╗╚██████╔╝██║     ███████╗
 ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ╚═════╝ ╚══════╝ ╚═════╝ ╚═════╝ ╚═╝     ╚══════╝
Tumor Screening Runtime
"#;

    println!("{banner}");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let config = match load_config() {
        Ok(cfg) => {
            println!("✅ Config loaded: feature set '{}'", cfg.feature_set);
            cfg
        }
        Err(e) => {
            eprintln!("❌ Failed to load config: {e}");
            exit(1);
        }
    };

    // Load the classifier and build the session. A missing artifact is
    // fatal here, before any prompt is shown.
    let mut session = match ScreeningSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ Failed to start session: {e}");
            if matches!(e, ScreenError::ModelUnavailable { .. }) {
                eprintln!("   Train one first: trainer --csv data/wdbc.csv --output {}", config.model_path);
            }
            exit(1);
        }
    };

    tracing::debug!("session {} constructed", session.session_id);
    println!("🔬 Session started: {}", session.session_id);
    println!(
        "   Enter {} comma-separated measurements, or 'help' for commands.\n",
        session.schema().arity()
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("❌ Failed to read input: {e}");
                break;
            }
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "explain" => println!("{}\n", session.explain_last()),
            "history" => print_history(&session),
            "chart" => println!("{}", session.chart()),
            "status" => match serde_json::to_string_pretty(&session.status()) {
                Ok(status) => println!("{status}\n"),
                Err(e) => eprintln!("❌ Failed to render status: {e}"),
            },
            _ if input == "report" || input.starts_with("report ") => {
                let stem = input.strip_prefix("report").unwrap_or("").trim();
                let stem = if stem.is_empty() { "screening_report" } else { stem };
                match session.export_report(Path::new(stem)) {
                    Ok(export) => println!("✅ Report written to {}\n", export.path.display()),
                    Err(e) => println!("{e}\n"),
                }
            }
            measurements => run_prediction(&mut session, measurements),
        }
    }

    println!("Session closed. {} prediction(s) recorded.", session.history().len());
}

fn run_prediction(session: &mut ScreeningSession, input: &str) {
    match session.predict_line(input) {
        Ok(verdict) => {
            let marker = match verdict.label {
                TumorLabel::Malignant => "🔴",
                TumorLabel::Benign => "🟢",
            };
            println!(
                "Prediction: {} {marker} ({} confidence)\n",
                verdict.label,
                verdict.confidence_percent()
            );
        }
        Err(ScreenError::InvalidInput(e)) => {
            println!("Invalid input: {e}. Please enter proper numbers.\n");
        }
        Err(e) => eprintln!("❌ Prediction failed: {e}"),
    }
}

fn print_history(session: &ScreeningSession) {
    let history = session.history();
    if history.is_empty() {
        println!("No predictions yet.\n");
        return;
    }
    for (i, verdict) in history.all().iter().enumerate() {
        println!("{}. {} - {}", i + 1, verdict.label, verdict.confidence_percent());
    }
    println!();
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 <v1,v2,...>     run a prediction on comma-separated measurements\n\
         \x20 explain         why the last result came out the way it did\n\
         \x20 history         list all predictions this session\n\
         \x20 chart           chronological benign(1)/malignant(0) chart\n\
         \x20 report [path]   export the session report\n\
         \x20 status          session status as JSON\n\
         \x20 quit            leave\n"
    );
}
