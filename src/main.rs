//! Interactive sales-chat session over the Conversation Analysis Service.
//!
//! Connects to the configured service, then reads commands from stdin:
//!
//! ```text
//! :customer <text>   append a customer message
//! :agent <text>      append an agent message (plain lines do the same)
//! :goal <text>       set the conversation goal
//! :run               submit the accumulated context for analysis
//! :results           print the current analysis results
//! :quit              exit
//! ```

use std::process::exit;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use saleschat::adapters::{attach_session_bridge, WsAnalysisClient};
use saleschat::application::SessionManager;
use saleschat::config::AppConfig;
use saleschat::domain::conversation::Sender;
use saleschat::domain::session::SessionEvent;

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let (client, service_events) =
        match WsAnalysisClient::connect(&config.service, config.session.event_channel_capacity)
            .await
        {
            Ok(connected) => connected,
            Err(err) => {
                eprintln!("Could not reach the analysis service: {err}");
                exit(1);
            }
        };

    let manager = Arc::new(SessionManager::new(
        client,
        config.session.analysis_timeout(),
    ));
    let bridge = attach_session_bridge(Arc::clone(&manager), service_events);

    let (_subscriber, mut session_events) = manager.subscribe().await;
    let printer = tokio::spawn(async move {
        while let Some(event) = session_events.recv().await {
            print_event(&event);
        }
    });

    run_repl(&manager).await;

    bridge.abort();
    printer.abort();
}

fn load_config() -> Result<AppConfig, String> {
    let config = AppConfig::load().map_err(|err| format!("Configuration error: {err}"))?;
    config
        .validate()
        .map_err(|err| format!("Configuration error: {err}"))?;
    Ok(config)
}

async fn run_repl(manager: &Arc<SessionManager<WsAnalysisClient>>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("stdin error: {err}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = if let Some(text) = line.strip_prefix(":customer ") {
            manager.append_message(text, Sender::Customer).await
        } else if let Some(text) = line.strip_prefix(":agent ") {
            manager.append_message(text, Sender::Agent).await
        } else if let Some(text) = line.strip_prefix(":goal ") {
            manager.set_goal(text).await
        } else if line == ":run" {
            manager.run_analysis().await
        } else if line == ":results" {
            for result in manager.results().await {
                println!("  {} ({:.2})", result.option, result.score);
            }
            Ok(())
        } else if line == ":quit" {
            break;
        } else if line.starts_with(':') {
            eprintln!("unknown command: {line}");
            Ok(())
        } else {
            manager.append_message(line, Sender::Agent).await
        };

        if let Err(err) = result {
            eprintln!("error: {err}");
        }
    }
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::MessageAppended(message) => {
            println!("[{}] {}", message.sender(), message.text());
        }
        SessionEvent::GoalChanged(goal) => {
            println!("goal set: {goal}");
        }
        SessionEvent::AnalysisStarted { request_id } => {
            println!("analyzing... ({request_id})");
        }
        SessionEvent::ReplyReceived(message) => {
            println!("[{}] {}", message.sender(), message.text());
        }
        SessionEvent::AnalysisFailed { reason } => {
            println!("analysis failed: {reason}");
        }
        SessionEvent::ResultsReplaced(results) => {
            println!("options:");
            for result in results {
                println!("  {} ({:.2})", result.option, result.score);
            }
        }
        SessionEvent::ConnectivityChanged(connectivity) => {
            println!("connection: {connectivity:?}");
        }
    }
}
