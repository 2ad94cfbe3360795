use std::process;

use clap::Parser;
use colored::*;

use finchat::agent::get_finance_agent;
use finchat::api::{post_run, process_run_stream, RunRequest};
use finchat::cli::Args;
use finchat::config::Config;
use finchat::error::{FinchatError, Result};
use finchat::models::Role;
use finchat::session::{
    new_session_id, resolve_selection, session_options, FilesystemSessionStore, SessionStorage,
};
use finchat::transcript::{export_transcript, rebuild_transcript, ChatContext};
use finchat::ui::display_transcript;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let storage: Box<dyn SessionStorage> = Box::new(FilesystemSessionStore::new());

    // Handle --clear before anything touches the session list
    if args.clear_sessions {
        storage.clear_all_sessions()?;
        println!("{}", "All saved sessions cleared.".green());
        return Ok(());
    }

    let config = Config::from_env_and_args(&args)?;

    let sessions = storage.get_all_sessions()?;
    let options = session_options(&sessions, &config.user_id);

    if args.list_sessions {
        if options.is_empty() {
            println!("{}", "No saved sessions available.".dimmed());
        } else {
            for option in &options {
                if option.display == option.id {
                    println!("{}", option.id);
                } else {
                    println!("{} {}", option.display, format!("({})", option.id).dimmed());
                }
            }
        }
        return Ok(());
    }

    // Resolve the active session: explicit selection > most recent > fresh
    let session_id = if args.new_session {
        new_session_id()
    } else if let Some(wanted) = &args.session {
        match resolve_selection(&options, wanted) {
            Some(option) => option.id.clone(),
            None => {
                return Err(FinchatError::SessionError(format!(
                    "no saved session matching '{}'",
                    wanted
                )))
            }
        }
    } else if let Some(latest) = options.first() {
        latest.id.clone()
    } else {
        new_session_id()
    };

    if config.verbose {
        eprintln!(
            "{}",
            format!("[fin] Loading {} run: {}", config.user_id, session_id).dimmed()
        );
    }

    // Session switch: a factory or storage failure aborts here with
    // stored state untouched
    let mut context = ChatContext::new(session_id.clone());
    let mut agent = match get_finance_agent(&config.user_id, &session_id, storage) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("{}", format!("Error loading session: {}", e).red());
            process::exit(1);
        }
    };

    rebuild_transcript(&mut context.transcript, agent.runs());
    if config.verbose {
        eprintln!(
            "{}",
            format!(
                "[fin] Restored {} messages from session history",
                context.transcript.len()
            )
            .dimmed()
        );
    }

    let mut acted = false;

    if let Some(new_name) = &args.rename {
        agent.rename_session(new_name)?;
        println!("{}", format!("Session renamed to '{}'.", new_name).green());
        acted = true;
    }

    if let Some(path) = &args.export {
        let document = export_transcript(&context.transcript);
        let path = if path.is_empty() {
            format!(
                "finance-chat-{}.md",
                chrono::Local::now().format("%Y%m%d-%H%M%S")
            )
        } else {
            path.clone()
        };
        std::fs::write(&path, document)?;
        println!("{}", format!("Transcript exported to {}.", path).green());
        acted = true;
    }

    if args.message.is_empty() {
        if args.show_history || args.session.is_some() || args.new_session {
            if context.transcript.is_empty() {
                println!("{}", "No messages in this session yet.".dimmed());
            } else {
                display_transcript(&context.transcript);
            }
        } else if !acted {
            print_usage();
            process::exit(1);
        }
        return Ok(());
    }

    // Chat turn
    let api_key = config.api_key.clone().ok_or_else(|| {
        FinchatError::ConfigError("FINCHAT_API_KEY environment variable not set".to_string())
    })?;

    let prompt = args.message.join(" ");
    context
        .transcript
        .append(Role::User, prompt.clone(), None, None);

    let request = RunRequest {
        message: prompt.clone(),
        user_id: config.user_id.clone(),
        session_id: session_id.clone(),
        stream: true,
    };

    if config.verbose {
        eprintln!(
            "{}",
            format!("[fin] Using endpoint: {}", config.api_endpoint).dimmed()
        );
    }

    let response = post_run(&api_key, &config.api_endpoint, &request).await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(FinchatError::ApiError { status, message });
    }

    let output = process_run_stream(response, config.stream_timeout, config.verbose).await?;

    if !output.content.is_empty() {
        let tools = if output.tools.is_empty() {
            None
        } else {
            Some(output.tools)
        };
        context
            .transcript
            .append(Role::Assistant, output.content.clone(), tools.clone(), None);

        if let Err(e) = agent.record_run(&prompt, &output.content, tools) {
            if config.verbose {
                eprintln!(
                    "{}",
                    format!("[fin] Warning: Failed to save session: {}", e).dimmed()
                );
            }
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("{}", "Usage: fin [OPTIONS] <message>".red());
    eprintln!(
        "{}",
        "  -n, --new                  Start a new session".dimmed()
    );
    eprintln!(
        "{}",
        "  -s, --session <ID|NAME>    Select a saved session".dimmed()
    );
    eprintln!(
        "{}",
        "      --list-sessions        List saved sessions".dimmed()
    );
    eprintln!(
        "{}",
        "      --rename <NAME>        Rename the active session".dimmed()
    );
    eprintln!(
        "{}",
        "      --show-history         Print the session transcript".dimmed()
    );
    eprintln!(
        "{}",
        "      --export [PATH]        Export the transcript as markdown".dimmed()
    );
    eprintln!(
        "{}",
        "      --clear                Delete all saved sessions".dimmed()
    );
}
