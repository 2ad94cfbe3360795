use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fin")]
#[command(about = "Terminal chat client for a finance-analysis agent", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long = "new", help = "Start a new session")]
    pub new_session: bool,

    #[arg(
        short = 's',
        long = "session",
        help = "Select a saved session by id or name"
    )]
    pub session: Option<String>,

    #[arg(long = "list-sessions", help = "List saved sessions for the current user")]
    pub list_sessions: bool,

    #[arg(long = "rename", help = "Rename the active session")]
    pub rename: Option<String>,

    #[arg(long = "show-history", help = "Print the session transcript")]
    pub show_history: bool,

    #[arg(
        long = "export",
        help = "Export the transcript as markdown (optional path)",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub export: Option<String>,

    #[arg(long = "clear", help = "Delete all saved sessions")]
    pub clear_sessions: bool,

    #[arg(short = 'u', long = "user", help = "User id owning the sessions")]
    pub user: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Agent runtime base URL (e.g. http://localhost:7777)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(help = "Message to send to the assistant")]
    pub message: Vec<String>,
}
