use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use medremind_console::form::FormFields;
use medremind_models::session::Session;

#[derive(Parser, Debug)]
#[command(name = "medremind", version, about = "Schedule and track medication reminders")]
pub struct Cli {
    /// Keep reminders and messages in memory instead of calling the service
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule a medication reminder
    Create(CreateArgs),
    /// List every scheduled reminder with its status
    List,
    /// Print status changes until Ctrl-C
    Watch {
        /// Seconds between polls, defaults to `watch.interval_secs`
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: Option<u64>,
    },
    /// Send a one-off SMS
    SendSms {
        #[arg(long)]
        to: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Store an access token for later commands
    Login(LoginArgs),
    Logout,
    Whoami,
}

/// Values are passed to the form as typed; the form validates them.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub medication: String,
    /// Local wall-clock time, e.g. 2025-06-01T09:30
    #[arg(long)]
    pub send_at: String,
    /// Repeat daily for this many days
    #[arg(long)]
    pub repeat_days: Option<String>,
}

impl From<CreateArgs> for FormFields {
    fn from(value: CreateArgs) -> Self {
        FormFields {
            name: value.name,
            phone: value.phone,
            medication: value.medication,
            send_at: value.send_at,
            repeat_days: value.repeat_days.unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub token: String,
    /// RFC 3339 timestamp after which the token is discarded
    #[arg(long, value_parser = parse_expiry)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<LoginArgs> for Session {
    fn from(value: LoginArgs) -> Self {
        Session {
            doctor_email: value.email,
            access_token: value.token,
            expires_at: value.expires_at,
        }
    }
}

fn parse_expiry(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|datetime| datetime.with_timezone(&Utc))
}
