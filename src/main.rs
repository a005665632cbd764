mod appsettings;
mod cli;

use std::{process::ExitCode, sync::Arc, time::Duration};

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command};
use medremind_api::{
    InMemoryReminderApi, InMemorySmsGateway, ReminderApi, SmsGateway,
    http::{HttpReminderApi, HttpSmsGateway},
};
use medremind_console::{
    ConsoleInterface, Report,
    session::{FileSessionStore, SessionContext},
};

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("Could not read .env: {error}");
        }
    }
    pretty_env_logger::init();

    // Usage errors exit with code 2.
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            log::error!("{error:?}");
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings = appsettings::load()?;
    log::debug!("Loaded settings: {settings:?}");

    let store = Arc::new(FileSessionStore::new(settings.session.path.clone()));
    let session = SessionContext::initialize(store, Utc::now()).await;

    let (reminder_api, sms_gateway): (Arc<dyn ReminderApi>, Arc<dyn SmsGateway>) = if cli.offline
    {
        log::info!("Running offline, nothing leaves this process");
        (
            Arc::new(InMemoryReminderApi::new()),
            Arc::new(InMemorySmsGateway::new()),
        )
    } else {
        (
            Arc::new(HttpReminderApi::new(&settings.api, session.current())?),
            Arc::new(HttpSmsGateway::new(&settings.api, session.current())?),
        )
    };

    let mut interface = ConsoleInterface::new(
        reminder_api,
        sms_gateway,
        session,
        settings.display.timezone,
    );

    let report = match cli.command {
        Command::Create(args) => interface.create_reminder(args.into()).await,
        Command::List => interface.list_reminders().await,
        Command::Watch { interval_secs } => {
            let interval = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| settings.watch.interval());
            return watch(&interface, interval).await;
        }
        Command::SendSms { to, message, name } => {
            interface.send_sms(&to, &message, name.as_deref()).await
        }
        Command::Login(args) => interface.login(args.into()).await?,
        Command::Logout => interface.logout().await?,
        Command::Whoami => interface.whoami(),
    };

    Ok(print_report(&report))
}

async fn watch(interface: &ConsoleInterface, interval: Duration) -> anyhow::Result<bool> {
    println!(
        "Watching reminders every {}s, Ctrl-C to stop",
        interval.as_secs()
    );
    let watcher = interface.watch(interval);

    tokio::signal::ctrl_c().await?;
    log::info!("Ctrl-C received, stopping");
    watcher.stop(STOP_TIMEOUT).await;

    Ok(true)
}

fn print_report(report: &Report) -> bool {
    if report.success {
        println!("{}", report.text);
    } else {
        eprintln!("{}", report.text);
    }
    report.success
}
