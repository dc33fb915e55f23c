pub mod adhkar;
pub mod export;
pub mod ibadah;
pub mod init;
pub mod insights;
pub mod log;
pub mod records;
pub mod sessions;
pub mod sets;
pub mod start;
pub mod stats;
pub mod week;

use crate::libs::messages::Message;
use crate::libs::session::SessionService;
use crate::msg_print;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::error::Error;

#[derive(Debug, Args)]
pub struct EndArgs {
    #[arg(long, short, help = "Reflection notes to attach to the session")]
    notes: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start or resume today's session")]
    Start,
    #[command(about = "End today's session")]
    End(EndArgs),
    #[command(about = "Reopen today's completed session")]
    Continue,
    #[command(about = "Log an ibadah set into today's session")]
    Log(log::LogArgs),
    #[command(about = "Display or mutate logged sets")]
    Sets(sets::SetsArgs),
    #[command(about = "List or delete sessions")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Manage tracked ibadah types", arg_required_else_help = true)]
    Ibadah(ibadah::IbadahArgs),
    #[command(about = "Daily stats, streak and minimum viable day")]
    Stats(stats::StatsArgs),
    #[command(about = "Weekly volume table")]
    Week(week::WeekArgs),
    #[command(about = "Personal records and all-time breakdown")]
    Records,
    #[command(about = "Overload suggestions and burnout check")]
    Insights,
    #[command(about = "Track daily adhkar progress", arg_required_else_help = true)]
    Adhkar(adhkar::AdhkarArgs),
    #[command(about = "Export data to JSON or CSV")]
    Export(export::ExportArgs),
    #[command(about = "Restore data from a JSON backup")]
    Import(export::ImportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<(), Box<dyn Error>> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start => start::cmd(),
            Commands::End(args) => end_cmd(args),
            Commands::Continue => continue_cmd(),
            Commands::Log(args) => log::cmd(args),
            Commands::Sets(args) => sets::cmd(args),
            Commands::Sessions(args) => sessions::cmd(args),
            Commands::Ibadah(args) => ibadah::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Week(args) => week::cmd(args),
            Commands::Records => records::cmd(),
            Commands::Insights => insights::cmd(),
            Commands::Adhkar(args) => adhkar::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => export::import_cmd(args),
        }
        .map_err(|e| e.into())
    }
}

fn end_cmd(args: EndArgs) -> anyhow::Result<()> {
    let mut service = SessionService::new()?;
    let today = Local::now().date_naive();

    match service.sessions.fetch_by_date(today)? {
        Some(session) => {
            service.end_session(session.id, args.notes.as_deref())?;
            msg_print!(Message::SessionEnded(today.to_string()));
        }
        None => msg_print!(Message::SessionNotFoundForDate(today.to_string())),
    }

    Ok(())
}

fn continue_cmd() -> anyhow::Result<()> {
    let mut service = SessionService::new()?;
    let today = Local::now().date_naive();

    match service.sessions.fetch_by_date(today)? {
        Some(session) => {
            service.continue_session(session.id)?;
            msg_print!(Message::SessionContinued(today.to_string()));
        }
        None => msg_print!(Message::SessionNotFoundForDate(today.to_string())),
    }

    Ok(())
}
