//! Small cli over the job tracker. Reads the same `config.toml` shape that
//! embedding applications use, runs one tracker operation, and prints the
//! result.

use clap::Parser;
use serde::Deserialize;
use std::io;

use jobsight::connection::HttpConnection;
use jobsight::tracker::JobTracker;

#[derive(Deserialize, Debug)]
struct RuntimeConfiguration {
  octoprint: jobsight::config::Configuration,
}

#[derive(clap::Subcommand, Deserialize)]
enum CliCommand {
  /// Print the current job's file, filament and time estimates.
  Info,

  /// Print the current job's progress.
  Progress,

  Start,
  Cancel,
  Restart,
  Pause,
  Resume,
  Toggle,
}

#[derive(Deserialize, clap::Parser)]
#[command(author, version = option_env!("JOBSIGHT_VERSION").unwrap_or_else(|| "dev"), about, long_about = None)]
struct CommandLineOptions {
  #[arg(short = 'c', long)]
  config: String,

  #[command(subcommand)]
  command: CliCommand,
}

async fn run(args: CommandLineOptions, config: RuntimeConfiguration) -> io::Result<()> {
  let tracker = JobTracker::new(HttpConnection::new(config.octoprint));

  let outcome = match args.command {
    CliCommand::Info => {
      let info = tracker
        .info()
        .await
        .map_err(|error| io::Error::new(io::ErrorKind::Other, format!("unable to query job - {error}")))?;
      println!("{info:#?}");
      return Ok(());
    }

    CliCommand::Progress => {
      let progress = tracker
        .progress()
        .await
        .map_err(|error| io::Error::new(io::ErrorKind::Other, format!("unable to query progress - {error}")))?;
      println!("{progress}");
      return Ok(());
    }

    CliCommand::Start => tracker.start_job().await,
    CliCommand::Cancel => tracker.cancel_job().await,
    CliCommand::Restart => tracker.restart_job().await,
    CliCommand::Pause => tracker.pause_job().await,
    CliCommand::Resume => tracker.resume_job().await,
    CliCommand::Toggle => tracker.toggle_job().await,
  };

  log::info!("command outcome - {outcome:?}");
  println!("{outcome}");
  Ok(())
}

fn main() -> io::Result<()> {
  if dotenv::dotenv().is_err() {
    eprintln!("warning: no '.env' file detected'");
  }

  env_logger::init();
  let args = CommandLineOptions::parse();
  log::info!("loading config from '{}'", args.config);
  let contents = std::fs::read_to_string(&args.config)?;
  let parsed = toml::from_str::<RuntimeConfiguration>(&contents)?;
  async_std::task::block_on(run(args, parsed))
}
