//! AWS MFA Session Linker
//!
//! Exchanges an MFA code for temporary AWS session credentials and links a
//! role profile to them in the local credentials file.
//!
//! The program performs the following operations:
//! 1. Parses command-line arguments for configuration
//! 2. Confirms with the user before touching the credentials file (unless `--quiet`)
//! 3. Looks up the caller's MFA devices and picks one
//! 4. Uses the MFA code to request temporary AWS credentials from STS
//! 5. Writes the session credentials and a linked role profile into the credentials file

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod console;
mod credentials;
mod device;
mod error;
mod updater;

use app::App;
use cli::Args;
use console::{Console, Terminal};
use credentials::AwsCredentialService;
use error::UpdaterError;
use updater::IniCredentialsUpdater;

/// Main entry point for the AWS MFA session linker.
///
/// A declined confirmation is a normal exit; every other failure is returned
/// and reported with a non-zero status.
#[tokio::main]
async fn main() -> Result<()> {
    // Milestones at INFO without debug noise from the AWS SDK.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let updater = IniCredentialsUpdater::new(args.credentials_path.clone())?;
    let service = AwsCredentialService::new(&args.region).await;
    let mut console = Terminal;

    match App::new(service, updater).run(args, &mut console).await {
        Err(UpdaterError::UserDeclined) => {
            console.write_line("¯\\_(ツ)_/¯")?;
            Ok(())
        }
        result => Ok(result?),
    }
}
