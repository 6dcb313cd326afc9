//! Orchestration of a single credentials refresh.

use aws_smithy_types::date_time::Format;
use log::info;

use crate::{
    cli::Args,
    console::{Console, confirm},
    credentials::{CredentialService, acquire, validate_request},
    device::resolve_device,
    error::{Result, UpdaterError},
    updater::{CredentialsUpdater, ProfileLink},
};

const CONFIRM_QUESTION: &str =
    "⚠ This will update your credentials file. Do you wish to continue? [Y/n] ";

pub struct App<S, U> {
    service: S,
    updater: U,
}

impl<S: CredentialService, U: CredentialsUpdater> App<S, U> {
    pub fn new(service: S, updater: U) -> Self {
        Self { service, updater }
    }

    /// Runs confirm, device selection, token exchange and the file update in order.
    ///
    /// Nothing is sent or written once the user declines, and the credentials
    /// file is only touched after a session token has been issued.
    pub async fn run(&self, args: Args, console: &mut impl Console) -> Result<()> {
        console.write_line("AWS MFA credentials updater")?;
        if !args.quiet && !confirm(console, CONFIRM_QUESTION)? {
            return Err(UpdaterError::UserDeclined);
        }

        let mfa_code = match args.mfa {
            Some(code) => code,
            None => console.prompt("Enter MFA code: ")?,
        };
        let role_arn = match args.linked_role {
            Some(arn) => arn,
            None => console.prompt("Enter the role ARN to link: ")?,
        };
        // Checked again by `acquire`; failing here avoids listing devices first.
        validate_request(&mfa_code, args.duration)?;

        let devices = self.service.list_mfa_devices().await?;
        let serial = resolve_device(&devices, console)?;
        console.write_line(&format!("🔑 Updating MFA session for serial: {serial}"))?;

        let credentials = acquire(&self.service, &mfa_code, &serial, args.duration).await?;
        let expires = credentials.expiration.fmt(Format::DateTime)?;

        let link = ProfileLink {
            mfa_section: args.section,
            linked_profile: args.linked_profile,
            role_arn,
            region: args.region,
        };
        self.updater.update(&credentials, &link, console).await?;
        info!("Success! Credentials expire at: {expires}");

        let profile = &link.linked_profile;
        console.write_line("✓ Successfully updated credentials.")?;
        console.write_line(&format!(
            "🛈 You can now use profile '{profile}' to access your aws services as '{}'",
            link.role_arn
        ))?;
        console.write_line(&format!("For example 'aws s3 ls --profile {profile}'"))?;
        console.write_line(&format!("This expires at {expires}"))?;
        Ok(())
    }
}
