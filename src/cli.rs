//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// AWS MFA session linker.
///
/// Exchanges an MFA code for temporary session credentials, stores them in an
/// MFA section of the credentials file, and writes a linked profile that
/// assumes a role through that section.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// MFA security code [prompted when omitted]
    #[arg(short, long, env = "AWS_MFA_CODE")]
    pub mfa: Option<String>,

    /// Role ARN the linked profile assumes [prompted when omitted]
    #[arg(short = 'l', long, env = "AWS_MFA_LINKED_ROLE")]
    pub linked_role: Option<String>,

    /// Session duration in seconds (900-129600)
    #[arg(short, long, env = "AWS_SESSION_DURATION", default_value = "43200")]
    pub duration: u32,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub quiet: bool,

    /// Region for the STS request and the linked profile
    #[arg(short, long, env = "AWS_MFA_REGION", default_value = "eu-central-1")]
    pub region: String,

    /// Credentials file section receiving the session credentials
    #[arg(short, long, env = "AWS_MFA_SECTION", default_value = "mfa")]
    pub section: String,

    /// Credentials file section for the linked role profile
    #[arg(short = 'p', long, env = "AWS_MFA_LINKED_PROFILE", default_value = "sg1")]
    pub linked_profile: String,

    /// Path to AWS credentials file [default: ~/.aws/credentials]
    #[arg(short, long, env = "AWS_SHARED_CREDENTIALS_FILE")]
    pub credentials_path: Option<PathBuf>,
}
