//! Session credential acquisition through IAM and STS.

use std::ops::RangeInclusive;

use aws_sdk_iam::Client as IamClient;
use aws_sdk_sts::{Client as StsClient, config::Region};
use aws_smithy_types::{DateTime, error::display::DisplayErrorContext};
use log::{debug, info};

use crate::{
    device::MfaDevice,
    error::{Result, UpdaterError},
};

/// STS accepts session durations from 15 minutes to 36 hours.
pub const SESSION_DURATION_RANGE: RangeInclusive<u32> = 900..=129_600;

/// Temporary credentials returned by `GetSessionToken`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

/// The two remote operations the updater depends on.
pub trait CredentialService {
    async fn list_mfa_devices(&self) -> Result<Vec<MfaDevice>>;

    async fn get_session_token(
        &self,
        serial_number: &str,
        token_code: &str,
        duration: u32,
    ) -> Result<TemporaryCredentials>;
}

/// Checks a session token request before it is sent.
pub fn validate_request(token_code: &str, duration: u32) -> Result<()> {
    if token_code.len() != 6 || !token_code.chars().all(|c| c.is_ascii_digit()) {
        return Err(UpdaterError::InvalidRequest(
            "MFA code must be exactly 6 digits".to_string(),
        ));
    }
    if !SESSION_DURATION_RANGE.contains(&duration) {
        return Err(UpdaterError::InvalidRequest(format!(
            "session duration must be between {} and {} seconds, got {duration}",
            SESSION_DURATION_RANGE.start(),
            SESSION_DURATION_RANGE.end(),
        )));
    }
    Ok(())
}

/// Validates the request and asks `service` for a fresh session token.
///
/// Every call is a new round trip; nothing is cached or retried. The input is
/// checked here even when the caller already validated it, so no malformed
/// request ever reaches STS.
///
/// # Arguments
///
/// * `service` - Remote side performing `GetSessionToken`
/// * `token_code` - Current code from the MFA device, exactly six digits
/// * `serial_number` - ARN of the device the code belongs to
/// * `duration` - Session lifetime in seconds, within [`SESSION_DURATION_RANGE`]
///
/// # Returns
///
/// * `Ok(TemporaryCredentials)` - Access key, secret key, session token and expiry
/// * `Err(UpdaterError::InvalidRequest)` - Code or duration rejected locally
/// * `Err(UpdaterError::CredentialService)` - STS refused the request or was
///   unreachable; the underlying message is carried unchanged
pub async fn acquire(
    service: &impl CredentialService,
    token_code: &str,
    serial_number: &str,
    duration: u32,
) -> Result<TemporaryCredentials> {
    validate_request(token_code, duration)?;
    info!("Fetching credentials - Duration: {duration}s");
    service.get_session_token(serial_number, token_code, duration).await
}

fn service_error(err: impl std::error::Error) -> UpdaterError {
    UpdaterError::CredentialService(DisplayErrorContext(err).to_string())
}

/// IAM is a global service; its endpoint is resolved from this region.
const IAM_REGION: &str = "us-east-1";

/// [`CredentialService`] talking to AWS with the ambient caller identity.
pub struct AwsCredentialService {
    iam: IamClient,
    sts: StsClient,
}

impl AwsCredentialService {
    /// STS requests go to `region`; device listing always uses the global IAM endpoint.
    pub async fn new(region: &str) -> Self {
        let sts_config = aws_config::from_env()
            .region(Region::new(region.to_string()))
            .load()
            .await;
        let iam_config = aws_config::from_env()
            .region(Region::new(IAM_REGION))
            .load()
            .await;

        Self {
            iam: IamClient::new(&iam_config),
            sts: StsClient::new(&sts_config),
        }
    }
}

impl CredentialService for AwsCredentialService {
    async fn list_mfa_devices(&self) -> Result<Vec<MfaDevice>> {
        let output = self
            .iam
            .list_mfa_devices()
            .send()
            .await
            .map_err(service_error)?;

        let devices: Vec<_> = output
            .mfa_devices()
            .iter()
            .map(|device| MfaDevice::new(device.serial_number()))
            .collect();
        debug!("Found {} MFA device(s)", devices.len());
        Ok(devices)
    }

    async fn get_session_token(
        &self,
        serial_number: &str,
        token_code: &str,
        duration: u32,
    ) -> Result<TemporaryCredentials> {
        let duration = i32::try_from(duration)
            .map_err(|_| UpdaterError::InvalidRequest(format!("duration {duration} out of range")))?;

        let session = self
            .sts
            .get_session_token()
            .duration_seconds(duration)
            .serial_number(serial_number)
            .token_code(token_code)
            .send()
            .await
            .map_err(service_error)?
            .credentials
            .ok_or_else(|| UpdaterError::CredentialService("No credentials returned".to_string()))?;

        Ok(TemporaryCredentials {
            access_key_id: session.access_key_id,
            secret_access_key: session.secret_access_key,
            session_token: session.session_token,
            expiration: session.expiration,
        })
    }
}
