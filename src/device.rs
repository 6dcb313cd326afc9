//! MFA device selection.
//!
//! IAM lists every MFA device registered to the caller. Exactly one serial is
//! needed for `GetSessionToken`; when there are several the user picks one.

use log::debug;

use crate::{
    console::Console,
    error::{Result, UpdaterError},
};

/// An MFA device registered to the calling IAM identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaDevice {
    pub serial_number: String,
}

impl MfaDevice {
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self { serial_number: serial_number.into() }
    }
}

/// Picks the device whose serial is used for the session token request.
///
/// A single device is used as-is. With several, the user chooses by index
/// from the list in the order IAM returned it.
///
/// # Arguments
///
/// * `devices` - Devices as returned by IAM `ListMFADevices`, in response order
/// * `console` - Shows the numbered list and reads the selection; untouched
///   unless there is more than one device
///
/// # Returns
///
/// * `Ok(String)` - Serial number (ARN) of the chosen device
/// * `Err(UpdaterError::NoDeviceRegistered)` - `devices` is empty
/// * `Err(UpdaterError::InvalidSelection)` - The input is not a number below
///   `devices.len()`
///
/// # Example
///
/// ```text
/// You have multiple registered MFA devices, please select one:
/// 0: arn:aws:iam::123456789012:mfa/phone
/// 1: arn:aws:iam::123456789012:mfa/yubikey
/// Device number: 1
/// ```
pub fn resolve_device(devices: &[MfaDevice], console: &mut impl Console) -> Result<String> {
    match devices {
        [] => Err(UpdaterError::NoDeviceRegistered),
        [device] => Ok(device.serial_number.clone()),
        _ => {
            console.write_line("You have multiple registered MFA devices, please select one:")?;
            for (index, device) in devices.iter().enumerate() {
                console.write_line(&format!("{index}: {}", device.serial_number))?;
            }

            let input = console.prompt("Device number: ")?;
            let device = input
                .parse::<usize>()
                .ok()
                .and_then(|index| devices.get(index))
                .ok_or_else(|| UpdaterError::InvalidSelection {
                    input: input.clone(),
                    count: devices.len(),
                })?;

            debug!("Selected MFA device {input}: {}", device.serial_number);
            Ok(device.serial_number.clone())
        }
    }
}
