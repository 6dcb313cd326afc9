//! AWS Credentials File Merger
//!
//! Writes temporary MFA session credentials into the shared credentials file and
//! links a role profile to them, leaving every other section where it was.
//!
//! ## Two-Section Layout
//!
//! Each run inserts or replaces exactly two sections:
//! - the MFA section (default `[mfa]`) holding the session credentials returned by STS
//! - the linked profile (default `[sg1]`) which assumes a role using the MFA section
//!   as its `source_profile`
//!
//! ```ini
//! [mfa]
//! # ⚙ Generated by aws-mfa-linker at = 2026-10-17T08:00:00Z
//! aws_access_key_id = ASIA...
//! aws_secret_access_key = ...
//! aws_session_token = ...
//! expires = 2026-10-17T20:00:00Z
//!
//! [sg1]
//! # ⚙ Generated by aws-mfa-linker at = 2026-10-17T08:00:00Z
//! role_arn = arn:aws:iam::123456789012:role/Admin
//! region = eu-central-1
//! source_profile = mfa
//! ```
//!
//! The marker line reads back as a comment, so the parser drops it on load and
//! each generated section carries exactly one marker after every rewrite.
//! Every other section is written back byte for byte, comments included.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use aws_smithy_types::{DateTime, date_time::Format};
use configparser::ini::{Ini, IniDefault, WriteOptions};
use log::{debug, info, warn};
use tokio::fs;

use crate::{
    console::Console,
    credentials::TemporaryCredentials,
    error::{Result, UpdaterError},
};

/// Key recording when a section was last generated.
pub const GENERATED_MARKER_KEY: &str = "# ⚙ Generated by aws-mfa-linker at";

/// Parser bucket for keys that appear before the first section header. A
/// section name can never contain a newline, so this cannot collide with a
/// real `[default]` profile.
const PREAMBLE_SECTION: &str = "\npreamble";

/// Where the linked profile points and what it assumes.
#[derive(Debug, Clone)]
pub struct ProfileLink {
    pub mfa_section: String,
    pub linked_profile: String,
    pub role_arn: String,
    pub region: String,
}

/// Applies freshly acquired credentials to durable storage.
pub trait CredentialsUpdater {
    async fn update(
        &self,
        credentials: &TemporaryCredentials,
        link: &ProfileLink,
        console: &mut impl Console,
    ) -> Result<()>;
}

/// [`CredentialsUpdater`] for the INI-style shared credentials file.
pub struct IniCredentialsUpdater {
    path: PathBuf,
}

impl IniCredentialsUpdater {
    /// Uses `path`, or `~/.aws/credentials` when none is given.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => default_credentials_path()?,
        };
        Ok(Self { path })
    }
}

impl CredentialsUpdater for IniCredentialsUpdater {
    async fn update(
        &self,
        credentials: &TemporaryCredentials,
        link: &ProfileLink,
        console: &mut impl Console,
    ) -> Result<()> {
        let mut file = CredentialsFile::load(self.path.clone()).await?;
        file.apply(credentials, link, console)?;
        file.persist().await
    }
}

fn default_credentials_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".aws").join("credentials"))
        .ok_or_else(|| UpdaterError::Load {
            path: PathBuf::from("~/.aws/credentials"),
            reason: "could not determine home directory".to_string(),
        })
}

/// The credentials file held in memory between load and persist.
///
/// The original text is kept line for line. Only the MFA section and the linked
/// profile are regenerated on render; every other line is written back as read,
/// so comments, delimiters and values of unrelated sections never change. New
/// sections are appended at the end.
pub struct CredentialsFile {
    path: PathBuf,
    ini: Ini,
    blocks: Vec<Block>,
}

/// A run of raw lines starting at a section header. The first block has no
/// header and holds whatever precedes the first section.
struct Block {
    name: Option<String>,
    lines: Vec<String>,
    regenerate: bool,
    appended: bool,
}

impl Block {
    /// Trailing blank and comment lines, kept when the section is regenerated
    /// since they usually introduce the next section.
    fn tail(&self) -> &[String] {
        let body = self.lines.get(1..).unwrap_or_default();
        let keep = body
            .iter()
            .rev()
            .take_while(|line| {
                let line = line.trim();
                line.is_empty()
                    || (line.starts_with(['#', ';']) && !line.starts_with(GENERATED_MARKER_KEY))
            })
            .count();
        &body[body.len() - keep..]
    }
}

fn section_header(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

fn parser_defaults() -> IniDefault {
    // Profile names are case sensitive for the AWS CLI.
    let mut defaults = Ini::new_cs().defaults();
    defaults.default_section = PREAMBLE_SECTION.to_string();
    // Secrets may contain `#` or `;`.
    defaults.inline_comment_symbols = Some(vec![]);
    defaults
}

impl CredentialsFile {
    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            ini: Ini::new_from_defaults(parser_defaults()),
            blocks: Vec::new(),
        }
    }

    /// Reads `path`. A missing file yields an empty document.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Credentials file {} not found, starting empty", path.display());
                String::new()
            }
            Err(e) => {
                return Err(UpdaterError::Load { path, reason: e.to_string() });
            }
        };
        Self::parse(path, content)
    }

    fn parse(path: PathBuf, content: String) -> Result<Self> {
        let mut file = Self::empty(path);

        for line in content.split_inclusive('\n') {
            let name = section_header(line);
            if name.is_none() {
                if let Some(block) = file.blocks.last_mut() {
                    block.lines.push(line.to_string());
                    continue;
                }
            }
            file.blocks.push(Block {
                name: name.map(str::to_string),
                lines: vec![line.to_string()],
                regenerate: false,
                appended: false,
            });
        }

        if let Err(reason) = file.ini.read(content) {
            return Err(UpdaterError::Load { path: file.path, reason });
        }
        debug!("Loaded {} section(s) from {}", file.section_names().len(), file.path.display());
        Ok(file)
    }

    /// Section names in file order.
    pub fn section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.blocks.iter().filter_map(|block| block.name.as_ref()) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    #[cfg(test)]
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    /// Writes `credentials` into the MFA section and points the linked profile at it.
    ///
    /// Both sections are created at the end of the document when missing and
    /// updated in place otherwise. Keys the user added to either section survive;
    /// the generated marker is replaced rather than repeated.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Session credentials from STS, written to `link.mfa_section`
    /// * `link` - Section names plus the role ARN and region for the linked profile,
    ///   whose `source_profile` is set to `link.mfa_section`
    /// * `console` - Receives a line per section saying whether it was created and
    ///   that it was updated
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The document in memory holds both sections; call
    ///   [`persist`](Self::persist) to write it out
    /// * `Err(UpdaterError)` - A timestamp could not be formatted or the console
    ///   failed. The file on disk is not touched either way.
    pub fn apply(
        &mut self,
        credentials: &TemporaryCredentials,
        link: &ProfileLink,
        console: &mut impl Console,
    ) -> Result<()> {
        let generated_at = DateTime::from(SystemTime::now()).fmt(Format::DateTime)?;
        let expires = credentials.expiration.fmt(Format::DateTime)?;
        let location = self.path.display().to_string();

        let section = &link.mfa_section;
        if self.ensure_section(section) {
            console.write_line(&format!(
                "🛈 No MFA section detected; will create one called '{section}'"
            ))?;
        }
        self.stamp(section, &generated_at);
        self.set(section, "aws_access_key_id", &credentials.access_key_id);
        self.set(section, "aws_secret_access_key", &credentials.secret_access_key);
        self.set(section, "aws_session_token", &credentials.session_token);
        self.set(section, "expires", &expires);
        console.write_line(&format!("🔄 Added/Updated MFA section '{section}' in {location}"))?;

        let section = &link.linked_profile;
        if self.ensure_section(section) {
            console.write_line(&format!(
                "🛈 No linked profile section detected; will create one called '{section}'"
            ))?;
        }
        self.stamp(section, &generated_at);
        self.set(section, "role_arn", &link.role_arn);
        self.set(section, "region", &link.region);
        self.set(section, "source_profile", &link.mfa_section);
        console.write_line(&format!("🔄 Added/Updated linked profile '{section}' in {location}"))?;

        Ok(())
    }

    /// Marks a section for regeneration, appending it if missing. Returns
    /// whether it was created.
    fn ensure_section(&mut self, name: &str) -> bool {
        let mut found = false;
        for block in self.blocks.iter_mut().filter(|block| block.name.as_deref() == Some(name)) {
            block.regenerate = true;
            found = true;
        }
        if found {
            info!("Updating existing section [{name}]");
            return false;
        }

        info!("Creating section [{name}]");
        self.ini.get_mut_map().entry(name.to_string()).or_default();
        self.blocks.push(Block {
            name: Some(name.to_string()),
            lines: Vec::new(),
            regenerate: true,
            appended: true,
        });
        true
    }

    fn stamp(&mut self, section: &str, generated_at: &str) {
        self.ini.remove_key(section, GENERATED_MARKER_KEY);
        self.set(section, GENERATED_MARKER_KEY, generated_at);
    }

    fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.set(section, key, Some(value.to_string()));
    }

    /// One section in the shared credentials file dialect.
    fn render_section(&self, name: &str) -> String {
        let mut single = Ini::new_from_defaults(parser_defaults());
        if let Some(keys) = self.ini.get_map_ref().get(name) {
            single.get_mut_map().insert(name.to_string(), keys.clone());
        }

        let mut text = single.pretty_writes(&WriteOptions::new_with_params(true, 2, 0));
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    /// The whole document, with untouched lines exactly as they were read.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut rendered: Vec<&str> = Vec::new();

        for block in &self.blocks {
            let name = match &block.name {
                Some(name) if block.regenerate => name,
                _ => {
                    out.extend(block.lines.iter().map(String::as_str));
                    continue;
                }
            };

            if block.appended && !out.is_empty() {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                if !out.ends_with("\n\n") {
                    out.push('\n');
                }
            }
            // A repeated header was merged into the first occurrence on parse.
            if !rendered.contains(&name.as_str()) {
                out.push_str(&self.render_section(name));
                rendered.push(name);
            }
            out.extend(block.tail().iter().map(String::as_str));
        }
        out
    }

    /// Replaces the file on disk in one step.
    ///
    /// The new content is staged next to the target and renamed over it, so a
    /// failure leaves the previous file untouched.
    pub async fn persist(&self) -> Result<()> {
        let persist_error = |source: io::Error| UpdaterError::Persist {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(persist_error)?;
        }

        let staging = staging_path(&self.path);
        let staged = async {
            fs::write(&staging, self.render()).await?;
            restrict_permissions(&staging).await?;
            fs::rename(&staging, &self.path).await
        };
        if let Err(e) = staged.await {
            // Nothing useful to report if the staged copy is already gone.
            let _ = fs::remove_file(&staging).await;
            return Err(persist_error(e));
        }

        info!("Wrote credentials to {}", self.path.display());
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};

    fs::set_permissions(path, Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{console::testing::ScriptedConsole, credentials::testing::sample_credentials};

    const EXISTING: &str = "\
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = defaultsecret

[work]
role_arn = arn:aws:iam::111111111111:role/Dev
source_profile = default
";

    fn link(mfa_section: &str, linked_profile: &str) -> ProfileLink {
        ProfileLink {
            mfa_section: mfa_section.to_string(),
            linked_profile: linked_profile.to_string(),
            role_arn: "captain".to_string(),
            region: "mfa".to_string(),
        }
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    /// Lines from the `[name]` header up to the next blank line or header.
    fn section_block<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
        let header = format!("[{name}]");
        let mut block = Vec::new();
        for line in text.lines().skip_while(|line| *line != header) {
            if !block.is_empty() && (line.is_empty() || line.starts_with('[')) {
                break;
            }
            block.push(line);
        }
        block
    }

    fn marker_count(block: &[&str]) -> usize {
        block.iter().filter(|line| line.starts_with(GENERATED_MARKER_KEY)).count()
    }

    async fn write_fixture(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("credentials");
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn creates_both_sections_and_keeps_existing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, EXISTING).await;
        let mut console = ScriptedConsole::default();

        let mut file = CredentialsFile::load(path.clone()).await.unwrap();
        file.apply(&sample_credentials(), &link("space", "PicardsProfile"), &mut console)
            .unwrap();
        file.persist().await.unwrap();

        let reloaded = CredentialsFile::load(path).await.unwrap();
        assert_eq!(
            reloaded.section_names(),
            ["default", "work", "space", "PicardsProfile"]
        );
        assert_eq!(reloaded.get("default", "aws_access_key_id").as_deref(), Some("AKIADEFAULT"));
        assert_eq!(reloaded.get("work", "source_profile").as_deref(), Some("default"));
        assert_eq!(reloaded.get("PicardsProfile", "source_profile").as_deref(), Some("space"));
        assert!(console.lines[0].contains("No MFA section detected"));
    }

    #[tokio::test]
    async fn writes_expected_lines_for_new_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, EXISTING).await;
        let credentials = sample_credentials();
        let expires = credentials.expiration.fmt(Format::DateTime).unwrap();

        let updater = IniCredentialsUpdater::new(Some(path.clone())).unwrap();
        updater
            .update(&credentials, &link("space", "PicardsProfile"), &mut ScriptedConsole::default())
            .await
            .unwrap();

        let written = fs::read_to_string(&path).await.unwrap();
        let written = lines(&written);
        let expires_line = format!("expires = {expires}");
        for expected in [
            "[space]",
            "aws_access_key_id = verySecureAccessKey",
            "aws_secret_access_key = verySecretAccessKey",
            "aws_session_token = ReadyRoomSession",
            expires_line.as_str(),
            "[PicardsProfile]",
            "role_arn = captain",
            "region = mfa",
            "source_profile = space",
        ] {
            assert!(written.contains(&expected), "missing {expected:?} in {written:#?}");
        }
    }

    #[tokio::test]
    async fn repeated_runs_update_in_place_without_duplicate_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, EXISTING).await;
        let updater = IniCredentialsUpdater::new(Some(path.clone())).unwrap();
        let link = link("space", "PicardsProfile");

        updater
            .update(&sample_credentials(), &link, &mut ScriptedConsole::default())
            .await
            .unwrap();
        let first = fs::read_to_string(&path).await.unwrap();

        let mut refreshed = sample_credentials();
        refreshed.session_token = "EngineeringSession".to_string();
        let mut console = ScriptedConsole::default();
        updater.update(&refreshed, &link, &mut console).await.unwrap();
        let second = fs::read_to_string(&path).await.unwrap();

        assert!(console.lines.iter().all(|line| !line.contains("will create")));
        for name in ["space", "PicardsProfile"] {
            assert_eq!(marker_count(&section_block(&second, name)), 1, "{name}");
            assert_eq!(second.matches(&format!("[{name}]")).count(), 1, "{name}");
        }
        for name in ["default", "work"] {
            assert_eq!(section_block(&first, name), section_block(&second, name), "{name}");
            assert_eq!(section_block(EXISTING, name), section_block(&second, name), "{name}");
        }
        assert!(lines(&second).contains(&"aws_session_token = EngineeringSession"));
        assert!(!second.contains("ReadyRoomSession"));
    }

    const HAND_EDITED: &str = "\
# managed by hand
[default]
# prod keys, do not touch
aws_access_key_id=AKIAKEEP
aws_secret_access_key = s3cr#t;x

[mfa]
; old session
aws_access_key_id = OLD
output = json

[work]
region: us-east-1
role_arn=arn:aws:iam::111111111111:role/Dev ; dev account";

    #[test]
    fn untouched_sections_render_back_exactly() {
        let mut file =
            CredentialsFile::parse(PathBuf::from("credentials"), HAND_EDITED.to_string()).unwrap();
        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();
        let rendered = file.render();

        assert!(rendered.starts_with(
            "# managed by hand\n\
             [default]\n\
             # prod keys, do not touch\n\
             aws_access_key_id=AKIAKEEP\n\
             aws_secret_access_key = s3cr#t;x\n\
             \n\
             [mfa]\n"
        ));
        assert!(rendered.contains(
            "\n[work]\n\
             region: us-east-1\n\
             role_arn=arn:aws:iam::111111111111:role/Dev ; dev account\n\
             \n\
             [sg1]\n"
        ));
        assert_eq!(file.get("default", "aws_secret_access_key").as_deref(), Some("s3cr#t;x"));
        assert_eq!(file.section_names(), ["default", "mfa", "work", "sg1"]);
    }

    #[test]
    fn regenerated_section_keeps_extra_keys_and_drops_stale_values() {
        let mut file =
            CredentialsFile::parse(PathBuf::from("credentials"), HAND_EDITED.to_string()).unwrap();
        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();
        let rendered = file.render();
        let block = section_block(&rendered, "mfa");

        assert!(block.contains(&"output = json"));
        assert!(block.contains(&"aws_access_key_id = verySecureAccessKey"));
        assert!(!rendered.contains("OLD"));
        assert!(!rendered.contains("; old session"));
        assert_eq!(marker_count(&block), 1);
    }

    #[test]
    fn repeated_header_is_collapsed_into_one_section() {
        let content = "[mfa]\naws_access_key_id = OLD\n\n[work]\nregion = us-east-1\n\n[mfa]\naws_session_token = STALE\n";
        let mut file = CredentialsFile::parse(PathBuf::from("credentials"), content.to_string()).unwrap();

        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();
        let rendered = file.render();

        assert_eq!(rendered.matches("[mfa]").count(), 1);
        assert!(!rendered.contains("OLD"));
        assert!(!rendered.contains("STALE"));
        assert_eq!(section_block(&rendered, "work"), ["[work]", "region = us-east-1"]);
    }

    #[tokio::test]
    async fn hand_edited_file_survives_repeated_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, HAND_EDITED).await;
        let updater = IniCredentialsUpdater::new(Some(path.clone())).unwrap();
        let link = link("mfa", "sg1");

        for _ in 0..2 {
            updater
                .update(&sample_credentials(), &link, &mut ScriptedConsole::default())
                .await
                .unwrap();
        }
        let written = fs::read_to_string(&path).await.unwrap();

        for name in ["default", "work"] {
            assert_eq!(section_block(HAND_EDITED, name), section_block(&written, name), "{name}");
        }
        assert!(written.starts_with("# managed by hand\n"));
        for name in ["mfa", "sg1"] {
            assert_eq!(marker_count(&section_block(&written, name)), 1, "{name}");
            assert_eq!(written.matches(&format!("[{name}]")).count(), 1, "{name}");
        }
    }

    #[test]
    fn applying_twice_in_memory_keeps_a_single_marker() {
        let mut file = CredentialsFile::empty(PathBuf::from("credentials"));
        let link = link("mfa", "sg1");
        let mut console = ScriptedConsole::default();

        file.apply(&sample_credentials(), &link, &mut console).unwrap();
        file.apply(&sample_credentials(), &link, &mut console).unwrap();

        let rendered = file.render();
        assert_eq!(marker_count(&section_block(&rendered, "mfa")), 1);
        assert_eq!(marker_count(&section_block(&rendered, "sg1")), 1);
        assert_eq!(file.section_names(), ["mfa", "sg1"]);
    }

    #[test]
    fn existing_sections_keep_their_position() {
        let content = "[sg1]\nregion = us-east-1\n\n[other]\nkey = value\n\n[mfa]\naws_access_key_id = OLD\n";
        let mut file = CredentialsFile::parse(PathBuf::from("credentials"), content.to_string()).unwrap();

        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();

        assert_eq!(file.section_names(), ["sg1", "other", "mfa"]);
        assert_eq!(file.get("mfa", "aws_access_key_id").as_deref(), Some("verySecureAccessKey"));
        assert_eq!(file.get("sg1", "region").as_deref(), Some("mfa"));
        assert_eq!(file.get("sg1", "role_arn").as_deref(), Some("captain"));
    }

    #[test]
    fn section_names_are_case_sensitive() {
        let content = "[Default]\nkey = value\n";
        let mut file = CredentialsFile::parse(PathBuf::from("credentials"), content.to_string()).unwrap();

        file.apply(&sample_credentials(), &link("default", "sg1"), &mut ScriptedConsole::default())
            .unwrap();

        assert_eq!(file.section_names(), ["Default", "default", "sg1"]);
        assert_eq!(file.get("Default", "key").as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn missing_file_is_created_with_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".aws").join("credentials");
        let updater = IniCredentialsUpdater::new(Some(path.clone())).unwrap();

        updater
            .update(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .await
            .unwrap();

        let reloaded = CredentialsFile::load(path.clone()).await.unwrap();
        assert_eq!(reloaded.section_names(), ["mfa", "sg1"]);
        assert!(!staging_path(&path).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn persisted_file_is_private_to_the_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        let mut file = CredentialsFile::load(path.clone()).await.unwrap();
        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();
        file.persist().await.unwrap();

        let mode = fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn failed_persist_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let path = dir.path().join("credentials");
        fs::create_dir(&path).await.unwrap();
        fs::write(path.join("keep"), "intact").await.unwrap();

        let mut file = CredentialsFile::empty(path.clone());
        file.apply(&sample_credentials(), &link("mfa", "sg1"), &mut ScriptedConsole::default())
            .unwrap();
        let err = file.persist().await.unwrap_err();

        assert!(matches!(err, UpdaterError::Persist { .. }), "{err:?}");
        assert_eq!(fs::read_to_string(path.join("keep")).await.unwrap(), "intact");
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn unreadable_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialsFile::load(dir.path().to_path_buf()).await.err().unwrap();
        assert!(matches!(err, UpdaterError::Load { .. }), "{err:?}");
    }

    #[test]
    fn staging_file_sits_next_to_the_target() {
        assert_eq!(
            staging_path(Path::new("/home/me/.aws/credentials")),
            Path::new("/home/me/.aws/.credentials.tmp")
        );
    }
}
