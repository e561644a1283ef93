use std::path::PathBuf;

use clap::Args;

use common::session::Passcode;
use vaultdash::api::client::ApiError;
use vaultdash::api::files::upload::{UploadPermissions, UploadRequest};

#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// Local file to upload
    pub path: PathBuf,

    /// Name to store it under (defaults to the local file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Encrypt the file at rest
    #[arg(long)]
    pub encrypt: bool,

    /// Encryption passcode, required with --encrypt
    #[arg(long)]
    pub passcode: Option<String>,

    /// Lock the file behind a passcode
    #[arg(long)]
    pub applock: bool,

    /// Lock passcode, required with --applock
    #[arg(long)]
    pub applock_passcode: Option<String>,

    /// Hide the file's contents from regular users
    #[arg(long)]
    pub no_view: bool,

    /// Forbid downloads for regular users
    #[arg(long)]
    pub no_download: bool,

    /// Let regular users edit the file
    #[arg(long)]
    pub allow_edit: bool,

    /// Let regular users delete the file
    #[arg(long)]
    pub allow_delete: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FilesUploadError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("cannot derive a file name from {0}, pass --name")]
    NoFileName(PathBuf),
    #[error("please enter a passcode for {0}")]
    MissingPasscode(&'static str),
}

/// The passcode for an enabled option. Enabled without a passcode is an error.
fn required_passcode(
    enabled: bool,
    passcode: &Option<String>,
    option: &'static str,
) -> Result<Option<Passcode>, FilesUploadError> {
    if !enabled {
        return Ok(None);
    }
    match passcode.as_deref() {
        Some(p) if !p.is_empty() => Ok(Some(Passcode::new(p))),
        _ => Err(FilesUploadError::MissingPasscode(option)),
    }
}

impl Upload {
    fn filename(&self) -> Result<String, FilesUploadError> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| FilesUploadError::NoFileName(self.path.clone()))
    }

    fn permissions(&self) -> UploadPermissions {
        UploadPermissions {
            view: !self.no_view,
            download: !self.no_download,
            edit: self.allow_edit,
            delete: self.allow_delete,
        }
    }

    /// Validate the options and read the file into a request.
    pub async fn request(&self) -> Result<UploadRequest, FilesUploadError> {
        let encrypt = required_passcode(self.encrypt, &self.passcode, "encryption")?;
        let applock = required_passcode(self.applock, &self.applock_passcode, "app lock")?;
        let filename = self.filename()?;

        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FilesUploadError::Read(self.path.clone(), e))?;

        Ok(UploadRequest {
            filename,
            data: data.into(),
            encrypt,
            applock,
            permissions: self.permissions(),
        })
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Upload {
    type Error = FilesUploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = self.request().await?;
        let response = ctx.client.call(request).await?;

        let mut notes = Vec::new();
        if response.encrypted {
            notes.push("encrypted");
        }
        if response.locked {
            notes.push("locked");
        }
        let suffix = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        Ok(format!("Uploaded {}{}", response.filename, suffix))
    }
}
