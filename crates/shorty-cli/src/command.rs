use shorty_core::{ImageRecord, ImageUpload, LinkRecord, Result, ShortyApi};
use std::path::PathBuf;
use tracing::info;

/// A single request the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateLink { url: String },
    GetLink { id: String },
    UploadImage { path: PathBuf },
    ImageInfo { id: String },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::CreateLink { url } => write!(f, "creating short link for '{url}'"),
            Action::GetLink { id } => write!(f, "fetching link '{id}'"),
            Action::UploadImage { path } => write!(f, "uploading '{}'", path.display()),
            Action::ImageInfo { id } => write!(f, "fetching image info '{id}'"),
        }
    }
}

/// What an [`Action`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Link(LinkRecord),
    Image(ImageRecord),
    NotFound { kind: &'static str, id: String },
    /// The backend has no upload route; the file at `path` was not stored.
    UploadUnavailable { path: PathBuf },
}

impl Outcome {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Outcome::NotFound { .. } | Outcome::UploadUnavailable { .. }
        )
    }
}

/// Runs `action` against any [`ShortyApi`] implementation.
pub async fn execute<A: ShortyApi + ?Sized>(api: &A, action: Action) -> Result<Outcome> {
    match action {
        Action::CreateLink { url } => {
            let link = api.create_link(&url).await?;
            info!(id = %link.id, "short link created");
            Ok(Outcome::Link(link))
        }
        Action::GetLink { id } => Ok(match api.get_link(&id).await? {
            Some(link) => Outcome::Link(link),
            None => Outcome::NotFound { kind: "link", id },
        }),
        Action::UploadImage { path } => {
            let upload = ImageUpload::from_path(&path).await?;
            info!(file_name = %upload.file_name, size = upload.len(), "uploading image");
            Ok(match api.upload_image(upload).await? {
                Some(image) => Outcome::Image(image),
                None => Outcome::UploadUnavailable { path },
            })
        }
        Action::ImageInfo { id } => Ok(match api.get_image_info(&id).await? {
            Some(image) => Outcome::Image(image),
            None => Outcome::NotFound { kind: "image", id },
        }),
    }
}
