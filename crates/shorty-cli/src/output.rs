use crate::command::Outcome;
use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use qrcode::QrCode;
use serde_json::json;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// How an outcome is rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub format: OutputFormat,
    /// Base URL public links are built under.
    pub public_url: &'a str,
    /// Also render a QR code of a link's short URL.
    pub qr: bool,
}

/// Renders an outcome for stdout.
///
/// Links show their public short URL and, when asked, a QR code of it.
/// Images show their view page, size and a BBCode embed.
pub fn render(outcome: &Outcome, options: &RenderOptions<'_>) -> Result<String, QrError> {
    match options.format {
        OutputFormat::Text => render_text(outcome, options),
        OutputFormat::Json => Ok(render_json(outcome, options)?.to_string()),
    }
}

/// Renders `data` as a QR code drawn with unicode half blocks.
pub fn qr_code(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes())?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build())
}

fn render_text(outcome: &Outcome, options: &RenderOptions<'_>) -> Result<String, QrError> {
    let rendered = match outcome {
        Outcome::Link(link) => {
            let short_url = link.short_url(options.public_url);
            let mut text = format!("id: {}\nurl: {}\nshort_url: {short_url}", link.id, link.url);
            if options.qr {
                text.push('\n');
                text.push_str(&qr_code(&short_url)?);
            }
            text
        }
        Outcome::Image(image) => format!(
            "id: {}\nname: {}\nsize: {}\nview_url: {}\noriginal_url: {}\nthumbnail_url: {}\nbbcode: {}",
            image.id,
            image.name,
            image.display_size(),
            image.view_url(options.public_url),
            image.original_url,
            image.thumbnail_url,
            image.bbcode()
        ),
        Outcome::NotFound { kind, id } => format!("{kind} not found: {id}"),
        Outcome::UploadUnavailable { path } => upload_unavailable(path),
    };
    Ok(rendered)
}

fn render_json(outcome: &Outcome, options: &RenderOptions<'_>) -> Result<serde_json::Value, QrError> {
    let value = match outcome {
        Outcome::Link(link) => {
            let short_url = link.short_url(options.public_url);
            let mut value = json!({
                "id": link.id,
                "url": link.url,
                "shortUrl": short_url,
            });
            if options.qr {
                value["qrCode"] = json!(qr_code(&short_url)?);
            }
            value
        }
        Outcome::Image(image) => {
            let mut value = json!(image);
            value["viewUrl"] = json!(image.view_url(options.public_url));
            value["bbcode"] = json!(image.bbcode());
            value
        }
        Outcome::NotFound { kind, id } => not_found_json(format!("{kind} not found: {id}")),
        Outcome::UploadUnavailable { path } => not_found_json(upload_unavailable(path)),
    };
    Ok(value)
}

fn upload_unavailable(path: &Path) -> String {
    format!(
        "backend has no image upload endpoint; '{}' was not uploaded",
        path.display()
    )
}

fn not_found_json(message: String) -> serde_json::Value {
    json!({ "error": { "id": "NotFound", "message": message } })
}
