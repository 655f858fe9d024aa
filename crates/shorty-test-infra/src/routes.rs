use crate::backend::{ReceivedUpload, Route, SharedStore};
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shorty_core::{ErrorEnvelope, ImageRecord, LinkRecord, SuccessEnvelope};

const UPLOAD_FIELD: &str = "file";
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Deserialize)]
struct CreateLinkBody {
    url: String,
}

pub(crate) fn router(store: SharedStore) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route("/link/create", post(create_link))
                .route("/link/{id}", get(get_link))
                .route("/image/upload", post(upload_image))
                .route("/image/info/{id}", get(get_image_info)),
        )
        .with_state(store)
}

fn success<T: Serialize>(result: T) -> Response {
    (StatusCode::OK, Json(SuccessEnvelope::new(result))).into_response()
}

fn failure(status: StatusCode, id: &str, message: impl Into<String>) -> Response {
    (status, Json(ErrorEnvelope::new(id, message))).into_response()
}

/// Applies the bearer check and any canned response for `route`.
///
/// Returns `Some` when the request must not reach the normal handler.
fn intercept(store: &SharedStore, route: Route, headers: &HeaderMap) -> Option<Response> {
    store.record_request();

    let expected = format!("Bearer {}", store.config.api_key);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return Some(failure(StatusCode::UNAUTHORIZED, "-", "unauthorized"));
    }

    let canned = store.canned.get(&route)?;
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Some(
        (
            status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body.clone(),
        )
            .into_response(),
    )
}

fn is_http_url(url: &str) -> bool {
    let Ok(uri) = url.parse::<Uri>() else {
        return false;
    };
    let web_scheme = uri.scheme_str().is_some_and(|scheme| {
        scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
    });
    web_scheme && uri.host().is_some_and(|host| !host.is_empty())
}

async fn create_link(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(response) = intercept(&store, Route::CreateLink, &headers) {
        return response;
    }

    let request: CreateLinkBody = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return failure(StatusCode::BAD_REQUEST, "WrongBody", e.to_string()),
    };

    if !is_http_url(&request.url) {
        return failure(StatusCode::BAD_REQUEST, "-", "bad url");
    }

    let id = store.next_id('l');
    let link = LinkRecord {
        id: id.clone(),
        url: request.url,
    };
    store.links.insert(id, link.clone());
    success(link)
}

async fn get_link(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = intercept(&store, Route::GetLink, &headers) {
        return response;
    }

    match store.links.get(&id) {
        Some(link) => success(link.value().clone()),
        None => failure(StatusCode::NOT_FOUND, "-", "link not found"),
    }
}

async fn upload_image(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Some(response) = intercept(&store, Route::UploadImage, &headers) {
        return response;
    }

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return failure(StatusCode::BAD_REQUEST, "WrongBody", e.to_string()),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return failure(StatusCode::BAD_REQUEST, "WrongBody", e.to_string()),
        };

        let id = store.next_id('i');
        let public_url = store.config.public_url.trim_end_matches('/');
        let image = ImageRecord {
            id: id.clone(),
            name: file_name.clone(),
            size: bytes.len() as f64 / BYTES_PER_MB,
            original_url: format!("{public_url}/i/o/{id}"),
            thumbnail_url: format!("{public_url}/i/t/{id}"),
        };

        store.uploads.insert(
            id.clone(),
            ReceivedUpload {
                file_name,
                content_type,
                len: bytes.len(),
            },
        );
        store.images.insert(id, image.clone());
        return success(image);
    }

    failure(StatusCode::BAD_REQUEST, "-", "http: no such file")
}

async fn get_image_info(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = intercept(&store, Route::GetImageInfo, &headers) {
        return response;
    }

    match store.images.get(&id) {
        Some(image) => success(image.value().clone()),
        None => failure(StatusCode::NOT_FOUND, "-", "image not found"),
    }
}
