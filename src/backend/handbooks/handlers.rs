/**
 * Handbook Catalog Handlers (admin)
 *
 * - `POST /api/admin/handbooks` - multipart upload
 * - `GET /api/admin/handbooks?track=` - list
 * - `PUT /api/admin/handbooks/{id}` - edit metadata
 * - `DELETE /api/admin/handbooks/{id}` - remove record, progress and file
 *
 * # Upload form
 *
 * | part          | content                         |
 * |---------------|---------------------------------|
 * | `handbook`    | the PDF file                    |
 * | `title`       | required                        |
 * | `track`       | required, one of the tracks     |
 * | `description` | optional                        |
 * | `totalPages`  | optional, defaults to 0         |
 */

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::{parse_id, ApiJson};
use crate::backend::handbooks::db::{
    delete_handbook as delete_handbook_record, find_handbook, insert_handbook, list_handbooks,
    update_handbook as update_handbook_record, Handbook, HandbookChanges, NewHandbook,
};
use crate::backend::handbooks::storage::{is_pdf, remove_file, save_pdf};
use crate::backend::middleware::auth::CurrentAdmin;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::error::{FieldError, SharedError, Validator};
use crate::shared::types::Track;

const FILE_FIELD: &str = "handbook";

#[derive(Debug)]
struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Everything the upload form carried, before validation.
#[derive(Debug, Default)]
struct HandbookForm {
    file: Option<UploadedFile>,
    title: Option<String>,
    description: Option<String>,
    track: Option<String>,
    total_pages: Option<String>,
}

impl HandbookForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = HandbookForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FILE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                "title" => form.title = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                "track" => form.track = Some(field.text().await?),
                "totalPages" => form.total_pages = Some(field.text().await?),
                other => tracing::debug!("Ignoring unexpected form field {:?}", other),
            }
        }
        Ok(form)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_total_pages(raw: Option<String>) -> Result<i64, FieldError> {
    match non_blank(raw) {
        None => Ok(0),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|pages| *pages >= 0)
            .ok_or_else(|| FieldError::new("totalPages", "Total pages must be a non-negative number")),
    }
}

/// Upload a new handbook
///
/// # Errors
///
/// * `400 Bad Request` - no file, not a PDF, missing title/track, bad track or page count
/// * `500 Internal Server Error` - the file could not be written or the row inserted
pub async fn upload_handbook(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiResponse<Handbook>)> {
    let form = HandbookForm::read(multipart).await?;

    let file = match form.file {
        Some(file) if !file.bytes.is_empty() => file,
        _ => return Err(ApiError::bad_request("Please upload a PDF file")),
    };
    if !is_pdf(file.content_type.as_deref(), file.file_name.as_deref()) {
        return Err(ApiError::bad_request("Only PDF files are allowed"));
    }

    let (Some(title), Some(track)) = (non_blank(form.title), non_blank(form.track)) else {
        return Err(ApiError::bad_request("Title and track are required"));
    };
    let track: Track = track
        .parse()
        .map_err(|_: SharedError| SharedError::validation("track", "Invalid track selected"))?;
    let total_pages = parse_total_pages(form.total_pages).map_err(|e| vec![e])?;

    let stored = save_pdf(&state.config.upload_dir, &file.bytes).await?;

    let new = NewHandbook {
        title,
        description: non_blank(form.description),
        track,
        file_path: stored.path.to_string_lossy().into_owned(),
        file_name: stored.file_name.clone(),
        total_pages,
    };
    let handbook = match insert_handbook(&state.db, new).await {
        Ok(handbook) => handbook,
        Err(e) => {
            remove_file(&stored.path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        "Admin {} uploaded handbook {} ({}, {} bytes)",
        admin.id,
        handbook.id,
        handbook.track,
        file.bytes.len()
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(handbook).with_message("Handbook uploaded successfully"),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct HandbookQuery {
    pub track: Option<String>,
}

/// Parse an optional `track` query parameter; blank means no filter.
pub(crate) fn parse_track_filter(raw: Option<&str>) -> ApiResult<Option<Track>> {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(raw) => Ok(Some(raw.parse::<Track>()?)),
    }
}

pub async fn get_handbooks(
    State(state): State<AppState>,
    Query(query): Query<HandbookQuery>,
) -> ApiResult<ApiResponse<Vec<Handbook>>> {
    let track = parse_track_filter(query.track.as_deref())?;
    let handbooks = list_handbooks(&state.db, track).await?;
    Ok(ApiResponse::list(handbooks))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHandbookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub total_pages: Option<i64>,
}

impl UpdateHandbookRequest {
    fn into_changes(self) -> Result<HandbookChanges, Vec<FieldError>> {
        let title = self.title.map(|t| t.trim().to_string());
        let mut validator = Validator::new();
        validator
            .check(
                title.as_deref().map(|t| !t.is_empty()).unwrap_or(true),
                "title",
                "Title cannot be empty",
            )
            .check(
                self.total_pages.map(|p| p >= 0).unwrap_or(true),
                "totalPages",
                "Total pages must be a non-negative number",
            );
        validator.finish()?;

        Ok(HandbookChanges {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            total_pages: self.total_pages,
        })
    }
}

pub async fn update_handbook(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateHandbookRequest>,
) -> ApiResult<ApiResponse<Handbook>> {
    let id = parse_id(&id, "Handbook")?;
    let changes = request.into_changes()?;

    let handbook = update_handbook_record(&state.db, id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Handbook not found"))?;

    tracing::info!("Handbook {} updated", handbook.id);
    Ok(ApiResponse::data(handbook).with_message("Handbook updated successfully"))
}

pub async fn delete_handbook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "Handbook")?;
    let handbook = find_handbook(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Handbook not found"))?;

    if !delete_handbook_record(&state.db, id).await? {
        return Err(ApiError::not_found("Handbook not found"));
    }

    // Only once the record is gone, so a failed delete leaves both in place.
    remove_file(std::path::Path::new(&handbook.file_path)).await;

    tracing::info!("Handbook {} deleted", id);
    Ok(ApiResponse::message("Handbook deleted successfully"))
}
