//! HTTP request handlers
//!
//! Each handler extracts its form parameters, runs one store operation under
//! the store lock and redirects back to a folder view.

use axum::Form;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use log::info;
use serde::Deserialize;

use crate::error::FileManagerError;
use crate::navigate::VirtualPath;
use crate::server::core::AppState;
use crate::server::render::render_folder;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "myFile";

#[derive(Debug, Deserialize)]
pub struct FolderForm {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct FileForm {
    pub path: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderForm {
    pub folder_path: String,
    pub folder_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFileForm {
    pub file_path: String,
    pub file_name: String,
    pub old_file_name: String,
}

/// 302 to a folder view
pub fn redirect_to(path: &VirtualPath) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, path.encoded())]).into_response()
}

/// `GET /` lands on the root folder
pub async fn index() -> Response {
    redirect_to(&VirtualPath::root())
}

/// `GET /files/<path>`
pub async fn show_folder(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, FileManagerError> {
    let path = VirtualPath::decode(uri.path())?;

    let store = state.store.lock().await;
    let folder = store.folder_at(&path)?;
    Ok(Html(render_folder(&path, folder)))
}

/// `POST /createFolder`
pub async fn create_folder(
    State(state): State<AppState>,
    Form(form): Form<FolderForm>,
) -> Result<Response, FileManagerError> {
    let result = state.store.lock().await.create_folder(&form.path)?;
    Ok(redirect_to(&result.parent))
}

/// `POST /uploadFile`, multipart with a `path` field and a `myFile` file
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, FileManagerError> {
    let mut path = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("path") => path = Some(field.text().await.map_err(malformed)?),
            Some(UPLOAD_FIELD) => {
                let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                    FileManagerError::MalformedRequest(format!("{} has no filename", UPLOAD_FIELD))
                })?;
                let bytes = field.bytes().await.map_err(malformed)?;
                info!("Received upload {} ({} bytes)", filename, bytes.len());
                upload = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let path = path.ok_or_else(|| FileManagerError::MalformedRequest("missing path".into()))?;
    let (filename, bytes) = upload.ok_or_else(|| {
        FileManagerError::MalformedRequest(format!("missing {} field", UPLOAD_FIELD))
    })?;

    let result = state.store.lock().await.upload(&path, &filename, &bytes)?;
    Ok(redirect_to(&result.folder))
}

/// `POST /downloadFile`
pub async fn download_file(
    State(state): State<AppState>,
    Form(form): Form<FileForm>,
) -> Result<Response, FileManagerError> {
    let result = state
        .store
        .lock()
        .await
        .download(&form.path, &form.filename)?;
    Ok(redirect_to(&result.folder))
}

/// `POST /deleteFile`
pub async fn delete_file(
    State(state): State<AppState>,
    Form(form): Form<FileForm>,
) -> Result<Response, FileManagerError> {
    let result = state
        .store
        .lock()
        .await
        .delete(&form.path, &form.filename)?;
    Ok(redirect_to(&result.folder))
}

/// `POST /changeFolderName`, redirects to the renamed folder's parent
pub async fn change_folder_name(
    State(state): State<AppState>,
    Form(form): Form<RenameFolderForm>,
) -> Result<Response, FileManagerError> {
    let result = state
        .store
        .lock()
        .await
        .rename_folder(&form.folder_path, &form.folder_name)?;
    Ok(redirect_to(&result.parent))
}

/// `POST /changeFileName`
pub async fn change_file_name(
    State(state): State<AppState>,
    Form(form): Form<RenameFileForm>,
) -> Result<Response, FileManagerError> {
    let result = state.store.lock().await.rename_file(
        &form.file_path,
        &form.old_file_name,
        &form.file_name,
    )?;
    Ok(redirect_to(&result.folder))
}

fn malformed(e: axum::extract::multipart::MultipartError) -> FileManagerError {
    FileManagerError::MalformedRequest(e.to_string())
}
