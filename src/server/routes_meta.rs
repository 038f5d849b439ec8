//! Metadata route handlers.
//!
//! `/meta` runs the packager's stream-info dump mode and parses its text
//! output; `/file-meta` returns ffprobe's own JSON with the packaging
//! status injected, matching the original wire shape.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::Value;
use sp_av::{probe, stream_info, StreamDump, Workspace};

use crate::server::error::AppError;
use crate::server::upload;
use crate::server::AppContext;

/// POST /meta — dump structured stream info via the packager's probe mode.
pub async fn stream_info(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<StreamDump>, AppError> {
    let file = upload::single_file(multipart, "file", "No file uploaded").await?;

    let workspace = Workspace::create()?;
    let input = workspace.save(&file.file_name, &file.data)?;

    let packager = ctx.tools.require("packager")?;
    let args = vec![
        format!("input={}", input.display()),
        "--dump_stream_info".to_string(),
    ];
    let output = ctx
        .runner
        .run(packager, &args, Some(workspace.path()))
        .await?;

    // The dump and the completion marker are spread across stdout and
    // stderr; the parser sees them combined, stdout first.
    Ok(Json(stream_info::parse(&output.combined())))
}

/// POST /file-meta — probe a file via ffprobe and return its native JSON
/// plus an injected `packaging_status` field.
pub async fn file_meta(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let file = upload::single_file(multipart, "file", "No file uploaded").await?;

    let workspace = Workspace::create()?;
    let input = workspace.save(&file.file_name, &file.data)?;

    let ffprobe = ctx.tools.require("ffprobe")?;
    let mut doc = probe::probe_json(ctx.runner.as_ref(), ffprobe, &input).await?;

    if let Value::Object(ref mut map) = doc {
        map.insert(
            "packaging_status".to_string(),
            Value::String("completed successfully".to_string()),
        );
    }

    Ok(Json(doc))
}
