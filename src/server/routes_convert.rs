//! Container-conversion route handlers.
//!
//! Both endpoints share one flow: validate the upload's extension, persist
//! it to the scratch workspace, and run the preset's ffmpeg invocation. The
//! extension check happens before anything touches the filesystem, so a
//! mismatched upload never spawns a process.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use sp_av::convert::{ConversionPreset, MKV_TO_MP4, MP3_TO_MP4};
use sp_av::Workspace;
use sp_core::Error;

use crate::server::error::AppError;
use crate::server::upload;
use crate::server::AppContext;

/// POST /convert-mp3-to-mp4 — re-encode an MP3 into an MP4 container.
pub async fn convert_mp3_to_mp4(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    handle_conversion(ctx, multipart, &MP3_TO_MP4).await
}

/// POST /convert-mkv-to-mp4 — remux an MKV into an MP4 container.
pub async fn convert_mkv_to_mp4(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    handle_conversion(ctx, multipart, &MKV_TO_MP4).await
}

async fn handle_conversion(
    ctx: AppContext,
    multipart: Multipart,
    preset: &ConversionPreset,
) -> Result<Json<Value>, AppError> {
    let file = upload::single_file(
        multipart,
        "file",
        &format!("No .{} file uploaded.", preset.expected_ext),
    )
    .await?;

    if !preset.matches(&file.file_name) {
        return Err(Error::validation(format!(
            "Uploaded file is not a .{} file.",
            preset.expected_ext
        ))
        .into());
    }

    let workspace = Workspace::create()?;
    let input = workspace.save(&file.file_name, &file.data)?;
    let output = workspace.file(&preset.output_name(&file.file_name));

    let ffmpeg = ctx.tools.require("ffmpeg")?;
    ctx.runner
        .run(
            ffmpeg,
            &preset.ffmpeg_args(&input, &output),
            Some(workspace.path()),
        )
        .await?;

    Ok(Json(json!({
        "message": format!("{} successfully converted to MP4.", preset.label),
        "outputFile": output,
    })))
}
