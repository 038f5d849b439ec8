//! Packaging route handlers.
//!
//! `/run-packager` builds a plan straight from the uploaded form;
//! `/convert-to-hls` probes the upload first and derives the plan from the
//! probed streams. Both run the packager inside the request's scratch
//! directory so relative output paths never escape it.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use sp_av::{plan, probe, Workspace};
use sp_core::Error;

use crate::server::error::AppError;
use crate::server::upload::{self, PackagerForm};
use crate::server::AppContext;

/// POST /run-packager — package an uploaded video plus optional audio and
/// subtitle tracks into adaptive-streaming output.
pub async fn run_packager(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = PackagerForm::collect(multipart).await?;

    let video = form
        .video
        .ok_or_else(|| Error::validation("No video file uploaded."))?;

    // The language tags are positionally paired with the audio files, so a
    // length mismatch would silently mislabel tracks. Reject it up front.
    if form.audio.len() != form.audio_lang.len() {
        return Err(Error::validation(format!(
            "Expected one audio_lang per audio file: got {} audio files and {} language tags.",
            form.audio.len(),
            form.audio_lang.len()
        ))
        .into());
    }

    let workspace = Workspace::create()?;
    let video_path = workspace.save(&video.file_name, &video.data)?;

    let mut audio = Vec::with_capacity(form.audio.len());
    for (file, language) in form.audio.iter().zip(&form.audio_lang) {
        let path = workspace.save(&file.file_name, &file.data)?;
        audio.push((path, language.clone()));
    }

    let mut subtitles = Vec::with_capacity(form.subtitles.len());
    for file in &form.subtitles {
        subtitles.push(workspace.save(&file.file_name, &file.data)?);
    }

    let plan = plan::plan_from_uploads(
        &video_path,
        &audio,
        &subtitles,
        ctx.config.packaging.segment_duration,
    );

    let packager = ctx.tools.require("packager")?;
    ctx.runner
        .run(packager, &plan.to_args(), Some(workspace.path()))
        .await?;

    Ok(Json(json!({
        "message": "HLS packaging completed successfully."
    })))
}

/// POST /convert-to-hls — probe an uploaded file and package its video and
/// audio streams into adaptive-streaming output.
pub async fn convert_to_hls(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let file = upload::single_file(multipart, "file", "No file uploaded").await?;

    let workspace = Workspace::create()?;
    let input = workspace.save(&file.file_name, &file.data)?;

    let ffprobe = ctx.tools.require("ffprobe")?;
    let doc = probe::probe_json(ctx.runner.as_ref(), ffprobe, &input).await?;
    let streams = probe::probed_streams(&doc)?;

    let plan = plan::plan_from_probe(
        &input,
        &streams,
        workspace.path(),
        ctx.config.packaging.segment_duration,
    );
    let args = plan.to_args();

    let packager = ctx.tools.require("packager")?;
    let output = ctx
        .runner
        .run(packager, &args, Some(workspace.path()))
        .await?;

    Ok(Json(json!({
        "message": "HLS conversion completed successfully",
        "master_playlist": plan.master_playlist,
        "output_files": plan.output_files(),
        "packager_command": args,
        "packager_output": output.combined(),
    })))
}
