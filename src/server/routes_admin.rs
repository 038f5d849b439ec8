//! Admin route handlers.

use axum::extract::State;
use axum::Json;
use sp_av::ToolInfo;

use crate::server::AppContext;

/// GET /admin/tools — list external tool availability.
pub async fn tools(State(ctx): State<AppContext>) -> Json<Vec<ToolInfo>> {
    Json(ctx.tools.check_all())
}
