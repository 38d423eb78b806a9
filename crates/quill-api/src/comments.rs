use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::CookieJar;
use tracing::info;

use quill_types::forms::CommentForm;

use crate::error::{PageError, run_blocking};
use crate::flash;
use crate::guard::{self, CurrentUser};
use crate::sanitize;
use crate::AppState;

/// POST /post/{id}: persist a comment. Explicitly gated on a session; an
/// anonymous submit is bounced to the login page instead of being
/// misattributed.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    let Some(user) = viewer else {
        let jar = flash::error(jar, "Log in to comment.");
        return Ok((jar, Redirect::to("/login")).into_response());
    };

    if form.validate().is_err() {
        let jar = flash::error(jar, "Comment cannot be empty.");
        return Ok((jar, Redirect::to(&format!("/post/{post_id}"))).into_response());
    }

    // The parent post must exist before anything is written.
    let db = state.clone();
    if run_blocking(move || db.db.post_by_id(post_id)).await??.is_none() {
        return Err(PageError::NotFound);
    }

    // Rich-text submissions are stored as plain text only. Markup with no
    // text content sanitizes to nothing and is rejected the same way.
    let body = sanitize::strip_markup(&form.body);
    if body.is_empty() {
        let jar = flash::error(jar, "Comment cannot be empty.");
        return Ok((jar, Redirect::to(&format!("/post/{post_id}"))).into_response());
    }

    let author_id = user.sub;
    let db = state.clone();
    let comment_id = run_blocking(move || db.db.create_comment(&body, author_id, post_id)).await??;

    info!(comment_id, post_id, author_id, "comment created");
    Ok(Redirect::to(&format!("/post/{post_id}")).into_response())
}

/// GET /delete_comment/{id}: author-only delete, back to the parent post.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let Some(user) = viewer else {
        return Err(PageError::Unauthorized);
    };

    let db = state.clone();
    let comment = run_blocking(move || db.db.comment_by_id(comment_id)).await??;
    let comment = guard::authorize(comment, |c| guard::may_delete_comment(user.sub, c))?;

    let db = state.clone();
    run_blocking(move || db.db.delete_comment(comment_id)).await??;

    info!(comment_id, "comment deleted");
    Ok(Redirect::to(&format!("/post/{}", comment.post_id)).into_response())
}
