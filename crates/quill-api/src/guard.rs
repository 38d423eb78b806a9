//! Session loading and the authorization checks shared by the mutating
//! routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Redirect, Response};
use axum_extra::extract::CookieJar;
use quill_db::models::{CommentRow, PostRow};

use crate::error::PageError;
use crate::flash;
use crate::session::Claims;
use crate::AppState;

pub const SESSION_COOKIE: &str = "quill_session";

/// The authenticated identity for this request, if any. Inserted by
/// [`load_session`]; handlers pull it out as an `Extension`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Claims>);

/// Decode the session cookie, if present, and stash the outcome for the
/// handlers downstream. A bad or expired token reads as no session.
pub async fn load_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.verify(cookie.value()));
    req.extensions_mut().insert(CurrentUser(claims));
    next.run(req).await
}

/// The capability check behind every guarded route: the resource must exist
/// before the permission predicate runs (missing resource is a 404, never a
/// 403), and a failed predicate is a plain 403.
pub fn authorize<T>(
    resource: Option<T>,
    permit: impl FnOnce(&T) -> bool,
) -> Result<T, PageError> {
    let resource = resource.ok_or(PageError::NotFound)?;
    if !permit(&resource) {
        return Err(PageError::Forbidden);
    }
    Ok(resource)
}

/// Post edit/delete: the author, or the privileged identity.
pub fn may_modify_post(user_id: i64, admin_id: i64, post: &PostRow) -> bool {
    user_id == admin_id || user_id == post.author_id
}

/// Comment delete: the comment's own author only. The admin gets no special
/// treatment here.
pub fn may_delete_comment(user_id: i64, comment: &CommentRow) -> bool {
    user_id == comment.author_id
}

/// Post composition demands a recently issued session, not merely a live
/// one. Stale or absent sessions are sent back to the login page.
pub fn require_fresh(
    state: &AppState,
    viewer: Option<Claims>,
    jar: CookieJar,
) -> Result<(Claims, CookieJar), (CookieJar, Redirect)> {
    match viewer {
        Some(claims) if state.sessions.is_fresh(&claims) => Ok((claims, jar)),
        Some(_) => Err((
            flash::error(jar, "Please log in again to write a post."),
            Redirect::to("/login"),
        )),
        None => Err((
            flash::error(jar, "Log in to write a post."),
            Redirect::to("/login"),
        )),
    }
}
