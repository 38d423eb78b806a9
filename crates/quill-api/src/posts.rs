use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::CookieJar;
use chrono::Local;
use tracing::info;

use quill_db::StoreError;
use quill_db::models::{NewPost, PostUpdate};
use quill_types::forms::PostForm;

use crate::error::{PageError, run_blocking};
use crate::flash;
use crate::guard::{self, CurrentUser};
use crate::views::{self, ComposePage, IndexPage, PostPage};
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let db = state.clone();
    let posts = run_blocking(move || db.db.all_posts()).await??;

    let (jar, messages) = flash::take(jar);
    let page = IndexPage {
        flash: messages,
        viewer,
        posts,
    };
    Ok((jar, views::render(&page)?))
}

pub async fn show_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let db = state.clone();
    let (post, comments) = run_blocking(move || {
        let post = db.db.post_by_id(post_id)?.ok_or(StoreError::NotFound)?;
        let comments = db.db.comments_for_post(post_id)?;
        Ok((post, comments))
    })
    .await??;

    let (jar, messages) = flash::take(jar);
    let page = PostPage {
        flash: messages,
        viewer,
        post,
        comments,
        admin_id: state.admin_id,
    };
    Ok((jar, views::render(&page)?))
}

pub async fn new_post_page(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let (user, jar) = match guard::require_fresh(&state, viewer, jar) {
        Ok(ok) => ok,
        Err(denied) => return Ok(denied.into_response()),
    };

    let (jar, messages) = flash::take(jar);
    let page = ComposePage {
        flash: messages,
        viewer: Some(user),
        is_edit: false,
        action: "/new-post".into(),
        title: String::new(),
        subtitle: String::new(),
        img_url: String::new(),
        body: String::new(),
        errors: Vec::new(),
    };
    Ok((jar, views::render(&page)?).into_response())
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, PageError> {
    let (user, jar) = match guard::require_fresh(&state, viewer, jar) {
        Ok(ok) => ok,
        Err(denied) => return Ok(denied.into_response()),
    };

    if let Err(errors) = form.validate() {
        let (jar, messages) = flash::take(jar);
        let page = ComposePage {
            flash: messages,
            viewer: Some(user),
            is_edit: false,
            action: "/new-post".into(),
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            img_url: form.img_url.clone(),
            body: form.body.clone(),
            errors,
        };
        return Ok((jar, views::render(&page)?).into_response());
    }

    let date = Local::now().format("%B %d, %Y").to_string();
    let author_id = user.sub;
    let db = state.clone();
    let result = run_blocking(move || {
        db.db.create_post(&NewPost {
            title: form.title.trim(),
            subtitle: form.subtitle.trim(),
            body: &form.body,
            img_url: form.img_url.trim(),
            date: &date,
            author_id,
        })
    })
    .await?;

    match result {
        Ok(post_id) => {
            info!(post_id, author_id, "post created");
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) if err.is_duplicate() => {
            let jar = flash::error(jar, "That title is already in use.");
            Ok((jar, Redirect::to("/new-post")).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_post_page(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let Some(user) = viewer else {
        return Err(PageError::Unauthorized);
    };

    let db = state.clone();
    let post = run_blocking(move || db.db.post_by_id(post_id)).await??;
    let post = guard::authorize(post, |p| {
        guard::may_modify_post(user.sub, state.admin_id, p)
    })?;

    let (jar, messages) = flash::take(jar);
    let page = ComposePage {
        flash: messages,
        viewer: Some(user),
        is_edit: true,
        action: format!("/edit-post/{}", post.id),
        title: post.title,
        subtitle: post.subtitle,
        img_url: post.img_url,
        body: post.body,
        errors: Vec::new(),
    };
    Ok((jar, views::render(&page)?).into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, PageError> {
    let Some(user) = viewer else {
        return Err(PageError::Unauthorized);
    };

    let db = state.clone();
    let existing = run_blocking(move || db.db.post_by_id(post_id)).await??;
    guard::authorize(existing, |p| {
        guard::may_modify_post(user.sub, state.admin_id, p)
    })?;

    if let Err(errors) = form.validate() {
        let (jar, messages) = flash::take(jar);
        let page = ComposePage {
            flash: messages,
            viewer: Some(user),
            is_edit: true,
            action: format!("/edit-post/{post_id}"),
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            img_url: form.img_url.clone(),
            body: form.body.clone(),
            errors,
        };
        return Ok((jar, views::render(&page)?).into_response());
    }

    // Authorship follows the editor: an admin who edits a post becomes its
    // author. Pinned by a test in tests/routes.rs.
    let editor = user.sub;
    let db = state.clone();
    let result = run_blocking(move || {
        db.db.update_post(
            post_id,
            &PostUpdate {
                title: form.title.trim(),
                subtitle: form.subtitle.trim(),
                body: &form.body,
                img_url: form.img_url.trim(),
                author_id: editor,
            },
        )
    })
    .await?;

    match result {
        Ok(()) => {
            info!(post_id, editor, "post updated");
            Ok((jar, Redirect::to(&format!("/post/{post_id}"))).into_response())
        }
        Err(err) if err.is_duplicate() => {
            let jar = flash::error(jar, "That title is already in use.");
            Ok((jar, Redirect::to(&format!("/edit-post/{post_id}"))).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
) -> Result<Response, PageError> {
    let Some(user) = viewer else {
        return Err(PageError::Unauthorized);
    };

    let db = state.clone();
    let post = run_blocking(move || db.db.post_by_id(post_id)).await??;
    guard::authorize(post, |p| {
        guard::may_modify_post(user.sub, state.admin_id, p)
    })?;

    let db = state.clone();
    run_blocking(move || db.db.delete_post(post_id)).await??;

    info!(post_id, "post deleted");
    Ok(Redirect::to("/").into_response())
}
