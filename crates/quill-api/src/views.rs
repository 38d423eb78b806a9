//! Askama page templates. Every page shares the `base.html` shell, which
//! needs the drained flash messages and the viewer (for the nav bar).

use askama::Template;
use axum::response::Html;
use quill_db::models::{CommentRow, PostRow};
use quill_types::forms::FieldError;

use crate::error::PageError;
use crate::flash::FlashMessage;
use crate::session::Claims;

pub fn render<T: Template>(page: &T) -> Result<Html<String>, PageError> {
    Ok(Html(
        page.render().map_err(|e| PageError::Internal(e.into()))?,
    ))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
    pub posts: Vec<PostRow>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
    pub post: PostRow,
    pub comments: Vec<CommentRow>,
    pub admin_id: i64,
}

/// Shared by the new-post and edit-post forms; `action` points the submit
/// back at the right route.
#[derive(Template)]
#[template(path = "compose.html")]
pub struct ComposePage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
    pub is_edit: bool,
    pub action: String,
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
    pub name: String,
    pub email: String,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
    pub email: String,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPage {
    pub flash: Vec<FlashMessage>,
    pub viewer: Option<Claims>,
}
