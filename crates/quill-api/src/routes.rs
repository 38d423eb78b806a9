use axum::{Router, middleware, routing::get};

use crate::{AppState, auth, comments, guard, pages, posts};

/// The full route table. Authentication state is loaded once per request by
/// the session middleware; the mutating handlers run their own guards after
/// loading the target resource.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/post/{post_id}",
            get(posts::show_post).post(comments::create_comment),
        )
        .route(
            "/new-post",
            get(posts::new_post_page).post(posts::create_post),
        )
        .route(
            "/edit-post/{post_id}",
            get(posts::edit_post_page).post(posts::update_post),
        )
        .route("/delete/{post_id}", get(posts::delete_post))
        .route("/delete_comment/{comment_id}", get(comments::delete_comment))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::load_session,
        ))
        .with_state(state)
}
