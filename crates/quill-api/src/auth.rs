use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use tracing::info;

use quill_types::forms::{LoginForm, RegisterForm};

use crate::error::PageError;
use crate::flash;
use crate::guard::{CurrentUser, SESSION_COOKIE};
use crate::views::{self, LoginPage, RegisterPage};
use crate::AppState;

pub async fn register_page(
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let (jar, messages) = flash::take(jar);
    let page = RegisterPage {
        flash: messages,
        viewer,
        name: String::new(),
        email: String::new(),
        errors: Vec::new(),
    };
    Ok((jar, views::render(&page)?))
}

pub async fn register(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    if let Err(errors) = form.validate() {
        let (jar, messages) = flash::take(jar);
        let page = RegisterPage {
            flash: messages,
            viewer,
            name: form.name.clone(),
            email: form.email.clone(),
            errors,
        };
        return Ok((jar, views::render(&page)?).into_response());
    }

    let pwhash = state.passwords.hash(&form.password)?;

    let jar = match state.db.create_user(form.name.trim(), form.email.trim(), &pwhash) {
        Ok(user_id) => {
            info!(user_id, "registered new user");
            jar
        }
        Err(err) if err.is_duplicate() => {
            flash::info(jar, "Email already in use. Log in instead.")
        }
        Err(err) => return Err(err.into()),
    };

    // Registration lands on the login page whether or not the insert stuck;
    // the flash message is what tells the outcomes apart.
    Ok((jar, Redirect::to("/login")).into_response())
}

pub async fn login_page(
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let (jar, messages) = flash::take(jar);
    let page = LoginPage {
        flash: messages,
        viewer,
        email: String::new(),
        errors: Vec::new(),
    };
    Ok((jar, views::render(&page)?))
}

pub async fn login(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    if let Err(errors) = form.validate() {
        let (jar, messages) = flash::take(jar);
        let page = LoginPage {
            flash: messages,
            viewer,
            email: form.email.clone(),
            errors,
        };
        return Ok((jar, views::render(&page)?).into_response());
    }

    let user = match state.db.user_by_email(form.email.trim()) {
        Ok(Some(user)) => user,
        Ok(None) => {
            let jar = flash::error(jar, "Not a valid username");
            return Ok((jar, Redirect::to("/login")).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    if !state.passwords.verify(&user.pwhash, &form.password)? {
        let jar = flash::error(jar, "Not a valid password");
        return Ok((jar, Redirect::to("/login")).into_response());
    }

    let token = state.sessions.issue(user.id, &user.name)?;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);

    info!(user_id = user.id, "login");
    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    (jar.remove(cookie), Redirect::to("/"))
}
