use axum::Extension;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;

use crate::error::PageError;
use crate::flash;
use crate::guard::CurrentUser;
use crate::views::{self, AboutPage, ContactPage};

pub async fn about(
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let (jar, messages) = flash::take(jar);
    Ok((jar, views::render(&AboutPage { flash: messages, viewer })?))
}

pub async fn contact(
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PageError> {
    let (jar, messages) = flash::take(jar);
    Ok((jar, views::render(&ContactPage { flash: messages, viewer })?))
}
