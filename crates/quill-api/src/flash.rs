//! One-shot notifications carried in a cookie: queued by a handler, drained
//! by the next rendered page.

use std::fmt;

use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "quill_flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Error,
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Error => f.write_str("error"),
        }
    }
}

pub fn info(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    push(jar, FlashLevel::Info, message)
}

pub fn error(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    push(jar, FlashLevel::Error, message)
}

/// Queue a message for the next rendered page.
pub fn push(jar: CookieJar, level: FlashLevel, message: impl Into<String>) -> CookieJar {
    let mut messages = peek(&jar);
    messages.push(FlashMessage {
        level,
        message: message.into(),
    });

    let payload = serde_json::to_vec(&messages).unwrap_or_default();
    let mut cookie = Cookie::new(FLASH_COOKIE, B64.encode(payload));
    cookie.set_path("/");
    jar.add(cookie)
}

/// Drain pending messages, clearing the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = peek(&jar);
    let mut cleared = Cookie::new(FLASH_COOKIE, "");
    cleared.set_path("/");
    (jar.remove(cleared), messages)
}

fn peek(jar: &CookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| B64.decode(c.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
