use email_address::EmailAddress;
use serde::Deserialize;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A failed check on a single form field, rendered inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if !EmailAddress::is_valid(email) {
        errors.push(FieldError::new("email", "Enter a valid email address"));
    }
}

fn check_password(errors: &mut Vec<FieldError>, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.subtitle.trim().is_empty() {
            errors.push(FieldError::new("subtitle", "Subtitle is required"));
        }
        if !(self.img_url.starts_with("http://") || self.img_url.starts_with("https://")) {
            errors.push(FieldError::new("img_url", "Enter a valid image URL"));
        }
        if self.body.trim().is_empty() {
            errors.push(FieldError::new("body", "Post body is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.body.trim().is_empty() {
            return Err(vec![FieldError::new("body", "Comment cannot be empty")]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_accepts_valid_input() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "password1".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_form_rejects_short_password() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn register_form_rejects_malformed_email() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "not-an-email".into(),
            password: "password1".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "email"));
    }

    #[test]
    fn register_form_collects_every_failure() {
        let form = RegisterForm {
            name: "  ".into(),
            email: "nope".into(),
            password: "x".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn post_form_requires_http_image_url() {
        let form = PostForm {
            title: "T".into(),
            subtitle: "S".into(),
            img_url: "ftp://example.com/pic.png".into(),
            body: "B".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "img_url");
    }

    #[test]
    fn comment_form_rejects_whitespace_only_body() {
        let form = CommentForm { body: "   ".into() };
        assert!(form.validate().is_err());
    }
}
