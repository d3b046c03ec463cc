use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, AppResult};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;
pub const BIO_MAX: usize = 500;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects field violations so a client sees all of them in one response.
#[derive(Debug, Default)]
pub struct Violations(Vec<&'static str>);

impl Violations {
    pub fn name(&mut self, name: &str) -> &mut Self {
        let len = name.chars().count();
        if len == 0 {
            self.0.push("Name is required");
        } else if len < NAME_MIN {
            self.0.push("Name must be at least 2 characters");
        } else if len > NAME_MAX {
            self.0.push("Name must be less than 50 characters");
        }
        self
    }

    pub fn email(&mut self, email: &str) -> &mut Self {
        if email.is_empty() {
            self.0.push("Email is required");
        } else if !is_valid_email(email) {
            self.0.push("Invalid email address");
        }
        self
    }

    /// Registration rules. Login only checks presence, so that a short
    /// password is reported the same way as a wrong one.
    pub fn new_password(&mut self, password: &str) -> &mut Self {
        let len = password.chars().count();
        if len == 0 {
            self.0.push("Password is required");
        } else if len < PASSWORD_MIN {
            self.0.push("Password must be at least 6 characters");
        } else if len > PASSWORD_MAX {
            self.0.push("Password must be less than 100 characters");
        }
        self
    }

    pub fn password_present(&mut self, password: &str) -> &mut Self {
        if password.is_empty() {
            self.0.push("Password is required");
        }
        self
    }

    pub fn bio(&mut self, bio: &str) -> &mut Self {
        if bio.chars().count() > BIO_MAX {
            self.0.push("Bio must be less than 500 characters");
        }
        self
    }

    pub fn finish(&self) -> AppResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0.join(", ")))
        }
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
