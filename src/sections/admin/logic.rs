//! Admin form rules: credential check, field editing and product validation.

use thiserror::Error;

use crate::catalog::{Category, ALL_CATEGORIES};

use super::state::{ProductDraft, ADMIN_PASSWORD, ADMIN_USERNAME, MAX_FIELD_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("帳號或密碼錯誤！\n(預設帳號: admin / 密碼: 1234)")]
    BadCredentials,
    #[error("請填寫完整資訊")]
    MissingField,
    #[error("價格必須是數字")]
    InvalidPrice,
}

/// A validated product ready for the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: u32,
    pub category: Category,
}

pub fn check_credentials(username: &str, password: &str) -> Result<(), AdminError> {
    if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
        Ok(())
    } else {
        Err(AdminError::BadCredentials)
    }
}

/// Append a typed character. Control characters and overflow are dropped.
pub fn type_char(buffer: &mut String, c: char) -> bool {
    if c.is_control() || buffer.chars().count() >= MAX_FIELD_LEN {
        return false;
    }
    buffer.push(c);
    true
}

pub fn backspace(buffer: &mut String) -> bool {
    buffer.pop().is_some()
}

pub fn next_category(category: Category) -> Category {
    let i = ALL_CATEGORIES
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0);
    ALL_CATEGORIES[(i + 1) % ALL_CATEGORIES.len()]
}

pub fn validate_draft(draft: &ProductDraft) -> Result<NewProduct, AdminError> {
    let name = draft.name.trim();
    let price = draft.price.trim();
    if name.is_empty() || price.is_empty() {
        return Err(AdminError::MissingField);
    }
    let price = price.parse::<u32>().map_err(|_| AdminError::InvalidPrice)?;
    Ok(NewProduct {
        name: name.to_string(),
        price,
        category: draft.category,
    })
}

/// Shown next to a field: the text itself, or stars for the password.
pub fn display_value(text: &str, masked: bool) -> String {
    if masked {
        "*".repeat(text.chars().count())
    } else {
        text.to_string()
    }
}
