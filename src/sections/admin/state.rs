//! Admin panel state: login form and the add-product form.

use crate::catalog::{Category, ALL_CATEGORIES};
use crate::sections::{push_log, LogEntry};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "1234";
/// Longest text a form field accepts.
pub const MAX_FIELD_LEN: usize = 20;
/// Product rows reachable with the digit keys.
pub const MAX_KEYED_ROWS: usize = 9;

/// Text field that receives typed characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    ProductName,
    ProductPrice,
}

impl Field {
    /// Where Enter moves focus to. `None` means Enter submits the form.
    pub fn next(self) -> Option<Field> {
        match self {
            Field::Username => Some(Field::Password),
            Field::ProductName => Some(Field::ProductPrice),
            Field::Password | Field::ProductPrice => None,
        }
    }

    pub fn is_login(self) -> bool {
        matches!(self, Field::Username | Field::Password)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub category: Category,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            category: ALL_CATEGORIES[0],
        }
    }
}

pub struct AdminState {
    pub username: String,
    pub password: String,
    pub draft: ProductDraft,
    pub focus: Option<Field>,
    pub log: Vec<LogEntry>,
}

impl AdminState {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            draft: ProductDraft::default(),
            focus: None,
            log: Vec::new(),
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        push_log(&mut self.log, text, is_important);
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::ProductName => &mut self.draft.name,
            Field::ProductPrice => &mut self.draft.price,
        }
    }

    pub fn clear_login(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}
