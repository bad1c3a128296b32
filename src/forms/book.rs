use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[validate(minimum = 0)]
    #[validate(maximum = 9999)]
    #[serde(default)]
    pub publication_year: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[validate(minimum = 0)]
    #[validate(maximum = 9999)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
}

impl From<BookUpdateForm> for models::BookChanges {
    fn from(form: BookUpdateForm) -> Self {
        models::BookChanges {
            title: form.title,
            description: form.description,
            author: form.author,
            publisher: form.publisher,
            publication_year: form.publication_year,
        }
    }
}
