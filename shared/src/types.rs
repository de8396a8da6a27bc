//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "limit")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// List body as returned by the backend: either a bare array or `{"data": [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Wrapped { data } => data,
            ListResponse::Bare(items) => items,
        }
    }
}

/// Single-item body: either the bare object or `{"data": {...}}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemResponse<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemResponse<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemResponse::Wrapped { data } => data,
            ItemResponse::Bare(item) => item,
        }
    }
}
