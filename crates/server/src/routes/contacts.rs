use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use service::{Contact, Pagination};
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::state::AppState;

/// Raw `page`/`limit` query values. Kept as strings so a bad value falls back
/// to its default instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parse a paging value. Valid digits that overflow `u32` saturate; anything
/// else (empty, negative, non-numeric) yields `None`.
fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(u32::MAX);
    }
    None
}

impl ListQuery {
    /// Build from raw query pairs; the first occurrence of a key wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        let parse = |raw: &Option<String>, fallback: u32| {
            raw.as_deref().and_then(parse_count).unwrap_or(fallback)
        };
        Pagination::new(parse(&self.page, defaults.page), parse(&self.limit, defaults.limit))
    }
}

/// GET /contacts?page=&limit=
pub async fn list_contacts(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let query = match query {
        Ok(Query(pairs)) => ListQuery::from_pairs(pairs),
        Err(e) => {
            debug!(error = %e, "unreadable paging query, using defaults");
            ListQuery::default()
        }
    };
    let page = query.pagination();
    let contacts = state.contacts.list(page).await.map_err(|e| {
        warn!(endpoint = "GET /contacts", error = %e, "failed to list contacts");
        ApiError::from(e).context("failed to retrieve contacts")
    })?;
    info!(endpoint = "GET /contacts", page = page.page, limit = page.limit, count = contacts.len(), "contacts listed");
    Ok(Json(contacts))
}

/// GET /contacts/:id
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    match state.contacts.get_by_id(&id).await {
        Ok(contact) => {
            info!(endpoint = "GET /contacts/{id}", contact_id = %id, "contact retrieved");
            Ok(Json(contact))
        }
        Err(e) => {
            warn!(endpoint = "GET /contacts/{id}", contact_id = %id, error = %e, "failed to get contact");
            Err(e.into())
        }
    }
}

/// POST /contacts
pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<Contact>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(contact) = body.map_err(|e| {
        warn!(endpoint = "POST /contacts", error = %e, "failed to decode request body");
        ApiError::from(e)
    })?;

    match state.contacts.create(contact).await {
        Ok(created) => {
            info!(endpoint = "POST /contacts", contact_id = %created.id, "contact created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            warn!(endpoint = "POST /contacts", error = %e, "failed to create contact");
            Err(ApiError::from(e).context("contact creation failed"))
        }
    }
}

/// PUT /contacts/:id. The path id wins over any id in the body.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Contact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(mut contact) = body.map_err(|e| {
        warn!(endpoint = "PUT /contacts/{id}", contact_id = %id, error = %e, "failed to decode request body");
        ApiError::from(e)
    })?;
    contact.id = id;

    match state.contacts.update(contact).await {
        Ok(updated) => {
            info!(endpoint = "PUT /contacts/{id}", contact_id = %updated.id, "contact updated");
            Ok(Json(updated))
        }
        Err(e) => {
            warn!(endpoint = "PUT /contacts/{id}", error = %e, "failed to update contact");
            Err(ApiError::from(e).context("contact update failed"))
        }
    }
}

/// DELETE /contacts/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.contacts.delete(&id).await {
        Ok(_) => {
            info!(endpoint = "DELETE /contacts/{id}", contact_id = %id, "contact deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            warn!(endpoint = "DELETE /contacts/{id}", contact_id = %id, error = %e, "failed to delete contact");
            Err(ApiError::from(e).context("contact deletion failed"))
        }
    }
}
