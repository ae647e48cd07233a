//! Animal listing routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use super::{bad_request, internal_error};
use crate::{AppState, middleware::AuthUser};
use pawhome_core::Outcome;
use pawhome_core::listing::{
    CreateListingInput, ListingService, PictureUpload, collect_picture_buffers,
};
use pawhome_db::ListingRepository;

/// Creates the animal routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/animals", post(create_animal))
}

/// Response for a created listing.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    /// Listing ID.
    pub id: Uuid,
    /// Animal name.
    pub name: String,
    /// Animal species.
    pub species: String,
    /// Animal gender.
    pub gender: String,
    /// Animal race/breed.
    pub race: String,
    /// Free-text description.
    pub description: String,
    /// Owning user ID.
    pub owner_id: Uuid,
    /// Picture ids in submission order.
    pub picture_ids: Vec<Uuid>,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
}

/// Fields and pictures demultiplexed from the multipart body.
struct AnimalForm {
    name: String,
    species: String,
    gender: String,
    race: String,
    description: String,
    pictures: Vec<PictureUpload>,
}

/// Reads the multipart submission into fields plus ordered picture parts.
async fn read_animal_form(mut multipart: Multipart) -> Result<AnimalForm, Response> {
    let mut form = AnimalForm {
        name: String::new(),
        species: String::new(),
        gender: String::new(),
        race: String::new(),
        description: String::new(),
        pictures: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pictures" => {
                let filename = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|_| bad_request("malformed multipart body"))?;
                form.pictures.push(PictureUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| bad_request("malformed multipart body"))?;
                match other {
                    "name" => form.name = value,
                    "species" => form.species = value,
                    "gender" => form.gender = value,
                    "race" => form.race = value,
                    "description" => form.description = value,
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

/// `POST /animals` - publishes an animal listing from a multipart submission.
async fn create_animal(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Response {
    let form = match read_animal_form(multipart).await {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };

    // An unreadable picture part is a fault, not a client error.
    let pictures = match collect_picture_buffers(form.pictures) {
        Ok(pictures) => pictures,
        Err(err) => {
            error!(error = %err, "picture intake failed");
            return internal_error();
        }
    };

    let service = ListingService::new(Arc::new(ListingRepository::new((*state.db).clone())));
    let input = CreateListingInput {
        name: form.name,
        species: form.species,
        gender: form.gender,
        race: form.race,
        description: form.description,
        owner_id: user.user_id(),
        pictures,
    };

    match service.create(input).await {
        Ok(Outcome::Success { value }) => (
            StatusCode::CREATED,
            Json(ListingResponse {
                id: value.id,
                name: value.name,
                species: value.species,
                gender: value.gender,
                race: value.race,
                description: value.description,
                owner_id: value.owner_id,
                picture_ids: value.picture_ids,
                created_at: value.created_at.to_rfc3339(),
            }),
        )
            .into_response(),
        Ok(Outcome::Failure { reason }) => bad_request(&reason),
        Err(err) => {
            error!(error = %err, "creating listing failed");
            internal_error()
        }
    }
}
