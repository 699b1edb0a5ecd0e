use actix_web::{error::JsonPayloadError, web, HttpResponse};

use crate::{
    error::{AppError, AppResult},
    models::note::{
        NoteForm, NoteListQuery, NoteListResponse, NoteResponse, OkResponse,
        BODY_TOO_LARGE_MESSAGE, CREATE_REQUIRED_MESSAGE, LIST_REQUIRED_MESSAGE, NOTE_BODY_LIMIT,
    },
    state::AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig, enable_bulk_delete: bool) {
    let json_config = web::JsonConfig::default()
        .limit(NOTE_BODY_LIMIT)
        .error_handler(|err, _req| {
            tracing::debug!("Invalid note body: {}", err);
            json_error(err).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!("Invalid notes query: {}", err);
        AppError::BadRequest(LIST_REQUIRED_MESSAGE.to_string()).into()
    });

    let mut notes = web::resource("")
        .route(web::get().to(get_notes))
        .route(web::post().to(create_new_note));

    if enable_bulk_delete {
        notes = notes.route(web::delete().to(delete_all_notes));
    }

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(notes)
        .service(web::resource("/{id}").route(web::delete().to(delete_note_by_id)));
}

fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            AppError::PayloadTooLarge(BODY_TOO_LARGE_MESSAGE.to_string())
        }
        // Unparsable input is answered like missing input
        _ => AppError::BadRequest(CREATE_REQUIRED_MESSAGE.to_string()),
    }
}

/// GET /notes?messageId= - Notes attached to one message, oldest first
async fn get_notes(
    state: web::Data<AppState>,
    query: web::Query<NoteListQuery>,
) -> AppResult<HttpResponse> {
    let notes = state
        .notes
        .get_notes_by_message_id(query.message_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(NoteListResponse { notes }))
}

/// POST /notes - Create note
async fn create_new_note(
    state: web::Data<AppState>,
    form_data: web::Json<NoteForm>,
) -> AppResult<HttpResponse> {
    let note = state.notes.insert_new_note(form_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(NoteResponse { note }))
}

/// DELETE /notes/{id} - Delete note by ID
async fn delete_note_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.notes.delete_note_by_id(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

/// DELETE /notes - Remove every note. Only routed when bulk delete is enabled.
async fn delete_all_notes(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.notes.delete_all_notes().await?;

    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
