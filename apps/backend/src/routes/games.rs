//! Game directory HTTP routes.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::game::TeamId;
use crate::domain::state::GameStatus;
use crate::error::AppError;
use crate::services::games;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct CreateGameRequest {
    pub host_name: String,
}

#[derive(Serialize)]
pub struct CreateGameResponse {
    pub join_code: String,
    pub host_token: String,
}

/// Team info visible to everyone: no tokens, no placements.
#[derive(Serialize)]
pub struct TeamPublic {
    pub id: TeamId,
    pub index: u8,
    pub name: String,
    pub region: &'static str,
    pub score: i64,
    pub has_submitted: bool,
    pub is_connected: bool,
}

#[derive(Serialize)]
pub struct GameInfoResponse {
    pub join_code: String,
    pub status: GameStatus,
    pub host_name: String,
    pub teams: Vec<TeamPublic>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// POST /api/games
///
/// Create a game with five pre-created teams. Returns the join code and the
/// host's credential; team credentials are fetched by the host from the
/// lobby, never broadcast.
async fn create_game(
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let host_name = body.host_name.trim();
    if host_name.is_empty() || host_name.len() > 50 {
        return Err(AppError::invalid(
            "INVALID_HOST_NAME",
            "host_name must be 1-50 characters",
        ));
    }

    let created = games::create_game(&app_state.games, host_name.to_string());

    Ok(HttpResponse::Created().json(CreateGameResponse {
        join_code: created.join_code,
        host_token: created.host_token,
    }))
}

/// GET /api/games/{code}
///
/// Public lobby view of a game.
async fn get_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let shared = games::get_game(&app_state.games, &code)
        .ok_or_else(|| AppError::not_found("GAME_NOT_FOUND", format!("Game {code} not found")))?;

    let game = shared.read();
    let response = GameInfoResponse {
        join_code: game.join_code.clone(),
        status: game.status,
        host_name: game.host_name.clone(),
        teams: game
            .teams
            .iter()
            .map(|t| TeamPublic {
                id: t.id,
                index: t.index,
                name: t.name.clone(),
                region: t.region.name,
                score: t.score,
                has_submitted: t.has_submitted,
                is_connected: t.is_connected,
            })
            .collect(),
        created_at: game.created_at,
    };

    Ok(HttpResponse::Ok().json(response))
}

#[derive(Deserialize)]
pub struct DeleteGameQuery {
    pub host_token: String,
}

/// DELETE /api/games/{code}?host_token=...
async fn delete_game(
    path: web::Path<String>,
    query: web::Query<DeleteGameQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let shared = games::get_game(&app_state.games, &code)
        .ok_or_else(|| AppError::not_found("GAME_NOT_FOUND", format!("Game {code} not found")))?;

    {
        let game = shared.read();
        if !games::validate_host_token(&game, &query.host_token) {
            return Err(AppError::unauthorized("Invalid host token"));
        }
    }

    app_state.games.remove(&code);
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/games").route(web::post().to(create_game)));
    cfg.service(
        web::resource("/api/games/{code}")
            .route(web::get().to(get_game))
            .route(web::delete().to(delete_game)),
    );
}
