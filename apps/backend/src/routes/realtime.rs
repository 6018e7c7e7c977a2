//! Websocket upgrade endpoint.

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::state::app_state::AppState;
use crate::ws::session::WsSession;

/// GET /ws/{code}
///
/// Upgrade to a game websocket. The connection starts unauthenticated; the
/// client must send `AUTH` before any game action is accepted.
pub async fn connect(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let code = path.into_inner().to_uppercase();

    if app_state.games.get(&code).is_none() {
        return Ok(HttpResponse::NotFound().body("Game not found"));
    }

    let session = WsSession::new(code, app_state.clone());
    ws::start(session, &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/{code}").route(web::get().to(connect)));
}
