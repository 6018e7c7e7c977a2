use std::time::Instant;

use actix::prelude::{Actor, ActorContext, AsyncContext, Handler, StreamHandler};
use actix_web::web;
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::game::{WS_CONNECTION_TIMEOUT, WS_HEARTBEAT_INTERVAL};
use crate::state::app_state::AppState;
use crate::ws::handlers;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// One websocket connection. The actor itself stays thin: it keeps the
/// heartbeat, parses frames, and hands every message to the dispatcher.
pub struct WsSession {
    conn_id: Uuid,
    join_code: String,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(join_code: String, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            join_code,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(WS_HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > WS_CONNECTION_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    join_code = %actor.join_code,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            join_code = %self.join_code,
            "[WS SESSION] started"
        );

        let recipient = ctx.address().recipient::<Outbound>();
        self.app_state
            .hub
            .connect(&self.join_code, self.conn_id, recipient);

        Self::send_json(
            ctx,
            &ServerMsg::Connected {
                client_id: self.conn_id,
            },
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        handlers::handle_disconnect(&self.app_state, &self.join_code, self.conn_id);
        info!(
            conn_id = %self.conn_id,
            join_code = %self.join_code,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    Self::send_json(
                        ctx,
                        &ServerMsg::Error {
                            code: "BAD_REQUEST",
                            message: "Malformed message".to_string(),
                        },
                    );
                    return;
                };

                handlers::dispatch(&self.app_state, &self.join_code, self.conn_id, cmd);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: "BAD_REQUEST",
                        message: "Binary not supported".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    join_code = %self.join_code,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
