//! Connection registry: live websocket connections per game.
//!
//! Enforces at most one authenticated connection per team and one for the
//! host per game; a second attempt for an already-bound identity is rejected
//! instead of replacing the first. Fan-out is best effort: a failed send to
//! one recipient never aborts delivery to the others.

use std::collections::HashMap;

use actix::prelude::{Message, Recipient};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::game::{Role, TeamId};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::ws::protocol::ServerMsg;

/// Outbound frame delivered to a session actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// Per-connection record. Created on connect, populated on authentication,
/// dropped on disconnect.
#[derive(Debug, Clone, Default)]
pub struct ConnectionInfo {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub team_id: Option<TeamId>,
}

struct ConnEntry {
    recipient: Recipient<Outbound>,
    info: ConnectionInfo,
}

#[derive(Default)]
struct GameConnections {
    conns: HashMap<Uuid, ConnEntry>,
    team_bindings: HashMap<TeamId, Uuid>,
    host_conn: Option<Uuid>,
}

#[derive(Default)]
pub struct WsHub {
    games: DashMap<String, GameConnections>,
}

impl WsHub {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }

    /// Track a fresh, unauthenticated connection.
    pub fn connect(&self, code: &str, conn_id: Uuid, recipient: Recipient<Outbound>) {
        let mut entry = self.games.entry(code.to_string()).or_default();
        entry.conns.insert(
            conn_id,
            ConnEntry {
                recipient,
                info: ConnectionInfo::default(),
            },
        );
    }

    /// Drop a connection, releasing any team/host binding so the same
    /// credential can authenticate again. Returns the connection's info.
    pub fn disconnect(&self, code: &str, conn_id: Uuid) -> Option<ConnectionInfo> {
        let mut entry = self.games.get_mut(code)?;
        let removed = entry.conns.remove(&conn_id)?;

        if let Some(team_id) = removed.info.team_id {
            if entry.team_bindings.get(&team_id) == Some(&conn_id) {
                entry.team_bindings.remove(&team_id);
            }
        }
        if entry.host_conn == Some(conn_id) {
            entry.host_conn = None;
        }

        let empty = entry.conns.is_empty();
        drop(entry);
        if empty {
            self.games.remove_if(code, |_, conns| conns.conns.is_empty());
        }

        Some(removed.info)
    }

    /// Mark a connection authenticated, binding its identity. Rejects a
    /// duplicate host or team binding with a descriptive conflict.
    pub fn authenticate(
        &self,
        code: &str,
        conn_id: Uuid,
        role: Role,
        team_id: Option<TeamId>,
    ) -> Result<(), DomainError> {
        let mut entry = self
            .games
            .get_mut(code)
            .ok_or_else(|| DomainError::conflict(ConflictKind::Other("NO_CONNECTIONS".into()), "Connection not found"))?;

        if !entry.conns.contains_key(&conn_id) {
            return Err(DomainError::conflict(
                ConflictKind::Other("NO_CONNECTIONS".into()),
                "Connection not found",
            ));
        }

        match role {
            Role::Host => {
                if entry.host_conn.is_some() {
                    return Err(DomainError::conflict(
                        ConflictKind::HostAlreadyConnected,
                        "Host already connected",
                    ));
                }
                entry.host_conn = Some(conn_id);
            }
            Role::Player => {
                if let Some(team_id) = team_id {
                    if entry.team_bindings.contains_key(&team_id) {
                        return Err(DomainError::conflict(
                            ConflictKind::TeamAlreadyConnected,
                            "Team already connected",
                        ));
                    }
                    entry.team_bindings.insert(team_id, conn_id);
                }
            }
            Role::Spectator => {}
        }

        if let Some(conn) = entry.conns.get_mut(&conn_id) {
            conn.info.authenticated = true;
            conn.info.role = Some(role);
            conn.info.team_id = team_id;
        }
        Ok(())
    }

    pub fn info(&self, code: &str, conn_id: Uuid) -> Option<ConnectionInfo> {
        self.games
            .get(code)
            .and_then(|entry| entry.conns.get(&conn_id).map(|c| c.info.clone()))
    }

    /// Targeted send; failures are swallowed.
    pub fn send_to(&self, code: &str, conn_id: Uuid, msg: ServerMsg) {
        if let Some(entry) = self.games.get(code) {
            if let Some(conn) = entry.conns.get(&conn_id) {
                let _ = conn.recipient.do_send(Outbound(msg));
            }
        }
    }

    pub fn send_to_team(&self, code: &str, team_id: TeamId, msg: ServerMsg) {
        if let Some(entry) = self.games.get(code) {
            if let Some(conn_id) = entry.team_bindings.get(&team_id) {
                if let Some(conn) = entry.conns.get(conn_id) {
                    let _ = conn.recipient.do_send(Outbound(msg));
                }
            }
        }
    }

    /// Broadcast the same message to every authenticated connection.
    pub fn broadcast(&self, code: &str, msg: ServerMsg, exclude: Option<Uuid>) {
        self.broadcast_with(code, exclude, |_| Some(msg.clone()));
    }

    /// Broadcast with a per-connection transform: the closure derives each
    /// recipient's message from its [`ConnectionInfo`]; returning `None`
    /// skips that recipient. Unauthenticated connections are always skipped.
    pub fn broadcast_with<F>(&self, code: &str, exclude: Option<Uuid>, make: F)
    where
        F: Fn(&ConnectionInfo) -> Option<ServerMsg>,
    {
        let Some(entry) = self.games.get(code) else {
            return;
        };
        for (conn_id, conn) in &entry.conns {
            if Some(*conn_id) == exclude {
                continue;
            }
            if !conn.info.authenticated {
                continue;
            }
            if let Some(msg) = make(&conn.info) {
                let _ = conn.recipient.do_send(Outbound(msg));
            }
        }
    }

    pub fn connection_count(&self, code: &str) -> usize {
        self.games.get(code).map_or(0, |entry| entry.conns.len())
    }
}
