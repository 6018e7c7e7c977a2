//! Domain-level error type used across services and the websocket dispatcher.
//!
//! This error type is HTTP- and transport-agnostic. HTTP handlers should
//! return `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation; the
//! websocket dispatcher reports it as an `ERROR` frame via [`DomainError::code`].

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected game actions
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    GameNotStarted,
    PhaseMismatch,
    InsufficientResources,
    NegativeAmount,
    AlreadySubmitted,
    InsufficientTeams,
    Other(String),
}

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Team,
    Cell,
    Other(String),
}

/// Domain-level conflict kinds (extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyStarted,
    HostAlreadyConnected,
    TeamAlreadyConnected,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Stable wire code for `ERROR { code, message }` frames.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(ValidationKind::GameNotStarted, _) => "GAME_NOT_STARTED",
            DomainError::Validation(ValidationKind::PhaseMismatch, _) => "PHASE_MISMATCH",
            DomainError::Validation(ValidationKind::InsufficientResources, _) => {
                "INSUFFICIENT_RESOURCES"
            }
            DomainError::Validation(ValidationKind::NegativeAmount, _) => "NEGATIVE_AMOUNT",
            DomainError::Validation(ValidationKind::AlreadySubmitted, _) => "ALREADY_SUBMITTED",
            DomainError::Validation(ValidationKind::InsufficientTeams, _) => "INSUFFICIENT_TEAMS",
            DomainError::Validation(ValidationKind::Other(_), _) => "VALIDATION_ERROR",
            DomainError::Conflict(ConflictKind::AlreadyStarted, _) => "ALREADY_STARTED",
            DomainError::Conflict(ConflictKind::HostAlreadyConnected, _) => {
                "HOST_ALREADY_CONNECTED"
            }
            DomainError::Conflict(ConflictKind::TeamAlreadyConnected, _) => {
                "TEAM_ALREADY_CONNECTED"
            }
            DomainError::Conflict(ConflictKind::Other(_), _) => "CONFLICT",
            DomainError::NotFound(NotFoundKind::Game, _) => "GAME_NOT_FOUND",
            DomainError::NotFound(NotFoundKind::Team, _) => "TEAM_NOT_FOUND",
            DomainError::NotFound(NotFoundKind::Cell, _) => "CELL_NOT_FOUND",
            DomainError::NotFound(NotFoundKind::Other(_), _) => "NOT_FOUND",
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }
}
