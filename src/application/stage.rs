// src/application/stage.rs
use crate::application::error::ApplicationError;
use crate::domain::errors::DomainError;
use std::fmt;
use thiserror::Error;

/// Named step of a request pipeline. Errors carry the step they escaped from
/// so the HTTP sink can log where a request died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateAllowed,
    CreateValidated,
    CreateConflictChecked,
    CreateSaved,
    ReplaceFound,
    ReplaceAllowed,
    ReplaceValidated,
    ReplaceSaved,
    ListAllowed,
    ListResult,
    ShowFound,
    ShowAllowed,
    DeleteFound,
    DeleteAllowed,
    DeleteSaved,
    SignInQueryResult,
    SignInPasswordResult,
    SignInSessionResult,
    SignOutAuthorized,
    SignOutSessionDestroy,
    InfoAuthorized,
    Extract,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CreateAllowed => "create_allowed",
            Stage::CreateValidated => "create_validated",
            Stage::CreateConflictChecked => "create_conflict_checked",
            Stage::CreateSaved => "create_saved",
            Stage::ReplaceFound => "replace_found",
            Stage::ReplaceAllowed => "replace_allowed",
            Stage::ReplaceValidated => "replace_validated",
            Stage::ReplaceSaved => "replace_saved",
            Stage::ListAllowed => "list_allowed",
            Stage::ListResult => "list_result",
            Stage::ShowFound => "show_found",
            Stage::ShowAllowed => "show_allowed",
            Stage::DeleteFound => "delete_found",
            Stage::DeleteAllowed => "delete_allowed",
            Stage::DeleteSaved => "delete_saved",
            Stage::SignInQueryResult => "sign_in_query_result",
            Stage::SignInPasswordResult => "sign_in_password_result",
            Stage::SignInSessionResult => "sign_in_session_result",
            Stage::SignOutAuthorized => "sign_out_authorized",
            Stage::SignOutSessionDestroy => "sign_out_session_destroy",
            Stage::InfoAuthorized => "info_authorized",
            Stage::Extract => "extract",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("{stage}: {error}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub error: ApplicationError,
}

impl StageError {
    pub fn new(stage: Stage, error: impl Into<ApplicationError>) -> Self {
        Self {
            stage,
            error: error.into().normalize(),
        }
    }

    pub fn into_inner(self) -> ApplicationError {
        self.error
    }
}

pub type StageResult<T> = Result<T, StageError>;

/// Tags the error side of a result with the stage it came from.
pub trait AtStage<T> {
    fn at(self, stage: Stage) -> StageResult<T>;
}

impl<T> AtStage<T> for Result<T, ApplicationError> {
    fn at(self, stage: Stage) -> StageResult<T> {
        self.map_err(|err| StageError::new(stage, err))
    }
}

impl<T> AtStage<T> for Result<T, DomainError> {
    fn at(self, stage: Stage) -> StageResult<T> {
        self.map_err(|err| StageError::new(stage, err))
    }
}
