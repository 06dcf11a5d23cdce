use starmatch_core::{GeometryError, InputError};

/// Errors that end a matching run. A run that simply finds no match is not
/// an error; see [`crate::StarMatchResult::is_match`].
#[derive(thiserror::Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
