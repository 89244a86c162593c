use crate::{
    api::{ApiError, HrRecord},
    utils::forms::FieldErrors,
};

use super::repository::CrudRepository;

/// Editable draft of one record type. Fields are kept as the strings the
/// inputs produce; `validate` turns them into the request payload.
pub trait RecordForm: Clone + Default + PartialEq + 'static {
    type Record: HrRecord;

    fn from_record(record: &Self::Record) -> Self;

    fn validate(&self) -> Result<<Self::Record as HrRecord>::Payload, FieldErrors>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validates `draft` and sends it: a create when `id` is `None`, an edit
/// otherwise. Nothing is sent when validation fails.
pub async fn save_record<F: RecordForm>(
    repository: &CrudRepository<F::Record>,
    id: Option<&str>,
    draft: &F,
) -> Result<F::Record, SubmitError> {
    let payload = draft.validate().map_err(SubmitError::Invalid)?;
    let saved = match id {
        Some(id) => repository.update(id, &payload).await?,
        None => repository.create(&payload).await?,
    };
    Ok(saved)
}
