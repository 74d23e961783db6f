use crate::application::error::SerializedError;

pub type ParseOutcome<T> = Result<T, Vec<SerializedError>>;

/// Turns raw use-case parameters into validated values, reporting every
/// failing field at once.
pub trait SchemaParser<I, O>: Send + Sync {
    fn parse(&self, input: &I) -> ParseOutcome<O>;
}
