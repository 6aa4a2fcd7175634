//! Search over the persisted catalog: validate an untyped request body, then
//! compile it into a [`Predicate`] for the store.

pub mod criteria;
pub mod predicate;

pub use criteria::{validate, PlatformFilter, SearchCriteria, ValidationError};
pub use predicate::{compile, Clause, Predicate};

/// Validate and compile in one step.
pub fn parse_request(raw: &serde_json::Value) -> Result<Predicate, ValidationError> {
    validate(raw).map(|criteria| compile(&criteria))
}
