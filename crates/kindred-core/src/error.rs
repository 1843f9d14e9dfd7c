pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{fields} are required")]
    MissingField { fields: &'static str },

    #[error("{field} must not be blank")]
    BlankField { field: &'static str },

    #[error("Invalid {field}: expected an ISO date (YYYY-MM-DD), got {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("type must be PARENT_CHILD or SPOUSE")]
    InvalidRelationshipKind { value: String },

    #[error("A member cannot be related to themselves")]
    SelfRelationship,
}
