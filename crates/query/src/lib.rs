pub mod boolean;
pub mod condition;
pub mod validator;

pub use boolean::{BooleanQuery, parse_boolean};
pub use condition::{Condition, Field, FieldValue, Operator, Predicate, Record};
pub use validator::{
    Filters, ValidationError, ValidationErrorKind, ValidationResult, parse_timestamp,
    validate_filters, validate_query_text,
};
