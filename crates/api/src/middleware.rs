/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// Request extractors that report malformed input as `AppError`
pub mod extract;
