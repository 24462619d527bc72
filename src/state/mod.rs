/// State management module
///
/// This module holds everything the editor keeps in memory:
/// - The album record as the server sends it (data.rs)
/// - The editable working copy and its list operations (form.rs)
/// - Validation errors returned by the server (errors.rs)

pub mod data;
pub mod errors;
pub mod form;
