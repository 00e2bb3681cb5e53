// Persisted candidate profile: read, replace, template choice, reset and
// printable HTML.

pub mod handlers;
