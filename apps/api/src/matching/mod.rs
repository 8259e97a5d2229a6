// Matching: the pure keyword-overlap matcher, run settings, session history,
// and the HTTP handlers that orchestrate them.

pub mod handlers;
pub mod history;
pub mod matcher;
pub mod settings;
