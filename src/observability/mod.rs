//! Cross-cutting observability concerns.

pub mod logging;
