// Profile core: snapshot mutations, completeness analysis, achievements.
// Every mutation runs the full recompute pipeline before returning (session.rs).

pub mod achievements;
pub mod completeness;
pub mod handlers;
pub mod store;
