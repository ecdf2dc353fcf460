//! Process exit codes. Scripts branch on these, so they are stable.

pub const SUCCESS: i32 = 0;
/// Unparsable or invalid project, bad arguments, or an unknown endpoint/stage selection.
pub const VALIDATION_FAILED: i32 = 2;
/// At least one endpoint failed to deploy.
pub const RUN_FAILED: i32 = 3;
/// Anything that kept the command from running at all (I/O, runtime, missing AWS support).
pub const RUNTIME_ERROR: i32 = 4;
