//! Fixed values used when building provider requests and locating build configs.

/// Header identifying this adapter to the inference service.
pub const USER_AGENT_HEADER: &str = "User-Agent";
pub const USER_AGENT: &str = "llama-stack: nvidia-inference-adapter";

/// Number of completions requested per call unless the caller asks otherwise.
pub const DEFAULT_N: u32 = 1;

/// `nvext.top_k` value that disables top-k filtering.
pub const TOP_K_DISABLED: i64 = -1;

/// Environment variable overriding the build configuration directory.
pub const BUILDS_DIR_ENV: &str = "LLAMA_STACK_BUILDS_DIR";

/// Build directory relative to `$HOME` when no override is set.
pub const BUILDS_DIR_RELATIVE: &str = ".llama/builds";
