//! Infrastructure layer constants
//!
//! Defaults for every configuration value. Domain conventions (directory
//! prefixes, marker strings) live in `fwt_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "fwt.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "fwt";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "FWT";

/// Separator between nested keys in environment variables (`FWT_RUNNER__TEST_TIMEOUT`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// RUNNER CONSTANTS
// ============================================================================

/// Directory holding one sub-directory per test
pub const DEFAULT_TESTS_DIR: &str = "server_tests";

/// Maximum number of tests running at once
pub const DEFAULT_MAX_PARALLEL_TESTS: usize = 5;

/// Per-test timeout in seconds
pub const DEFAULT_TEST_TIMEOUT_SECS: u64 = 300;

/// Readiness grace period between container start and test start
pub const DEFAULT_SLEEP_BEFORE_TEST_SECS: u64 = 5;

/// Seconds a driver waits after pushing configuration to core
pub const DEFAULT_CONFIG_UPDATE_DELAY_SECS: u64 = 60;

// ============================================================================
// DOCKER CONSTANTS
// ============================================================================

/// Docker executable
pub const DEFAULT_DOCKER_BINARY: &str = "docker";

/// Tag of the fixture image built once per run
pub const DEFAULT_IMAGE_NAME: &str = "firewall-tester-action-docker-image";

/// Port the application listens on inside the container
pub const DEFAULT_APP_PORT: u16 = 3000;

/// First host port handed out to an application container
pub const DEFAULT_START_PORT: u16 = 3001;

/// Port of the control server inside the container
pub const DEFAULT_CONTROL_SERVER_PORT: u16 = 8081;

/// First host port handed out to a control server
pub const DEFAULT_CONTROL_START_PORT: u16 = 8100;

/// Container env var carrying the per-test token
pub const DEFAULT_TOKEN_ENV_VAR: &str = "AIKIDO_TOKEN";

// ============================================================================
// CORE CONSTANTS
// ============================================================================

/// Host of the mock core backend
pub const DEFAULT_CORE_HOST: &str = "localhost";

/// Port of the mock core backend
pub const DEFAULT_CORE_PORT: u16 = 3000;

/// Request timeout for core calls in seconds
pub const DEFAULT_CORE_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// ENTRY POINT CONSTANTS
// ============================================================================

/// Program running a test entry point
pub const DEFAULT_ENTRY_PROGRAM: &str = "python3";

/// Entry point script inside each test directory
pub const DEFAULT_ENTRY_SCRIPT: &str = "test.py";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "FWT_LOG";

/// File name prefix for rotated log files
pub const LOG_FILE_PREFIX: &str = "fwt";
