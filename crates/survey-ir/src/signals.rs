//! Names the simulator matches on by string.
//!
//! Event names broadcast between interventions and the symbolic markers
//! used in targeting live here so the outcome composer and the campaign
//! assembler can never drift apart.

/// Broadcast by every diagnostic when an individual tests positive.
pub const TESTED_POSITIVE: &str = "TestedPositive";

/// Default event broadcast when an individual receives a test.
pub const RECEIVED_TEST: &str = "Received_Test";

/// Symbolic target demographic covering the whole population.
pub const EVERYONE: &str = "Everyone";

/// Target demographic marker that activates `Target_Age_Min`/`Target_Age_Max`.
pub const EXPLICIT_AGE_RANGES: &str = "ExplicitAgeRanges";

/// Keys of an explicit age-range target object.
pub const AGE_MIN_KEY: &str = "agemin";
pub const AGE_MAX_KEY: &str = "agemax";

/// `Number_Distributions` value meaning "no cap".
pub const UNLIMITED_DISTRIBUTIONS: i32 = -1;

/// Listening duration meaning "listen forever".
pub const UNBOUNDED_DURATION: i32 = -1;

/// Delay distribution used for deterministic delays.
pub const FIXED_DURATION: &str = "FIXED_DURATION";

/// Default diagnostic configuration.
pub const DEFAULT_DIAGNOSTIC_TYPE: &str = "NewDetectionTech";
pub const DEFAULT_DETECTION_THRESHOLD: u64 = 40;
pub const DEFAULT_EVENT_NAME: &str = "Diagnostic Survey";
