/// Confidence for a structural (numeric code prefix) match
pub const CONFIDENCE_CODE_MATCH: f64 = 1.0;

/// Confidence for a description/keyword substring match
pub const CONFIDENCE_DESCRIPTION_MATCH: f64 = 0.85;

/// Confidence for a colloquial alias match.
///
/// Scores above the description match even though alias matching is the
/// cruder heuristic. Kept as-is for behavioral parity.
pub const CONFIDENCE_ALIAS_MATCH: f64 = 0.9;

/// Default number of entries per ranking stream
pub const DEFAULT_STREAM_LIMIT: usize = 3;

/// Default length of the commodity-code prefix used to match stream records (heading level)
pub const DEFAULT_PREFIX_LENGTH: usize = 4;

/// Default maximum accepted classifier query length, in characters
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 256;

/// Default deadline for a full ranking request, in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
