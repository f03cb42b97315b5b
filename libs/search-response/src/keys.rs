//! Reserved section and entry names, exactly as they appear in the payload.

// Top-level sections
pub const RESPONSE_HEADER: &str = "responseHeader";
pub const RESPONSE: &str = "response";
pub const FACET_COUNTS: &str = "facet_counts";
pub const GROUPED: &str = "grouped";
pub const HIGHLIGHTING: &str = "highlighting";
pub const NEXT_CURSOR_MARK: &str = "nextCursorMark";

// Sections under `facet_counts`
pub const FACET_QUERIES: &str = "facet_queries";
pub const FACET_FIELDS: &str = "facet_fields";
pub const FACET_DATES: &str = "facet_dates";
pub const FACET_RANGES: &str = "facet_ranges";
pub const FACET_INTERVALS: &str = "facet_intervals";

// Range and date facet entries
pub const START: &str = "start";
pub const END: &str = "end";
pub const GAP: &str = "gap";
pub const COUNTS: &str = "counts";
pub const BEFORE: &str = "before";
pub const AFTER: &str = "after";
pub const BETWEEN: &str = "between";
pub const INTERVALS: &str = "intervals";
pub const HARDEND: &str = "hardend";
pub const OTHER: &str = "other";

// Grouping
pub const MATCHES: &str = "matches";
pub const NGROUPS: &str = "ngroups";
pub const GROUPS: &str = "groups";
pub const GROUP_VALUE: &str = "groupValue";
pub const DOCLIST: &str = "doclist";

// Document lists
pub const NUM_FOUND: &str = "numFound";
pub const MAX_SCORE: &str = "maxScore";
pub const DOCS: &str = "docs";

// Response header
pub const STATUS: &str = "status";
pub const QTIME: &str = "QTime";
pub const PARAMS: &str = "params";
pub const PARTIAL_RESULTS: &str = "partialResults";

/// Keys of a legacy date facet entry that carry metadata rather than buckets.
pub const DATE_FACET_META: [&str; 8] = [GAP, START, END, BEFORE, AFTER, BETWEEN, HARDEND, OTHER];
