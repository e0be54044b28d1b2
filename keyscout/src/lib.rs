pub mod config;
pub mod errors;
pub mod filters;
pub mod highlight;
pub mod results;
pub mod search;

pub use config::{ConfigOverrides, EncodingMode, ResultOrder, SearchConfig};
pub use errors::{ErrorCategory, SearchError, SearchResult};
pub use highlight::{highlight_segments, Segment};
pub use results::{Match, SearchOutput};
pub use search::{search, search_with_observer, KeywordMatcher, SearchObserver, SearchSession};
