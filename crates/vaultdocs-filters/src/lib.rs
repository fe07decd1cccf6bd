//! # vaultdocs Filters
//!
//! Template filters for pages of a vault-backed documentation site:
//!
//! | Filter | Does |
//! |---|---|
//! | `convert_time` | `2023-05-01` to `01 May 2023` |
//! | `iso_time` | `2023/05/01` to `2023-05-01T00:00:00` |
//! | `time_todatetime` | date string to an object with `year`, `month`, `day`, ... |
//! | `page_exists` | whether a file exists |
//! | `url_decode` | `a%20b` to `a b` |
//! | `log` | writes the value to the log, renders nothing |
//! | `to_local_time` | `2023-05-01` with `locale="fr"` to `1 mai 2023` |
//!
//! Date filters never fail a render: input they cannot parse comes back
//! unchanged.
//!
//! ```
//! use tera::{Context, Tera};
//! use vaultdocs_filters::setup_environment;
//!
//! let mut env = Tera::default();
//! setup_environment(&mut env);
//! let out = env.render_str("{{ '2023-05-01' | convert_time }}", &Context::new()).unwrap();
//! assert_eq!(out, "01 May 2023");
//! ```

pub mod dates;
pub mod filters;
pub mod registry;

pub use dates::{DateTimeValue, ParsedDateTime, parse_flexible};
pub use filters::{
    convert_time, iso_time, log_value, page_exists, time_todatetime, to_local_time, url_decode,
};
pub use registry::{FILTER_NAMES, setup_environment};
