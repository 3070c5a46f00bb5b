//! Identifier list loading.
//!
//! Id files are plain text: whitespace or newline separated unsigned 64-bit
//! integers. Parsing stops at the first token that is not a valid id; every id
//! read before that point is kept. Duplicates collapse into one entry.
//!
//! # Example
//!
//! ```
//! use workshop_dl::input::parse_ids;
//!
//! let list = parse_ids("10 10\n20");
//! assert_eq!(list.len(), 2);
//! assert!(list.stopped_at.is_none());
//! ```

mod error;
mod ids;

pub use error::InputError;
pub use ids::{IdList, load_id_file, parse_ids};
