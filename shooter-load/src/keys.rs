//! Process key derivation
//!
//! Keys are pure functions of their inputs so the create and complete phases
//! derive identical strings for the same (i, j) pair.

use shooter_config::NamingScheme;
use shooter_http::Branch;

/// Key of the i-th main process: `M<i>`
pub fn main_key(index: u32) -> String {
    format!("M{}", index)
}

/// Key of the j-th subprocess under a main process
///
/// The split scheme distinguishes the subprocess class in the suffix
/// (`-SPS`/`-SPL`); the unified scheme uses `-SP` for both.
pub fn subprocess_key(main_key: &str, branch: Branch, index: u32, scheme: NamingScheme) -> String {
    match scheme {
        NamingScheme::Split => match branch {
            Branch::Short => format!("{}-SPS{}", main_key, index),
            Branch::Long => format!("{}-SPL{}", main_key, index),
        },
        NamingScheme::Unified => format!("{}-SP{}", main_key, index),
    }
}
