mod match_detail;
mod match_summary;

pub use match_detail::*;
pub use match_summary::*;
