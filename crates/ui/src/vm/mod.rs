mod archive_vm;
mod markdown_vm;
mod time_fmt;

pub use archive_vm::{ArchiveCardVm, map_archive_cards, score_class, score_comment};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use time_fmt::{format_clock, format_datetime};
