mod action;
mod media_link;
mod note;
mod resume;
mod timestamp;

pub use action::{Action, ActionKind, UnknownAction};
pub use media_link::{MediaLink, media_link_from_frontmatter};
pub use note::{Note, link_labels, make_note_title, new_note_content};
pub use resume::{ResumePosition, StartPosition};
pub use timestamp::{TIMESTAMP_PATTERN, format_timestamp, is_timestamp, parse_checked, parse_timestamp};
