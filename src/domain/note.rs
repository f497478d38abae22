use crate::domain::media_link_from_frontmatter;
use anyhow::Result;
use regex::Regex;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

const FRONTMATTER_FENCE: &str = "---";
const TITLE_SUFFIX: &str = " - YouTube";

static ILLEGAL_TITLE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[:/\\^|#?*"<>]"#).expect("title pattern is valid"));

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]*)\)").expect("link pattern is valid"));

/// A markdown note as the host editor hands it over.
pub struct Note {
    pub path: PathBuf,
    pub frontmatter: HashMap<String, String>,
    pub lines: Vec<String>,
    dirty: bool,
}

impl Note {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)?;
        Ok(Self::from_text(path.as_ref().to_path_buf(), &text))
    }

    pub fn from_text(path: PathBuf, text: &str) -> Self {
        let lines = text.lines().map(str::to_string).collect::<Vec<_>>();
        let frontmatter = parse_frontmatter(&lines);

        Note {
            path,
            frontmatter,
            lines,
            dirty: false,
        }
    }

    pub fn media_link(&self) -> Option<&str> {
        media_link_from_frontmatter(&self.frontmatter)
    }

    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn body_start(&self) -> usize {
        match self.lines.first().map(String::as_str) {
            Some(FRONTMATTER_FENCE) => self
                .lines
                .iter()
                .skip(1)
                .position(|l| l == FRONTMATTER_FENCE)
                .map(|idx| idx + 2)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Insert text at the end of `line`, the way a cursor sitting there
    /// would receive it. Returns the line the cursor ends up on.
    pub fn insert_at(&mut self, line: usize, snippet: &str) -> usize {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let line = line.min(self.lines.len() - 1);

        let mut segments = snippet.split('\n');
        if let Some(first) = segments.next() {
            self.lines[line].push_str(first);
        }

        let mut cursor = line;
        for segment in segments {
            cursor += 1;
            self.lines.insert(cursor, segment.to_string());
        }

        self.dirty = true;
        cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<()> {
        if self.dirty {
            let mut text = self.lines.join("\n");
            text.push('\n');
            fs::write(&self.path, text)?;
            self.dirty = false;
        }
        Ok(())
    }
}

fn parse_frontmatter(lines: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if lines.first().map(String::as_str) != Some(FRONTMATTER_FENCE) {
        return map;
    }

    for line in lines.iter().skip(1) {
        if line == FRONTMATTER_FENCE {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    map
}

pub fn link_labels(line: &str) -> Vec<&str> {
    MARKDOWN_LINK
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// File-system friendly title for a note created from a video page.
pub fn make_note_title(page_title: &str) -> String {
    let title = page_title.strip_suffix(TITLE_SUFFIX).unwrap_or(page_title);
    format!("Video. {}", ILLEGAL_TITLE_CHARS.replace_all(title, "."))
}

pub fn new_note_content(link: &str) -> String {
    format!("---\nmedia_link: {link}\n---\n#Video")
}
