//! Entity mention highlighting
//!
//! Finds non-overlapping, whole-word, case-insensitive mentions of known
//! world entities in narrative text and rebuilds the text as literal spans
//! interleaved with mentions. Pure and deterministic; recomputed per render.

use regex::Regex;

/// Category a world entity was pooled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Location,
    Npc,
    Shop,
    Item,
    Enemy,
}

/// A named entity known to the campaign world
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
}

/// One span of highlighted output
#[derive(Debug, Clone, PartialEq)]
pub enum TextSegment {
    /// Literal text between mentions
    Literal(String),
    /// A recognized entity mention; offsets are byte positions in the input
    Mention {
        start: usize,
        end: usize,
        entity: WorldEntity,
    },
}

/// Split `text` into literal spans and entity mentions
///
/// Longer entity names win over shorter ones that are substrings of them,
/// and overlapping matches keep only the earliest-starting accepted one.
pub fn highlight(text: &str, entities: &[WorldEntity]) -> Vec<TextSegment> {
    let mut pool: Vec<&WorldEntity> = entities
        .iter()
        .filter(|entity| !entity.name.trim().is_empty())
        .collect();
    pool.sort_by_key(|entity| std::cmp::Reverse(entity.name.len()));

    let mut matches: Vec<(usize, usize, &WorldEntity)> = Vec::new();
    for entity in pool {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&entity.name));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        for found in re.find_iter(text) {
            matches.push((found.start(), found.end(), entity));
        }
    }
    // Stable by start offset; equal starts keep the longer name first
    matches.sort_by_key(|(start, _, _)| *start);

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for (start, end, entity) in matches {
        if start < cursor {
            // overlaps an already-accepted mention
            continue;
        }
        if start > cursor {
            segments.push(TextSegment::Literal(text[cursor..start].to_string()));
        }
        segments.push(TextSegment::Mention {
            start,
            end,
            entity: entity.clone(),
        });
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(TextSegment::Literal(text[cursor..].to_string()));
    }
    segments
}
