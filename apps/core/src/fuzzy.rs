//! Approximate substring matching.
//!
//! A pattern matches a text when some substring of the text is close to it in
//! Levenshtein distance (case-insensitive). The score of an alignment is
//! `edits / pattern_len + start / LOCATION_DISTANCE`, so weak matches far from
//! the start of the text are rejected. Lower is better, `0.0` is exact.

pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Characters of offset that cost one full unit of score.
pub const LOCATION_DISTANCE: f64 = 100.0;

const EPSILON: f64 = 1e-3;

pub struct WeightedKey<'a> {
    pub text: &'a str,
    pub weight: f64,
}

/// Edit count and start offset of the best alignment ending at a text position.
#[derive(Clone, Copy)]
struct Cell {
    edits: usize,
    start: usize,
}

impl Cell {
    fn step(self, extra: usize) -> Self {
        Self {
            edits: self.edits + extra,
            start: self.start,
        }
    }

    fn better(self, other: Self) -> Self {
        if (other.edits, other.start) < (self.edits, self.start) {
            other
        } else {
            self
        }
    }
}

/// Best score of `pattern` against any substring of `text`, or `None` if no
/// alignment scores within `threshold`.
pub fn match_score(pattern: &str, text: &str, threshold: f64) -> Option<f64> {
    let pattern: Vec<char> = pattern.chars().flat_map(char::to_lowercase).collect();
    if pattern.is_empty() {
        return None;
    }

    let len = pattern.len();
    let score_of =
        |cell: Cell| cell.edits as f64 / len as f64 + cell.start as f64 / LOCATION_DISTANCE;

    let mut column: Vec<Cell> = (0..=len).map(|edits| Cell { edits, start: 0 }).collect();
    let mut best: Option<f64> = None;

    for (index, text_char) in text.chars().flat_map(char::to_lowercase).enumerate() {
        // Row 0 is free: an alignment may begin right after any text character.
        let mut diagonal = column[0];
        column[0] = Cell {
            edits: 0,
            start: index + 1,
        };
        for row in 1..=len {
            let above = column[row];
            let cost = usize::from(pattern[row - 1] != text_char);
            let value = diagonal
                .step(cost)
                .better(above.step(1))
                .better(column[row - 1].step(1));
            diagonal = above;
            column[row] = value;
        }

        let score = score_of(column[len]);
        if score <= threshold && best.map_or(true, |b| score < b) {
            best = Some(score);
            if score == 0.0 {
                break;
            }
        }
    }

    best
}

/// Weighted relevance over several keys; lower is better.
///
/// An item matches when at least one key matches. Each matching key
/// contributes `score ^ weight`, so a strong match on a heavy key outranks the
/// same match on a light one.
pub fn weighted_score(pattern: &str, keys: &[WeightedKey<'_>], threshold: f64) -> Option<f64> {
    let mut total: Option<f64> = None;
    for key in keys {
        if let Some(score) = match_score(pattern, key.text, threshold) {
            let factor = score.max(EPSILON).powf(key.weight);
            total = Some(total.unwrap_or(1.0) * factor);
        }
    }
    total
}
