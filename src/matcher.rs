//! Resolving raw user input against a set of legal values.
//!
//! [`suggest`] is a pure function: exact (case-insensitive) membership first,
//! then the single closest option by Ratcliff/Obershelp similarity. Deciding
//! whether to accept a close match is left to the caller.

use std::collections::HashMap;

/// Minimum similarity for a close match to be offered.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// The input names an option, possibly in different case.
    Exact(String),
    /// No exact hit; `value` is the closest option at or above the cutoff.
    Close { value: String, score: f64 },
    /// Nothing matched closely enough.
    None,
}

impl Suggestion {
    /// The suggested option, whatever its kind.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Exact(value) | Self::Close { value, .. } => Some(value),
            Self::None => None,
        }
    }
}

/// Resolve `raw` against `options`.
pub fn suggest<S: AsRef<str>>(raw: &str, options: &[S], cutoff: f64) -> Suggestion {
    let raw = raw.trim();
    if raw.is_empty() {
        return Suggestion::None;
    }

    let wanted = raw.to_lowercase();
    let lowered: Vec<String> = options.iter().map(|o| o.as_ref().to_lowercase()).collect();

    if let Some(pos) = lowered.iter().position(|o| *o == wanted) {
        return Suggestion::Exact(options[pos].as_ref().to_string());
    }

    let mut best: Option<(f64, &str)> = None;
    for candidate in &lowered {
        let score = similarity(candidate, &wanted);
        if score < cutoff {
            continue;
        }
        let better = best.is_none_or(|(best_score, best_candidate)| {
            score > best_score || (score == best_score && candidate.as_str() > best_candidate)
        });
        if better {
            best = Some((score, candidate));
        }
    }

    match best {
        Some((score, candidate)) => {
            // First option whose lowercase form is the winning candidate.
            let pos = lowered.iter().position(|o| o == candidate).unwrap_or_default();
            Suggestion::Close {
                value: options[pos].as_ref().to_string(),
                score,
            }
        }
        None => Suggestion::None,
    }
}

/// Ratcliff/Obershelp similarity `2 * M / T`, where `M` is the number of
/// characters in matching blocks and `T` the total length of both strings.
///
/// Identical strings score 1.0; two empty strings also score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = SequenceMatcher::new(&a, &b).matching_characters();
    2.0 * matched as f64 / total as f64
}

struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b2j.entry(*ch).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest common block in `a[alo..ahi]` x `b[blo..bhi]` as `(i, j, size)`.
    /// Ties resolve to the earliest block in `a`, then in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|prev| j2len.get(&prev)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        (best_i, best_j, best_size)
    }

    fn matching_characters(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, size) = self.longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                queue.push((i + size, ahi, j + size, bhi));
            }
        }

        matched
    }
}
