//! Ratcliff/Obershelp similarity ratio for normalized keys.

use std::collections::HashMap;

/// Sequences at least this long ignore elements that occur too often when seeding matches.
const POPULAR_MIN_LENGTH: usize = 200;

/// Similarity of two strings in the range `[0, 1]`.
///
/// Computed as `2 * M / T` where `T` is the combined length in characters
/// and `M` is the number of characters in the matching blocks
/// found by recursively taking the longest common substring.
/// Two empty strings are identical.
///
/// ```rust
/// use subtitle_rename::subtitle::similarity_ratio;
///
/// assert!((similarity_ratio("show s01e01 hi", "show s01e01") - 0.88).abs() < 1e-9);
/// assert!((similarity_ratio("abc", "abc") - 1.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn similarity_ratio(first: &str, second: &str) -> f64 {
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matching = BlockMatcher::new(&a, &b).matching_characters();
    2.0 * matching as f64 / total as f64
}

/// Longest common block matcher over two character sequences.
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Indices of each element in `b`, excluding popular elements.
    b2j: HashMap<char, Vec<usize>>,
}

/// A common block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    size: usize,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (index, element) in b.iter().enumerate() {
            b2j.entry(*element).or_default().push(index);
        }

        let n = b.len();
        if n >= POPULAR_MIN_LENGTH {
            let limit = n / 100 + 1;
            b2j.retain(|_, indices| indices.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks.
    fn matching_characters(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((a_low, a_high, b_low, b_high)) = queue.pop() {
            let block = self.find_longest_match(a_low, a_high, b_low, b_high);
            if block.size == 0 {
                continue;
            }
            total += block.size;
            if a_low < block.a_start && b_low < block.b_start {
                queue.push((a_low, block.a_start, b_low, block.b_start));
            }
            let a_end = block.a_start + block.size;
            let b_end = block.b_start + block.size;
            if a_end < a_high && b_end < b_high {
                queue.push((a_end, a_high, b_end, b_high));
            }
        }
        total
    }

    /// Find the longest block inside `a[a_low..a_high]` and `b[b_low..b_high]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(&self, a_low: usize, a_high: usize, b_low: usize, b_high: usize) -> Block {
        let mut best = Block {
            a_start: a_low,
            b_start: b_low,
            size: 0,
        };

        // Length of the match ending at each index of `b` for the previous row of `a`.
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in a_low..a_high {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < b_low {
                        continue;
                    }
                    if j >= b_high {
                        break;
                    }
                    let previous = j.checked_sub(1).and_then(|k| j2len.get(&k)).copied().unwrap_or(0);
                    let size = previous + 1;
                    next_j2len.insert(j, size);
                    if size > best.size {
                        best = Block {
                            a_start: i + 1 - size,
                            b_start: j + 1 - size,
                            size,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular elements are not in `b2j`, so grow the block over equal neighbours.
        while best.a_start > a_low && best.b_start > b_low && self.a[best.a_start - 1] == self.b[best.b_start - 1] {
            best.a_start -= 1;
            best.b_start -= 1;
            best.size += 1;
        }
        while best.a_start + best.size < a_high
            && best.b_start + best.size < b_high
            && self.a[best.a_start + best.size] == self.b[best.b_start + best.size]
        {
            best.size += 1;
        }

        best
    }
}
