use crate::matcher::Similarity;
use std::collections::HashMap;

/// Longest needle handled by the bit-parallel path
const BIT_PARALLEL_LIMIT: usize = 128;

/// Partial ratio similarity.
///
/// The shorter string is aligned with every window of equal length in the
/// longer string; each alignment is scored with the normalized indel
/// similarity `2 * LCS / (len_a + len_b)` and the best window wins. This
/// tolerates OCR noise inside a long document text without requiring the
/// whole text to resemble the needle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl PartialRatio {
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for PartialRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        if shorter.is_empty() {
            return 0;
        }

        let n = shorter.len();
        let best = if n <= BIT_PARALLEL_LIMIT {
            best_window_bit_parallel(&shorter, &longer)
        } else {
            best_window_dp(&shorter, &longer)
        };

        ((best as f64 * 100.0) / n as f64).round() as u8
    }
}

/// Best LCS of `needle` against any window of `hay` with the needle's length,
/// using the bit-vector LCS algorithm (Allison-Dix / Hyyrö).
fn best_window_bit_parallel(needle: &[char], hay: &[char]) -> usize {
    let n = needle.len();
    let mask = if n == BIT_PARALLEL_LIMIT {
        u128::MAX
    } else {
        (1u128 << n) - 1
    };

    let mut pattern: HashMap<char, u128> = HashMap::new();
    for (i, c) in needle.iter().enumerate() {
        *pattern.entry(*c).or_insert(0) |= 1u128 << i;
    }
    let columns: Vec<u128> = hay
        .iter()
        .map(|c| pattern.get(c).copied().unwrap_or(0))
        .collect();

    let mut best = 0;
    for window in columns.windows(n) {
        let mut v = u128::MAX;
        for &m in window {
            let u = v & m;
            v = v.wrapping_add(u) | (v - u);
        }
        let lcs = (!v & mask).count_ones() as usize;
        if lcs > best {
            best = lcs;
            if best == n {
                break;
            }
        }
    }
    best
}

fn best_window_dp(needle: &[char], hay: &[char]) -> usize {
    let n = needle.len();
    let mut best = 0;
    for window in hay.windows(n) {
        let lcs = lcs_len(needle, window);
        if lcs > best {
            best = lcs;
            if best == n {
                break;
            }
        }
    }
    best
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
