//! Degree-sequence statistics
//!
//! Every function here runs in polynomial time on the degree sequence alone.
//! They feed the search bounds and are exposed for callers who want the
//! statistics themselves.

/// The Havel–Hakimi process on a degree sequence.
///
/// Repeatedly removes the largest term `d` and subtracts one from the next `d`
/// terms, until the largest term is zero or too large to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HavelHakimi {
    process: Vec<Vec<i64>>,
    elimination: Vec<i64>,
}

impl HavelHakimi {
    pub fn new(sequence: &[usize]) -> Self {
        let mut current: Vec<i64> = sequence.iter().map(|&d| d as i64).collect();
        current.sort_unstable_by(|a, b| b.cmp(a));

        let mut process = vec![current.clone()];
        let mut elimination = Vec::new();

        while let Some(&largest) = current.first() {
            if largest <= 0 || largest as usize >= current.len() {
                break;
            }
            current.remove(0);
            for term in current.iter_mut().take(largest as usize) {
                *term -= 1;
            }
            current.sort_unstable_by(|a, b| b.cmp(a));
            process.push(current.clone());
            elimination.push(largest);
        }

        if current.iter().all(|&term| term == 0) {
            elimination.extend(current.iter().copied());
        }

        Self {
            process,
            elimination,
        }
    }

    pub fn process(&self) -> &[Vec<i64>] {
        &self.process
    }

    pub fn elimination_sequence(&self) -> &[i64] {
        &self.elimination
    }

    /// Whether the sequence is the degree sequence of some simple graph
    pub fn is_graphic(&self) -> bool {
        self.process
            .last()
            .is_some_and(|last| last.iter().all(|&term| term == 0))
    }

    /// Number of zeros left when the process stops; 0 for non-graphic input
    pub fn residue(&self) -> usize {
        match self.process.last() {
            Some(last) if self.is_graphic() => last.len(),
            _ => 0,
        }
    }

    /// `k` times the k-residue: the sum of `(k - i) * f(i)` over `i < k`,
    /// where `f(i)` counts `i` in the elimination sequence
    pub fn scaled_k_residue(&self, k: usize) -> usize {
        self.elimination
            .iter()
            .filter_map(|&term| usize::try_from(term).ok())
            .filter(|&term| term < k)
            .map(|term| k - term)
            .sum()
    }

    /// The k-residue; the 1-residue equals [`residue`](Self::residue) on
    /// graphic input. `k` must be positive.
    pub fn k_residue(&self, k: usize) -> f64 {
        debug_assert!(k >= 1, "k-residue needs a positive k");
        self.scaled_k_residue(k) as f64 / k as f64
    }
}

/// Degrees sorted in non-increasing order
pub fn sorted_descending(degrees: &[usize]) -> Vec<usize> {
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

/// Havel–Hakimi residue, a lower bound on the independence number
pub fn residue(degrees: &[usize]) -> usize {
    HavelHakimi::new(degrees).residue()
}

/// Largest `t` such that the `t` smallest degrees sum to at most `size`.
///
/// An upper bound on the independence number.
pub fn annihilation_number(degrees: &[usize], size: usize) -> usize {
    let mut ascending = degrees.to_vec();
    ascending.sort_unstable();

    let mut total = 0;
    let mut count = 0;
    for degree in ascending {
        total += degree;
        if total > size {
            break;
        }
        count += 1;
    }
    count
}

/// Smallest `i` with `i + (d_1 + .. + d_i) / k >= n` over the non-increasing
/// degree sequence. A lower bound on the k-domination number.
///
/// `k` must be positive.
pub fn sub_k_domination_number(degrees: &[usize], k: usize) -> usize {
    debug_assert!(k >= 1, "sub-k-domination needs a positive k");
    let n = degrees.len();
    let descending = sorted_descending(degrees);

    let mut prefix = 0;
    for i in 0..=n {
        if i * k + prefix >= n * k {
            return i;
        }
        prefix += descending[i];
    }
    n
}

/// The sub-k-domination number for `k = 1`
pub fn slater(degrees: &[usize]) -> usize {
    sub_k_domination_number(degrees, 1)
}

/// Smallest `i` whose `i` largest degrees sum to at least `n`.
///
/// A lower bound on the total domination number; `None` when no prefix
/// reaches `n`, which happens only when total domination is undefined.
pub fn sub_total_domination_number(degrees: &[usize]) -> Option<usize> {
    let n = degrees.len();
    let descending = sorted_descending(degrees);

    let mut prefix = 0;
    for i in 0..=n {
        if prefix >= n {
            return Some(i);
        }
        if i < n {
            prefix += descending[i];
        }
    }
    None
}
