//! Approximate matching over the trie.
//!
//! Implements the column-wise dynamic-programming search of Shang &
//! Merrett ("Tries for Approximate String Matching", IEEE TKDE 8(4),
//! 1996): one DP column per trie depth, computed when the walk descends
//! into a key node and reused across every sibling branch that shares the
//! prefix. Each column keeps a band `[cb, ce]` of rows still within the
//! cutoff; when a freshly computed column has an empty band, no word below
//! that node can match and the whole subtree is skipped.
//!
//! Distances are restricted Damerau-Levenshtein: unit-cost insertion,
//! deletion, substitution, and adjacent transposition.

use crate::trie::{Node, NodeId, Trie};

/// Sentinel for rows outside the band. Large enough that no real distance
/// reaches it, small enough that adding edit costs cannot wrap.
const INFINITY: u32 = u32::MAX / 2;

impl Trie {
    /// All stored words within edit distance `k` of `query`, in preorder
    /// (lexicographic) order.
    pub fn approximate_find(&self, query: &[char], k: u32) -> Vec<String> {
        Search::new(self, query, k, false).run()
    }

    /// All stored words at the minimum edit distance from `query`, if that
    /// minimum is at most `k_max`; empty otherwise.
    ///
    /// `k_max` is a hard ceiling: with `k_max` of 0 only exact matches are
    /// ever reported.
    pub fn best_find(&self, query: &[char], k_max: u32) -> Vec<String> {
        Search::new(self, query, k_max, true).run()
    }
}

/// One in-progress search: the DFS position plus the per-depth DP state.
struct Search<'a> {
    trie: &'a Trie,
    query: &'a [char],
    /// Current cutoff. Fixed in plain mode; tightened to each new best
    /// distance in best mode.
    k: u32,
    best: bool,
    /// `columns[i][j]` = edit distance between the length-`j` query prefix
    /// and the length-`i` candidate prefix on the current descent path.
    columns: Vec<Vec<u32>>,
    /// Leftmost row of each column with a value within the cutoff.
    cb: Vec<usize>,
    /// Rightmost such row; `None` when the whole column is out of reach.
    ce: Vec<Option<usize>>,
    /// Labels on the current descent path.
    prefix: Vec<char>,
    matches: Vec<String>,
}

impl<'a> Search<'a> {
    fn new(trie: &'a Trie, query: &'a [char], k: u32, best: bool) -> Self {
        Search {
            trie,
            query,
            k,
            best,
            columns: Vec::with_capacity(query.len() + 1),
            cb: Vec::with_capacity(query.len() + 1),
            ce: Vec::with_capacity(query.len() + 1),
            prefix: Vec::new(),
            matches: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<String> {
        let first = match self.trie.root_id() {
            Some(id) => id,
            None => return self.matches,
        };
        self.init_column();
        let mut next = Some(first);
        while let Some(id) = next {
            self.visit(id, 1);
            next = self.trie.node(id).next();
        }
        self.matches
    }

    /// Visit one node at the given trie depth, descending into its
    /// children unless the subtree is pruned.
    fn visit(&mut self, id: NodeId, depth: usize) {
        match self.trie.node(id) {
            Node::Value { .. } => {
                // the word ends at this node's parent key, whose column is
                // the one at depth - 1
                let d = self.columns[depth - 1][self.query.len()];
                if d <= self.k {
                    if self.best && d < self.k {
                        self.k = d;
                        self.matches.clear();
                    }
                    self.matches.push(self.prefix.iter().collect());
                }
            }
            Node::Key { label, child, .. } => {
                let prev_label = self.prefix.last().copied();
                self.fill_column(depth, label, prev_label);
                if self.ce[depth].is_none() {
                    // no row within the cutoff: every extension of this
                    // prefix is out of reach too
                    return;
                }
                self.prefix.push(label);
                let mut next = Some(child);
                while let Some(sibling) = next {
                    self.visit(sibling, depth + 1);
                    next = self.trie.node(sibling).next();
                }
                self.prefix.pop();
            }
        }
    }

    /// Column 0: distance of each query prefix to the empty candidate.
    fn init_column(&mut self) {
        let qlen = self.query.len();
        self.ensure_depth(0);
        let col = &mut self.columns[0];
        col.clear();
        col.resize(qlen + 1, INFINITY);
        let mac = (self.k as usize + 1).min(qlen);
        for (j, cell) in col.iter_mut().enumerate().take(mac + 1) {
            *cell = j as u32;
        }
        self.cb[0] = 0;
        self.ce[0] = Some((self.k as usize).min(qlen));
    }

    /// Compute column `i` (`i >= 1`) for a key labeled `label` whose path
    /// predecessor is `prev_label`, restricted to the rows reachable from
    /// the band of column `i - 1`.
    fn fill_column(&mut self, i: usize, label: char, prev_label: Option<char>) {
        debug_assert!(i >= 1);
        let qlen = self.query.len();
        let k = self.k;
        self.ensure_depth(i);

        let cb1 = self.cb[i - 1];
        let ce1 = match self.ce[i - 1] {
            Some(ce) => ce,
            None => {
                // parent column had nothing within the cutoff; nothing to
                // extend (the walk prunes before this can happen)
                let col = &mut self.columns[i];
                col.clear();
                col.resize(qlen + 1, INFINITY);
                self.cb[i] = 0;
                self.ce[i] = None;
                return;
            }
        };
        // band of column i - 2 bounds which rows of column i - 1 were ever
        // computed; rows outside it hold the infinity sentinel
        let (cb2, ce2) = if i >= 2 {
            (self.cb[i - 2], self.ce[i - 2].unwrap_or(0))
        } else {
            (0, k as usize)
        };

        let (before, rest) = self.columns.split_at_mut(i);
        let col = &mut rest[0];
        let prev_col = &before[i - 1];
        col.clear();
        col.resize(qlen + 1, INFINITY);

        let mac = (ce1 + 1).min(qlen);
        let mut cb_new = ce1 + 1;
        let mut ce_new = None;
        for j in cb1..=mac {
            let d = if j == 0 {
                i as u32
            } else {
                let sub = u32::from(self.query[j - 1] != label);
                let deletion = if j == cb1 {
                    INFINITY
                } else {
                    col[j - 1].saturating_add(1)
                };
                let insertion = if j > ce2 + 1 {
                    INFINITY
                } else {
                    prev_col[j].saturating_add(1)
                };
                let replace = if j <= cb2 {
                    INFINITY
                } else {
                    prev_col[j - 1].saturating_add(sub)
                };
                let mut d = deletion.min(insertion).min(replace);
                if i >= 2
                    && j >= 2
                    && self.query[j - 2] == label
                    && prev_label == Some(self.query[j - 1])
                {
                    d = d.min(before[i - 2][j - 2].saturating_add(1));
                }
                d
            };
            col[j] = d;
            if d <= k {
                if ce_new.is_none() {
                    cb_new = j;
                }
                ce_new = Some(j);
            }
        }
        self.cb[i] = cb_new;
        self.ce[i] = ce_new;
    }

    fn ensure_depth(&mut self, i: usize) {
        while self.columns.len() <= i {
            self.columns.push(Vec::new());
            self.cb.push(0);
            self.ce.push(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn build(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for w in words {
            trie.insert(&chars(w));
        }
        trie
    }

    fn find(trie: &Trie, query: &str, k: u32) -> Vec<String> {
        trie.approximate_find(&chars(query), k)
    }

    #[test]
    fn test_exact_word_found_at_zero() {
        let trie = build(&["dictionary"]);
        assert_eq!(find(&trie, "dictionary", 0), vec!["dictionary"]);
        assert_eq!(find(&trie, "dictionary", 1), vec!["dictionary"]);
    }

    #[test]
    fn test_empty_trie_finds_nothing() {
        let trie = Trie::new();
        assert!(find(&trie, "dictionary", 3).is_empty());
        assert!(trie.best_find(&chars("dictionary"), 6).is_empty());
    }

    #[test]
    fn test_substitution_within_one() {
        let trie = build(&["cat"]);
        assert_eq!(find(&trie, "bat", 1), vec!["cat"]);
        assert!(find(&trie, "big", 1).is_empty());
    }

    #[test]
    fn test_insertion_and_deletion() {
        let trie = build(&["cat", "cast"]);
        // "cats" -> "cat" deletes one, -> "cast" substitutes one
        assert_eq!(find(&trie, "cats", 1), vec!["cast", "cat"]);
        // "ct" -> "cat" inserts one
        assert!(find(&trie, "ct", 1).contains(&"cat".to_string()));
    }

    #[test]
    fn test_transposition_costs_one() {
        let trie = build(&["receive"]);
        assert_eq!(find(&trie, "recieve", 1), vec!["receive"]);
        assert!(find(&trie, "recieve", 0).is_empty());
    }

    #[test]
    fn test_transposition_at_word_start() {
        let trie = build(&["the"]);
        assert_eq!(find(&trie, "hte", 1), vec!["the"]);
    }

    #[test]
    fn test_neighborhood_of_tat() {
        let trie = build(&[
            "cat", "hat", "that", "bat", "tot", "spat", "tots", "tater", "ton", "gnat",
        ]);
        let mut found = find(&trie, "tat", 1);
        found.sort();
        assert_eq!(found, vec!["bat", "cat", "hat", "that", "tot"]);
    }

    #[test]
    fn test_results_in_preorder() {
        let trie = build(&["bat", "cat", "hat", "that", "tot"]);
        assert_eq!(find(&trie, "tat", 1), vec!["bat", "cat", "hat", "that", "tot"]);
    }

    #[test]
    fn test_nothing_within_tolerance() {
        let trie = build(&["cat", "hat", "that", "tot"]);
        assert!(find(&trie, "bad", 1).is_empty());
    }

    #[test]
    fn test_wider_tolerance_is_superset() {
        let trie = build(&["cat", "hat", "that", "bat", "tot", "spat", "tots"]);
        let near = find(&trie, "tat", 1);
        let far = find(&trie, "tat", 2);
        for w in &near {
            assert!(far.contains(w));
        }
        assert!(far.contains(&"spat".to_string()));
        assert!(far.contains(&"tots".to_string()));
    }

    #[test]
    fn test_short_query_long_words() {
        let trie = build(&["a", "ab", "abc", "abcd"]);
        let mut found = find(&trie, "a", 1);
        found.sort();
        assert_eq!(found, vec!["a", "ab"]);
    }

    #[test]
    fn test_best_find_returns_minimum_tier() {
        let trie = build(&["cat", "hat", "that", "tot", "catalog"]);
        let mut found = trie.best_find(&chars("bad"), 6);
        found.sort();
        // distance 2 is the closest tier: bad -> cat/hat via two edits,
        // while that/tot need three and catalog far more
        assert_eq!(found, vec!["cat", "hat"]);
    }

    #[test]
    fn test_best_find_respects_ceiling() {
        let trie = build(&["elephant"]);
        assert!(trie.best_find(&chars("cat"), 2).is_empty());
        assert_eq!(trie.best_find(&chars("cat"), 8), vec!["elephant"]);
    }

    #[test]
    fn test_best_find_zero_means_exact_only() {
        let trie = build(&["cat", "hat"]);
        assert_eq!(trie.best_find(&chars("cat"), 0), vec!["cat"]);
        assert!(trie.best_find(&chars("bat"), 0).is_empty());
    }

    #[test]
    fn test_best_find_discards_earlier_worse_matches() {
        // preorder meets the distance-2 word before the distance-1 word
        let trie = build(&["aqg", "dig"]);
        assert_eq!(trie.best_find(&chars("dog"), 6), vec!["dig"]);
    }

    #[test]
    fn test_query_shorter_than_tolerance() {
        let trie = build(&["to", "tot"]);
        let mut found = find(&trie, "t", 2);
        found.sort();
        assert_eq!(found, vec!["to", "tot"]);
    }
}
