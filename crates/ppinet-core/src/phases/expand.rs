//! Intermediate-node expansion: discover connector genes that link the
//! selected set through the base edge table.
//!
//! Works on the raw table only, never on the live graph. Rows are reoriented
//! so the in-set endpoint is always on the left; the right endpoint is the
//! connector candidate.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::edge_table::{EdgeRecord, EdgeTable};

/// Result of an expansion pass: the connector edge rows to merge into the
/// working graph, plus the connector gene ids.
#[derive(Debug, Default)]
pub struct Expansion {
    pub rows: Vec<EdgeRecord>,
    pub connectors: BTreeSet<String>,
}

impl Expansion {
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

/// Find connector nodes with strictly more than `min_connections` edges into
/// `node_set`.
///
/// With `dedup` enabled, connectors sharing an identical connection
/// signature (the set of in-set neighbours they reach) collapse to a single
/// representative: the lexicographically smallest connector id.
pub fn expand(
    table: &EdgeTable,
    node_set: &BTreeSet<String>,
    min_connections: usize,
    dedup: bool,
) -> Expansion {
    // Reorient rows so the left endpoint is the in-set one; drop rows that
    // touch the set on neither side or on both (both-in rows are already
    // part of the working subgraph and name no connector).
    let mut oriented: Vec<EdgeRecord> = Vec::new();
    for row in table.rows() {
        let src_in = node_set.contains(&row.source);
        let tgt_in = node_set.contains(&row.target);
        match (src_in, tgt_in) {
            (true, false) => oriented.push(row.clone()),
            (false, true) => {
                let mut flipped = row.clone();
                std::mem::swap(&mut flipped.source, &mut flipped.target);
                oriented.push(flipped);
            }
            _ => {}
        }
    }

    // Count distinct edges per connector candidate (the right endpoint).
    let mut edge_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &oriented {
        *edge_counts.entry(row.target.as_str()).or_insert(0) += 1;
    }

    // strict threshold: exactly min_connections edges is not enough
    let retained: BTreeSet<String> = edge_counts
        .iter()
        .filter(|(_, &count)| count > min_connections)
        .map(|(id, _)| id.to_string())
        .collect();

    let mut rows: Vec<EdgeRecord> = oriented
        .into_iter()
        .filter(|row| retained.contains(&row.target))
        .collect();
    let mut connectors = retained;

    if dedup {
        let survivors = dedup_connectors(&rows);
        rows.retain(|row| survivors.contains(&row.target));
        connectors = survivors;
    }

    Expansion { rows, connectors }
}

/// Group connectors by connection signature and keep one representative per
/// group. Signature = sorted distinct in-set neighbours, joined canonically.
fn dedup_connectors(rows: &[EdgeRecord]) -> BTreeSet<String> {
    let mut signatures: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for row in rows {
        signatures
            .entry(row.target.as_str())
            .or_default()
            .insert(row.source.as_str());
    }

    // BTreeMap iteration is id-sorted, so the first connector seen for a
    // signature is the lexicographically smallest one.
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut survivors = BTreeSet::new();
    for (connector, neighbours) in signatures {
        let signature = neighbours.into_iter().collect::<Vec<_>>().join("|");
        if seen.insert(signature) {
            survivors.insert(connector.to_string());
        }
    }
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(a: &str, b: &str) -> EdgeRecord {
        EdgeRecord {
            source: a.to_string(),
            target: b.to_string(),
            attributes: BTreeMap::new(),
            support: 1,
        }
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn connectors(e: &Expansion) -> Vec<&str> {
        e.connectors.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn threshold_is_strict() {
        // X has 3 edges into the set, Y has exactly 2
        let table = EdgeTable::from_rows(vec![
            record("A", "X"),
            record("B", "X"),
            record("C", "X"),
            record("A", "Y"),
            record("B", "Y"),
        ]);
        let expansion = expand(&table, &set(&["A", "B", "C"]), 2, false);
        assert_eq!(connectors(&expansion), vec!["X"]);
        assert_eq!(expansion.rows.len(), 3);
    }

    #[test]
    fn rows_are_reoriented() {
        // both orientations of set-member vs connector in the raw table
        let table = EdgeTable::from_rows(vec![record("A", "X"), record("X", "B")]);
        let expansion = expand(&table, &set(&["A", "B"]), 1, false);
        assert_eq!(connectors(&expansion), vec!["X"]);
        for row in &expansion.rows {
            assert_eq!(row.target, "X");
            assert!(["A", "B"].contains(&row.source.as_str()));
        }
    }

    #[test]
    fn rows_outside_the_set_are_ignored() {
        let table = EdgeTable::from_rows(vec![
            record("P", "Q"),
            record("P", "X"),
            record("A", "X"),
            record("B", "X"),
        ]);
        let expansion = expand(&table, &set(&["A", "B"]), 1, false);
        assert_eq!(connectors(&expansion), vec!["X"]);
        // only the two in-set edges survive
        assert_eq!(expansion.rows.len(), 2);
    }

    #[test]
    fn both_in_set_rows_name_no_connector() {
        let table = EdgeTable::from_rows(vec![
            record("A", "B"),
            record("A", "B"),
            record("A", "B"),
        ]);
        let expansion = expand(&table, &set(&["A", "B"]), 0, false);
        assert!(expansion.is_empty());
    }

    #[test]
    fn dedup_keeps_lexicographically_smallest() {
        // X and W share the signature {A, B}; W sorts first
        let table = EdgeTable::from_rows(vec![
            record("A", "X"),
            record("B", "X"),
            record("A", "W"),
            record("B", "W"),
            record("A", "Z"),
            record("C", "Z"),
        ]);
        let expansion = expand(&table, &set(&["A", "B", "C"]), 1, true);
        assert_eq!(connectors(&expansion), vec!["W", "Z"]);
        assert!(expansion.rows.iter().all(|r| r.target != "X"));
    }

    #[test]
    fn dedup_disabled_keeps_duplicates() {
        let table = EdgeTable::from_rows(vec![
            record("A", "X"),
            record("B", "X"),
            record("A", "W"),
            record("B", "W"),
        ]);
        let expansion = expand(&table, &set(&["A", "B"]), 1, false);
        assert_eq!(connectors(&expansion), vec!["W", "X"]);
    }

    #[test]
    fn zero_survivors_is_empty_expansion() {
        let table = EdgeTable::from_rows(vec![record("A", "X")]);
        let expansion = expand(&table, &set(&["A"]), 5, false);
        assert!(expansion.is_empty());
        assert!(expansion.rows.is_empty());
    }
}
