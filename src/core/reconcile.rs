// SkuFinder - core/reconcile.rs
//
// Left outer join of the old table onto the new table on
// `product code == sku` (exact, case-sensitive string equality).
//
// Output order: old rows in source order; each old row's matches appear
// contiguously, in new-table source order. Old rows without a match appear
// exactly once with `new = None`. Null keys never match.

use crate::core::model::{MergedRecord, MergedTable, NewTable, OldTable};
use std::collections::HashMap;

/// Join `old` onto `new`. Never drops an old row and never emits a new-only row.
pub fn reconcile(old: &OldTable, new: &NewTable) -> MergedTable {
    // sku -> positions in new.records, in source order.
    let mut by_sku: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, record) in new.records.iter().enumerate() {
        if let Some(sku) = record.sku.as_deref() {
            by_sku.entry(sku).or_default().push(pos);
        }
    }

    let mut records = Vec::with_capacity(old.records.len());
    let mut matched_old = 0usize;

    for old_record in &old.records {
        let matches = old_record
            .product_code
            .as_deref()
            .and_then(|code| by_sku.get(code));

        match matches {
            Some(positions) => {
                matched_old += 1;
                for &pos in positions {
                    records.push(MergedRecord {
                        old: old_record.clone(),
                        new: Some(new.records[pos].clone()),
                    });
                }
            }
            None => records.push(MergedRecord {
                old: old_record.clone(),
                new: None,
            }),
        }
    }

    tracing::info!(
        old_rows = old.records.len(),
        new_rows = new.records.len(),
        merged_rows = records.len(),
        matched_old,
        "Reconciliation complete"
    );

    MergedTable {
        old_extra_columns: old.extra_columns.clone(),
        new_extra_columns: new.extra_columns.clone(),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{NewRecord, OldRecord};

    fn old(code: Option<&str>, desc: &str) -> OldRecord {
        OldRecord {
            product_code: code.map(str::to_string),
            product_description: Some(desc.to_string()),
            extra: Vec::new(),
        }
    }

    fn new(sku: Option<&str>, name: &str) -> NewRecord {
        NewRecord {
            sku: sku.map(str::to_string),
            sku_name: Some(name.to_string()),
            extra: Vec::new(),
        }
    }

    fn tables(olds: Vec<OldRecord>, news: Vec<NewRecord>) -> (OldTable, NewTable) {
        (
            OldTable {
                extra_columns: Vec::new(),
                records: olds,
            },
            NewTable {
                extra_columns: Vec::new(),
                records: news,
            },
        )
    }

    #[test]
    fn test_unmatched_old_row_kept_once() {
        let (o, n) = tables(
            vec![old(Some("A1"), "Foo"), old(Some("B2"), "Baz")],
            vec![new(Some("A1"), "Foo New")],
        );
        let merged = reconcile(&o, &n);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.records[0].sku_name(), Some("Foo New"));
        assert_eq!(merged.records[1].product_code(), Some("B2"));
        assert!(merged.records[1].new.is_none());
        assert_eq!(merged.unmatched_count(), 1);
    }

    #[test]
    fn test_fan_out_preserves_order_and_contiguity() {
        let (o, n) = tables(
            vec![old(Some("C3"), "first"), old(Some("D4"), "second")],
            vec![
                new(Some("D4"), "d-one"),
                new(Some("C3"), "c-one"),
                new(Some("C3"), "c-two"),
            ],
        );
        let merged = reconcile(&o, &n);
        let pairs: Vec<_> = merged
            .records
            .iter()
            .map(|r| (r.product_code(), r.sku_name()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Some("C3"), Some("c-one")),
                (Some("C3"), Some("c-two")),
                (Some("D4"), Some("d-one")),
            ]
        );
    }

    #[test]
    fn test_key_match_is_case_sensitive() {
        let (o, n) = tables(vec![old(Some("abc"), "x")], vec![new(Some("ABC"), "y")]);
        let merged = reconcile(&o, &n);
        assert_eq!(merged.len(), 1);
        assert!(merged.records[0].new.is_none());
    }

    #[test]
    fn test_null_keys_never_match() {
        let (o, n) = tables(vec![old(None, "no code")], vec![new(None, "no sku")]);
        let merged = reconcile(&o, &n);
        assert_eq!(merged.len(), 1);
        assert!(merged.records[0].new.is_none());
    }

    #[test]
    fn test_new_only_rows_never_appear() {
        let (o, n) = tables(
            vec![old(Some("A1"), "Foo")],
            vec![new(Some("Z9"), "orphan"), new(Some("A1"), "Foo New")],
        );
        let merged = reconcile(&o, &n);
        assert_eq!(merged.len(), 1);
        assert!(merged
            .records
            .iter()
            .all(|r| r.old.product_code.as_deref() == Some("A1")));
    }

    #[test]
    fn test_every_old_row_represented() {
        let olds = vec![
            old(Some("A1"), "a"),
            old(Some("A1"), "a again"),
            old(Some("B2"), "b"),
            old(None, "blank"),
        ];
        let (o, n) = tables(
            olds.clone(),
            vec![new(Some("A1"), "x"), new(Some("A1"), "y")],
        );
        let merged = reconcile(&o, &n);
        for original in &olds {
            assert!(merged.records.iter().any(|r| &r.old == original));
        }
        assert_eq!(merged.len(), 6);
    }
}
