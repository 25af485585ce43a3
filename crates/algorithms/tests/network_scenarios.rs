//! End-to-end scenarios over reference forests
//!
//! Two fixture networks drive these tests: an 18-row two-tree forest
//! (`simple_subcatchments`, columns Cu/Pb) and a 24-row single-column
//! forest with long ignored stretches (`complex_subcatchments`). Both
//! drain to the "Ocean" terminal sentinel.

use propagator_algorithms::prelude::*;

fn row(id: &str, ds: &str, cu: Option<&str>, pb: Option<&str>) -> Subcatchment {
    let mut record = Subcatchment::new(id, ds);
    record.set_value("Cu", cu.map_or(AttributeValue::Null, Into::into));
    record.set_value("Pb", pb.map_or(AttributeValue::Null, Into::into));
    record
}

fn cu_row(id: &str, ds: &str, cu: Option<&str>) -> Subcatchment {
    let mut record = Subcatchment::new(id, ds);
    record.set_value("Cu", cu.map_or(AttributeValue::Null, Into::into));
    record
}

fn simple_subcatchments() -> SubcatchmentTable {
    let rows = [
        row("A1", "Ocean", Some("A1_x"), Some("A1_y")),
        row("A2", "Ocean", Some("A2_x"), Some("A2_y")),
        row("B1", "A1", None, Some("B1_y")),
        row("B2", "A1", Some("B2_x"), None),
        row("B3", "A2", Some("B3_x"), Some("B3_y")),
        row("C1", "B2", Some("C1_x"), None),
        row("C2", "B3", None, None),
        row("C3", "B3", None, None),
        row("D1", "C1", None, None),
        row("D2", "C3", None, Some("D2_y")),
        row("E1", "D1", None, Some("E1_y")),
        row("E2", "D2", None, None),
        row("F1", "E1", Some("F1_x"), None),
        row("F2", "E1", None, None),
        row("F3", "E1", Some("F3_x"), None),
        row("G1", "F1", None, None),
        row("G2", "F3", None, None),
        row("H1", "G2", None, None),
    ];

    let mut table = SubcatchmentTable::new(["Cu", "Pb"]);
    for record in rows {
        table.push(record);
    }
    table
}

fn complex_subcatchments() -> SubcatchmentTable {
    let rows = [
        cu_row("A1", "Ocean", Some("A1Cu")),
        cu_row("A2", "Ocean", Some("A2Cu")),
        cu_row("B1", "A1", None),
        cu_row("B2", "A1", None),
        cu_row("B3", "A2", None),
        cu_row("C1", "B2", None),
        cu_row("D1", "C1", Some("D1Cu")),
        cu_row("C2", "B3", None),
        cu_row("C3", "B3", Some("C3Cu")),
        cu_row("D2", "C3", None),
        cu_row("E2", "D2", None),
        cu_row("E1", "D1", None),
        cu_row("F1", "E1", None),
        cu_row("F2", "E1", Some("F2Cu")),
        cu_row("F3", "E1", None),
        cu_row("G1", "F1", None),
        cu_row("G2", "F3", None),
        cu_row("H1", "F3", Some("H1Cu")),
        cu_row("I1", "H1", None),
        cu_row("J1", "I1", None),
        cu_row("J2", "I1", Some("J2Cu")),
        cu_row("K2", "J2", None),
        cu_row("K1", "J2", None),
        cu_row("L1", "K1", None),
    ];

    let mut table = SubcatchmentTable::new(["Cu"]);
    for record in rows {
        table.push(record);
    }
    table
}

/// The simple forest with the given ids deleted, as if edited by hand
fn doctor_subcatchments(table: &SubcatchmentTable, to_remove: &[&str]) -> SubcatchmentTable {
    table.filter(|r| !to_remove.contains(&r.id.as_str()))
}

fn ids(table: &SubcatchmentTable) -> Vec<&str> {
    table.iter().map(|r| r.id.as_str()).collect()
}

fn assert_column(table: &SubcatchmentTable, column: &str, expected: &[(&str, Option<&str>)]) {
    assert_eq!(table.len(), expected.len());
    for (id, want) in expected {
        let got = table.get(id).unwrap().value(column).unwrap();
        let want = want.map_or(AttributeValue::Null, Into::into);
        assert_eq!(got, &want, "column {} of {}", column, id);
    }
}

// ─── Upstream trace ─────────────────────────────────────────────────────

#[test]
fn trace_upstream_left_fork() {
    let upstream = trace_upstream(&simple_subcatchments(), "A1").unwrap();
    assert_eq!(
        ids(&upstream),
        ["B1", "B2", "C1", "D1", "E1", "F1", "F2", "F3", "G1", "G2", "H1"]
    );
}

#[test]
fn trace_upstream_right_fork() {
    let upstream = trace_upstream(&simple_subcatchments(), "A2").unwrap();
    assert_eq!(ids(&upstream), ["B3", "C2", "C3", "D2", "E2"]);
}

#[test]
fn trace_upstream_closure() {
    // The union of the start id and its upstream set is closed: every
    // member's downstream reference is in the union (the start's own
    // downstream being outside is what bounds the set).
    let table = simple_subcatchments();
    for start in ["A1", "A2", "B2", "E1"] {
        let upstream = trace_upstream(&table, start).unwrap();
        for record in upstream.iter() {
            assert!(
                record.downstream == start || upstream.contains_id(&record.downstream),
                "{} escapes the set traced from {}",
                record.id,
                start
            );
        }
    }
}

// ─── Boundary detection ─────────────────────────────────────────────────

#[test]
fn find_edges_selects_roots() {
    let edges = find_edges(&simple_subcatchments(), "Ocean");
    assert_eq!(ids(&edges), ["A1", "A2"]);
}

#[test]
fn find_tops_selects_headwaters() {
    let tops = find_tops(&simple_subcatchments());
    assert_eq!(ids(&tops), ["B1", "C2", "E2", "F2", "G1", "H1"]);
}

#[test]
fn edges_and_tops_are_disjoint() {
    let table = simple_subcatchments();
    let edges = find_edges(&table, "Ocean");
    let tops = find_tops(&table);
    for record in edges.iter() {
        assert!(!tops.contains_id(&record.id));
    }
}

// ─── Score propagation ──────────────────────────────────────────────────

#[test]
fn propagate_scores_complex_single_column() {
    let result = propagate_scores(&complex_subcatchments(), "Cu", &AttributeValue::Null).unwrap();
    assert_column(
        &result,
        "Cu",
        &[
            ("A1", Some("A1Cu")),
            ("A2", Some("A2Cu")),
            ("B1", Some("A1Cu")),
            ("B2", Some("A1Cu")),
            ("B3", Some("A2Cu")),
            ("C1", Some("A1Cu")),
            ("D1", Some("D1Cu")),
            ("C2", Some("A2Cu")),
            ("C3", Some("C3Cu")),
            ("D2", Some("C3Cu")),
            ("E2", Some("C3Cu")),
            ("E1", Some("D1Cu")),
            ("F1", Some("D1Cu")),
            ("F2", Some("F2Cu")),
            ("F3", Some("D1Cu")),
            ("G1", Some("D1Cu")),
            ("G2", Some("D1Cu")),
            ("H1", Some("H1Cu")),
            ("I1", Some("H1Cu")),
            ("J1", Some("H1Cu")),
            ("J2", Some("J2Cu")),
            ("K2", Some("J2Cu")),
            ("K1", Some("J2Cu")),
            ("L1", Some("J2Cu")),
        ],
    );
}

#[test]
fn propagate_scores_simple_two_columns() {
    let null = AttributeValue::Null;
    let result = propagate_scores(&simple_subcatchments(), "Pb", &null).unwrap();
    let result = propagate_scores(&result, "Cu", &null).unwrap();

    assert_column(
        &result,
        "Cu",
        &[
            ("A1", Some("A1_x")),
            ("A2", Some("A2_x")),
            ("B1", Some("A1_x")),
            ("B2", Some("B2_x")),
            ("B3", Some("B3_x")),
            ("C1", Some("C1_x")),
            ("C2", Some("B3_x")),
            ("C3", Some("B3_x")),
            ("D1", Some("C1_x")),
            ("D2", Some("B3_x")),
            ("E1", Some("C1_x")),
            ("E2", Some("B3_x")),
            ("F1", Some("F1_x")),
            ("F2", Some("C1_x")),
            ("F3", Some("F3_x")),
            ("G1", Some("F1_x")),
            ("G2", Some("F3_x")),
            ("H1", Some("F3_x")),
        ],
    );
    assert_column(
        &result,
        "Pb",
        &[
            ("A1", Some("A1_y")),
            ("A2", Some("A2_y")),
            ("B1", Some("B1_y")),
            ("B2", Some("A1_y")),
            ("B3", Some("B3_y")),
            ("C1", Some("A1_y")),
            ("C2", Some("B3_y")),
            ("C3", Some("B3_y")),
            ("D1", Some("A1_y")),
            ("D2", Some("D2_y")),
            ("E1", Some("E1_y")),
            ("E2", Some("D2_y")),
            ("F1", Some("E1_y")),
            ("F2", Some("E1_y")),
            ("F3", Some("E1_y")),
            ("G1", Some("E1_y")),
            ("G2", Some("E1_y")),
            ("H1", Some("E1_y")),
        ],
    );
}

#[test]
fn propagate_scores_columns_are_independent() {
    // Cu-then-Pb and Pb-then-Cu must agree cell for cell
    let null = AttributeValue::Null;
    let table = simple_subcatchments();

    let cu_first = propagate_scores(&table, "Cu", &null).unwrap();
    let cu_first = propagate_scores(&cu_first, "Pb", &null).unwrap();

    let pb_first = propagate_scores(&table, "Pb", &null).unwrap();
    let pb_first = propagate_scores(&pb_first, "Cu", &null).unwrap();

    for record in cu_first.iter() {
        let other = pb_first.get(&record.id).unwrap();
        assert_eq!(record.value("Cu"), other.value("Cu"));
        assert_eq!(record.value("Pb"), other.value("Pb"));
    }
}

#[test]
fn propagate_scores_is_row_order_independent() {
    let null = AttributeValue::Null;
    let table = complex_subcatchments();
    let straight = propagate_scores(&table, "Cu", &null).unwrap();

    let mut reversed = SubcatchmentTable::new(["Cu"]);
    let mut rows: Vec<Subcatchment> = table.iter().cloned().collect();
    rows.reverse();
    for record in rows {
        reversed.push(record);
    }
    let permuted = propagate_scores(&reversed, "Cu", &null).unwrap();

    for record in straight.iter() {
        assert_eq!(
            record.value("Cu"),
            permuted.get(&record.id).unwrap().value("Cu"),
            "resolved value of {} depends on row order",
            record.id
        );
    }
}

#[test]
fn nearest_downstream_value_skips_ignored_rows() {
    let table = simple_subcatchments();
    let index = NetworkIndex::build(&table);

    // G1 -> F1 (no Pb) -> E1 (Pb = E1_y)
    let found = nearest_downstream_value(&table, &index, "G1", "Pb", &AttributeValue::Null).unwrap();
    assert_eq!(found, Some(&AttributeValue::Text("E1_y".into())));
}

// ─── Orphan pruning and edge re-marking after removal ───────────────────

#[test]
fn remove_orphans_after_doctoring() {
    let doctored = doctor_subcatchments(&simple_subcatchments(), &["E1", "C3"]);
    let pruned = remove_orphan_subcatchments(&doctored, "Ocean").unwrap();

    // Every row whose only path to Ocean ran through E1 or C3 is gone
    assert_eq!(
        ids(&pruned),
        ["A1", "A2", "B1", "B2", "B3", "C1", "C2", "D1"]
    );

    // Survivors keep their attribute values untouched
    for record in pruned.iter() {
        let original = doctored.get(&record.id).unwrap();
        assert_eq!(record, original);
    }
}

#[test]
fn remove_orphans_is_a_fixpoint() {
    let doctored = doctor_subcatchments(&simple_subcatchments(), &["E1", "C3"]);
    let pruned = remove_orphan_subcatchments(&doctored, "Ocean").unwrap();
    let again = remove_orphan_subcatchments(&pruned, "Ocean").unwrap();
    assert_eq!(pruned, again);
}

#[test]
fn mark_edges_after_doctoring() {
    let doctored = doctor_subcatchments(&simple_subcatchments(), &["E1", "C3"]);
    let marked = mark_edges(&doctored, "EDGE");

    let expected = [
        ("A1", "EDGE"),
        ("A2", "EDGE"),
        ("B1", "A1"),
        ("B2", "A1"),
        ("B3", "A2"),
        ("C1", "B2"),
        ("C2", "B3"),
        ("D1", "C1"),
        ("D2", "EDGE"),
        ("E2", "D2"),
        ("F1", "EDGE"),
        ("F2", "EDGE"),
        ("F3", "EDGE"),
        ("G1", "F1"),
        ("G2", "F3"),
        ("H1", "G2"),
    ];

    assert_eq!(marked.len(), expected.len());
    for (id, downstream) in expected {
        assert_eq!(
            marked.get(id).unwrap().downstream,
            downstream,
            "downstream of {}",
            id
        );
    }
}

#[test]
fn mark_edges_is_idempotent() {
    let doctored = doctor_subcatchments(&simple_subcatchments(), &["E1", "C3"]);
    let once = mark_edges(&doctored, "EDGE");
    let twice = mark_edges(&once, "EDGE");
    assert_eq!(once, twice);
}

// ─── Error paths ────────────────────────────────────────────────────────

#[test]
fn propagate_missing_column_fails_fast() {
    let err =
        propagate_scores(&simple_subcatchments(), "Zn", &AttributeValue::Null).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { column } if column == "Zn"));
}

#[test]
fn trace_unknown_start_fails() {
    let err = trace_upstream(&simple_subcatchments(), "Z9").unwrap_err();
    assert!(matches!(err, Error::UnknownSubcatchment { id } if id == "Z9"));
}

#[test]
fn cyclic_chain_is_detected() {
    let mut table = SubcatchmentTable::new(["Cu"]);
    table.push(cu_row("A1", "C1", None));
    table.push(cu_row("B1", "A1", None));
    table.push(cu_row("C1", "B1", None));

    let err = propagate_scores(&table, "Cu", &AttributeValue::Null).unwrap_err();
    assert!(matches!(err, Error::CyclicStructure { .. }));
}
