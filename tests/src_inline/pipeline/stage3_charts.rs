use super::*;
use crate::input::fixtures::scenario_database;
use crate::pipeline::stage1_load::run_stage1;

fn scenario() -> Stage1Output {
    run_stage1(&scenario_database()).unwrap()
}

#[test]
fn test_pie_has_one_facet_per_redundancy_level() {
    let fig = make_genome_pie_chart(&scenario()).unwrap();
    assert_eq!(fig.data.len(), 4);
    assert_eq!(fig.config.display_mode_bar, Some(false));

    let Trace::Pie(organism) = &fig.data[0] else {
        panic!("expected pie");
    };
    assert_eq!(organism.name.as_deref(), Some("Organism [1]"));
    assert_eq!(organism.labels, vec!["ccyA+", "ccyA-"]);
    assert_eq!(organism.values, vec![1, 0]);

    let Trace::Pie(entries) = &fig.data[3] else {
        panic!("expected pie");
    };
    assert_eq!(entries.name.as_deref(), Some("Accession [2]"));
    assert_eq!(entries.values, vec![1, 1]);
    assert_eq!(fig.layout.annotations[3].text, "RedLevel=Accession [2]");
}

#[test]
fn test_genome_over_time_series_sorted_by_label() {
    let fig = make_genome_over_time_chart(&scenario()).unwrap();
    let names = fig.data.iter().filter_map(|t| t.name()).collect::<Vec<_>>();
    assert_eq!(names.len(), 4);
    assert!(names[0].starts_with("Assembly"));
    assert!(names[1].starts_with("Entry"));

    let Trace::Scatter(entry) = &fig.data[1] else {
        panic!("expected scatter");
    };
    assert_eq!(entry.x, vec![json!("2019-01-01"), json!("2020-06-01")]);
    assert_eq!(entry.y, vec![json!(1), json!(2)]);
    assert_eq!(
        fig.layout.title.as_ref().map(|t| t.text.as_str()),
        Some("Number of entry over time")
    );
}

#[test]
fn test_sequence_over_time_uses_nter_color() {
    let fig = make_sequence_over_time_chart(&scenario());
    assert_eq!(fig.data.len(), 1);
    let Trace::Scatter(s) = &fig.data[0] else {
        panic!("expected scatter");
    };
    assert_eq!(s.name.as_deref(), Some("Z-type, Calcyanin with known N-ter"));
    let line = s.line.as_ref().unwrap();
    assert_eq!(line.color.as_deref(), Some("#7ad5a3"));
    assert_eq!(line.dash.as_deref(), Some("solid"));
}

#[test]
fn test_hierarchy_sums_branch_values() {
    let counts = vec![
        CategoryCount {
            path: vec!["Z-type".into(), "f1".into(), "c1".into()],
            count: 2,
        },
        CategoryCount {
            path: vec!["Z-type".into(), "f1".into(), "c2".into()],
            count: 3,
        },
        CategoryCount {
            path: vec!["W-type".into(), "f2".into(), "c1".into()],
            count: 1,
        },
    ];
    let h = build_hierarchy(&counts);
    let value_of = |id: &str| {
        let idx = h.ids.iter().position(|i| i == id).unwrap();
        h.values[idx]
    };
    assert_eq!(value_of("Z-type"), 5);
    assert_eq!(value_of("Z-type/f1"), 5);
    assert_eq!(value_of("Z-type/f1/c2"), 3);
    assert_eq!(value_of("W-type"), 1);

    let idx = h.ids.iter().position(|i| i == "Z-type/f1/c1").unwrap();
    assert_eq!(h.parents[idx], "Z-type/f1");
    assert_eq!(h.labels[idx], "c1");
    assert_eq!(h.parents[0], "");

    let colors = h.marker.as_ref().and_then(|m| m.colors.clone()).unwrap();
    assert_eq!(colors[0], "#7ad5a3");
    let w = h.ids.iter().position(|i| i == "W-type").unwrap();
    assert_eq!(colors[w], crate::model::palette::DEFAULT_SEQUENCE[0]);
}

#[test]
fn test_hierarchy_ids_escape_slashes_in_labels() {
    let counts = vec![
        CategoryCount {
            path: vec!["Z-type".into(), "a/b".into(), "c".into()],
            count: 2,
        },
        CategoryCount {
            path: vec!["Z-type".into(), "a".into(), "b/c".into()],
            count: 3,
        },
    ];
    let h = build_hierarchy(&counts);
    assert_eq!(h.ids.len(), 5);
    let distinct = h.ids.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(distinct.len(), h.ids.len());

    let leaf = h.ids.iter().position(|i| i == "Z-type/a/b\\/c").unwrap();
    assert_eq!(h.values[leaf], 3);
    assert_eq!(h.labels[leaf], "b/c");
    assert_eq!(h.parents[leaf], "Z-type/a");
    let other = h.ids.iter().position(|i| i == "Z-type/a\\/b/c").unwrap();
    assert_eq!(h.values[other], 2);
    assert_eq!(h.parents[other], "Z-type/a\\/b");
}

#[test]
fn test_tree_layout_centres_parents() {
    let pos = tree_layout(11);
    // Leaves 7, 8, 9, 10, 5, 6 are spaced left to right.
    assert_eq!(pos[7].0, 0.0);
    assert_eq!(pos[10].0, 3.0);
    assert_eq!(pos[5].0, 4.0);
    assert_eq!(pos[6].0, 5.0);
    assert_eq!(pos[2].0, 4.5);
    assert_eq!(pos[0].0, 3.0);
    assert_eq!(pos[0].1, 6.0);
    assert_eq!(pos[7].1, 3.0);
    assert!(tree_layout(0).is_empty());
}

#[test]
fn test_decision_tree_edges_alternate() {
    let fig = make_decision_tree_chart(&LayoutProfile::default_v1());
    assert_eq!(fig.data.len(), 11);
    let colors = fig.data[..10]
        .iter()
        .map(|t| match t {
            Trace::Scatter(s) => s.line.as_ref().and_then(|l| l.color.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(colors[0].as_deref(), Some("#c6587e"));
    assert_eq!(colors[1].as_deref(), Some("#48d38b"));
    assert_eq!(colors[2].as_deref(), Some("#c6587e"));
    assert_eq!(fig.layout.height, Some(750));

    let Trace::Scatter(nodes) = &fig.data[10] else {
        panic!("expected scatter");
    };
    let text = nodes.text.as_ref().unwrap();
    assert!(text[5].as_str().unwrap().starts_with("<b>"));
    assert!(!text[4].as_str().unwrap().starts_with("<b>"));
}

#[test]
fn test_sunburst_and_treemap_depths() {
    let data = scenario();
    let Trace::Sunburst(sun) = &make_sunburst(&data).data[0] else {
        panic!("expected sunburst");
    };
    assert_eq!(sun.ids.len(), 4);
    assert_eq!(sun.ids[3], "Z-type/Calcyanin with known N-ter/Gly1|Gly2|Gly3/2020-06-01");
    let Trace::Treemap(tree) = &make_treemap(&data).data[0] else {
        panic!("expected treemap");
    };
    assert_eq!(tree.ids.len(), 3);
    assert_eq!(tree.branchvalues, "total");
}
