use super::*;

fn values(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[test]
fn test_fill_replaces_with_and_without_spaces() {
    let v = values(&[("css", "a{}"), ("js", "run();")]);
    let out = fill_template("<style>{{ css }}</style><script>{{js}}</script>", &v).unwrap();
    assert_eq!(out, "<style>a{}</style><script>run();</script>");
}

#[test]
fn test_fill_does_not_rescan_inserted_values() {
    let v = values(&[("datas", "{{ js }}")]);
    let out = fill_template("x={{ datas }}", &v).unwrap();
    assert_eq!(out, "x={{ js }}");
}

#[test]
fn test_unknown_slot_is_error() {
    let v = values(&[("css", "")]);
    let err = fill_template("{{ nope }}", &v).unwrap_err();
    assert!(matches!(err, ReportError::Template(msg) if msg.contains("nope")));
}

#[test]
fn test_known_slot_without_value_is_error() {
    let v = values(&[("nope", "x")]);
    let err = fill_template("{{ nope }}", &v).unwrap_err();
    assert!(matches!(err, ReportError::Template(msg) if msg.contains("unknown slot")));

    let v = values(&[("css", "")]);
    let err = fill_template("{{ treemap }}", &v).unwrap_err();
    assert!(matches!(err, ReportError::Template(msg) if msg.contains("has no value")));
}

#[test]
fn test_unterminated_placeholder_is_error() {
    let v = values(&[("css", "")]);
    assert!(fill_template("a {{ css", &v).is_err());
}

#[test]
fn test_unused_slots_are_ignored() {
    let v = values(&[("css", "x"), ("js", "y")]);
    assert_eq!(fill_template("plain", &v).unwrap(), "plain");
}

#[test]
fn test_slot_list_is_complete() {
    assert_eq!(SLOTS.len(), 15);
    assert!(SLOTS.contains(&"metrics_fig"));
    assert!(SLOTS.contains(&"unknown_oms"));
}

#[test]
fn test_shipped_template_references_every_slot() {
    let shipped = include_str!("../../../templates/template.html");
    for slot in SLOTS {
        assert!(template_mentions(shipped, slot), "missing slot {slot}");
    }
    let all = SLOTS.iter().map(|s| (*s, format!("[{s}]"))).collect::<BTreeMap<_, _>>();
    let out = fill_template(shipped, &all).unwrap();
    assert!(!out.contains("{{"));
    assert!(out.contains("var DATAS = [datas];"));
}
