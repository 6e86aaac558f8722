use super::*;

#[test]
fn test_fixed_colors() {
    assert_eq!(nter_color(&NterType::Z), Some("#7ad5a3"));
    assert_eq!(nter_color(&NterType::Unknown), Some("#717171"));
    assert_eq!(nter_color(&NterType::Other("W-type".to_string())), None);
    assert_eq!(genotype_color(Genotype::Positive), "#88D9E6");
    assert_eq!(genotype_color(Genotype::Negative), "#D5D5D8");
}

#[test]
fn test_domain_line_style() {
    assert_eq!(
        domain_line_style("Gly2"),
        LineStyle {
            color: "#ec9d13",
            width: 3
        }
    );
    assert_eq!(domain_line_style("CoBaHMA-type").color, "#0babc1");
    assert_eq!(domain_line_style("B-pos"), DEFAULT_LINE);
    assert_eq!(domain_line_style(""), DEFAULT_LINE);
}

#[test]
fn test_color_assigner_is_stable_per_key() {
    let mut colors = ColorAssigner::default();
    let a = colors.color_for("a", None);
    let fixed = colors.color_for("Z-type", Some("#7ad5a3"));
    let b = colors.color_for("b", None);
    assert_eq!(a, DEFAULT_SEQUENCE[0]);
    assert_eq!(fixed, "#7ad5a3");
    assert_eq!(b, DEFAULT_SEQUENCE[1]);
    assert_eq!(colors.color_for("a", None), a);
}
