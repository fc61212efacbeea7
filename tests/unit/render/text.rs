use super::*;

fn fixed(advance: f64) -> impl FnMut(&str) -> f64 {
    move |s: &str| s.chars().count() as f64 * advance
}

#[test]
fn wraps_at_character_granularity() {
    let lines = wrap_text("ABCDEFGHIJ", 76.0, fixed(10.0));
    assert_eq!(lines, vec!["ABCDEFG", "HIJ"]);
}

#[test]
fn empty_value_is_one_empty_line() {
    assert_eq!(wrap_text("", 50.0, fixed(10.0)), vec![String::new()]);
}

#[test]
fn paragraphs_wrap_independently_and_keep_empty_lines() {
    let lines = wrap_text("ABCDE\n\nXY", 30.0, fixed(10.0));
    assert_eq!(lines, vec!["ABC", "DE", "", "XY"]);

    let lines = wrap_text("A\n", 30.0, fixed(10.0));
    assert_eq!(lines, vec!["A", ""]);
}

#[test]
fn line_count_matches_ceiling_when_width_divides() {
    for n in 1..40usize {
        let text: String = std::iter::repeat_n('x', n).collect();
        let lines = wrap_text(&text, 50.0, fixed(10.0));
        assert_eq!(lines.len(), n.div_ceil(5), "n = {n}");
        assert!(lines.iter().all(|l| !l.is_empty()));
    }
}

#[test]
fn no_line_exceeds_width_except_lone_wide_glyph() {
    // 'W' is wider than the limit on its own.
    let mut measure = |s: &str| -> f64 { s.chars().map(|c| if c == 'W' { 90.0 } else { 10.0 }).sum() };
    let lines = wrap_text("abWcdefgW", 40.0, &mut measure);
    assert_eq!(lines, vec!["ab", "W", "cdef", "g", "W"]);
    for line in &lines {
        let w = measure(line);
        assert!(w <= 40.0 || line.chars().count() == 1, "{line:?} is {w}px");
    }
}

#[test]
fn wrapping_is_deterministic_and_lossless() {
    let text = "自己紹介カードを作りました。\n推しはぺこらです！よろしくお願いします";
    let a = wrap_text(text, 64.0, fixed(16.0));
    let b = wrap_text(text, 64.0, fixed(16.0));
    assert_eq!(a, b);
    assert_eq!(a.concat(), text.replace('\n', ""));
}

#[test]
fn measurement_errors_propagate() {
    let res: Result<Vec<String>, &str> =
        try_wrap_text("abc", 10.0, |s| if s.len() > 1 { Err("boom") } else { Ok(1.0) });
    assert_eq!(res, Err("boom"));
}

#[test]
fn positions_advance_by_line_height() {
    let lines = position_lines(vec!["a".into(), "b".into(), "c".into()], 36.0, 22.4);
    let ys: Vec<f64> = lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![36.0, 36.0 + 22.4, 36.0 + 2.0 * 22.4]);
}
