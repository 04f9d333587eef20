use super::*;

#[test]
fn separator_width() {
    let s = separator(5);
    // Each ─ is 3 bytes in UTF-8
    assert_eq!(s.chars().count(), 5);
}

#[test]
fn score_bar_half() {
    assert_eq!(score_bar(0.5, 4), "██░░");
}

#[test]
fn score_bar_clamps() {
    assert_eq!(score_bar(-1.0, 3), "░░░");
    assert_eq!(score_bar(7.0, 3), "███");
}

#[test]
fn score_bar_nan_is_empty() {
    // NaN clamps to NaN; the cast saturates to 0.
    assert_eq!(score_bar(f64::NAN, 2).chars().count(), 2);
}

#[test]
fn print_json_stdout_works() {
    let data = vec![1, 2, 3];
    print_json_stdout(&data).unwrap();
}
