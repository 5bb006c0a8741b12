use nyaya::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_word_hyphenated_across_lines_when_sanitizing_then_word_is_rejoined() {
    assert_eq!(
        sanitize_extracted_text("culpable homi-\ncide"),
        "culpable homicide"
    );
}

#[test]
fn given_runs_of_blank_lines_when_sanitizing_then_collapses_to_one_paragraph_break() {
    assert_eq!(
        sanitize_extracted_text("Chapter I\n\n\n\n  \nChapter II"),
        "Chapter I\n\nChapter II"
    );
}

#[test]
fn given_repeated_spaces_and_tabs_when_sanitizing_then_collapses_to_single_space() {
    assert_eq!(
        sanitize_extracted_text("Section   302\t\tMurder"),
        "Section 302 Murder"
    );
}

#[test]
fn given_ligatures_when_sanitizing_then_applies_nfkc() {
    assert_eq!(sanitize_extracted_text("ﬁne oﬃce"), "fine office");
}

#[test]
fn given_control_characters_when_sanitizing_then_they_are_removed() {
    assert_eq!(sanitize_extracted_text("Sec\u{0007}tion\u{0000} 1"), "Section 1");
}

#[test]
fn given_leading_and_trailing_blank_lines_when_sanitizing_then_they_are_dropped() {
    assert_eq!(sanitize_extracted_text("\n\n  Title  \n\n"), "Title");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(" \n\t\n "), "");
}
