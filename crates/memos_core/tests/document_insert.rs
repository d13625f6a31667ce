use memos_core::document::line::{escape_line_breaks, format_memo_line};
use memos_core::document::parse::parse_daily_note;
use memos_core::{insert_after, MemoType, ANCHOR_NOT_FOUND};
use chrono::NaiveDate;

#[test]
fn repeated_inserts_stack_below_anchor_section_content() {
    let first = insert_after("A", "X", "A\nB\n## H\nC");
    assert_eq!(first.position, 1);
    assert_eq!(first.content, "A\nB\nX\n## H\nC");

    let second = insert_after("A", "Y", &first.content);
    assert_eq!(second.position, 2);
    assert_eq!(second.content, "A\nB\nX\nY\n## H\nC");
}

#[test]
fn missing_anchor_appends_and_reports_not_found() {
    let inserted = insert_after("# Journal", "- 10:00:00 hi", "# Other\ntext");
    assert_eq!(inserted.position, ANCHOR_NOT_FOUND);
    assert_eq!(inserted.content, "# Other\ntext\n- 10:00:00 hi");
}

#[test]
fn anchor_with_regex_metacharacters_matches_literally() {
    let inserted = insert_after("## Log (daily)", "- new", "intro\n## Log (daily)\n- old\n# End");
    assert_eq!(inserted.position, 2);
    assert_eq!(inserted.content, "intro\n## Log (daily)\n- old\n- new\n# End");
}

#[test]
fn formatted_multiline_memo_parses_back_to_one_memo() {
    let at = NaiveDate::from_ymd_opt(2024, 7, 8)
        .unwrap()
        .and_hms_opt(11, 12, 13)
        .unwrap();
    let escaped = escape_line_breaks("first\nsecond");
    let line = format_memo_line(&escaped, true, &at, "");
    let inserted = insert_after("# Journal", &line, "# Journal\n");

    let memos = parse_daily_note(&inserted.content, at.date(), "2024-07-08.md");
    assert_eq!(memos.len(), 1);
    assert_eq!(memos[0].memo_type, MemoType::TaskTodo);
    assert_eq!(memos[0].content, "first<br>second");
    assert_eq!(memos[0].id, "202407081112132");
}
