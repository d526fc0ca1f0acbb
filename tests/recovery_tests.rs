use std::io::{self, Read};

use jtoh::{project, Error, Selector};

fn transform(selector: &str, input: &str) -> String {
    let sel = Selector::parse(selector).expect("valid selector");
    let mut out = Vec::new();
    project(&sel, input.as_bytes(), &mut out).expect("projection failed");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn non_json_after_document_is_echoed() {
    let got = transform(":f", "{\"f\":\"stonks\"}\nnot json");
    assert_eq!(got, "stonks\nnot json\n");
}

#[test]
fn non_json_only_input_is_one_echo_line() {
    let got = transform(":f", "not json at all");
    assert_eq!(got, "not json at all\n");
}

#[test]
fn garbage_between_documents_keeps_input_order() {
    let got = transform(":a", "{\"a\":1}\ngarbage\n{\"a\":2}");
    assert_eq!(got, "1\ngarbage\n2\n");
}

#[test]
fn echoed_spans_keep_interior_whitespace() {
    let got = transform(":a", "{\"a\":1}\nbad  stuff here\n{\"a\":2}");
    assert_eq!(got, "1\nbad  stuff here\n2\n");
}

#[test]
fn bad_list_element_is_echoed_in_place() {
    let got = transform(":f", r#"[{"f":"a"},BAD,{"f":"b"}]"#);
    assert_eq!(got, "a\nBAD\nb\n");
}

#[test]
fn incomplete_document_at_eof_is_echoed() {
    let got = transform(":a", "{\"a\":1} {\"b\":");
    assert_eq!(got, "1\n{\"b\":\n");
}

#[test]
fn leading_whitespace_does_not_change_output() {
    let plain = transform(":f", "{\"f\":\"stonks\"}\nnot json");
    let padded = transform(":f", " \t\r\n {\"f\":\"stonks\"}\nnot json");
    assert_eq!(plain, padded);
}

#[test]
fn bytes_after_closing_bracket_are_left_unread() {
    let got = transform(":f", "[{\"f\":\"a\"}] trailing noise");
    assert_eq!(got, "a\n");
}

#[test]
fn whitespace_only_input_produces_no_output() {
    assert_eq!(transform(":f", "   \n\t "), "");
    assert_eq!(transform(":f", ""), "");
}

#[test]
fn empty_list_produces_no_output() {
    assert_eq!(transform(":f", "[]"), "");
    assert_eq!(transform(":f", " [ ] "), "");
}

// Seed corpus carried over from the original tool's fuzzing: none of these
// may panic or error, whatever they decode to.
#[test]
fn seed_corpus_never_panics() {
    let seeds: &[&str] = &[
        "string",
        " ",
        "{}",
        "[]",
        r#"{ "name": "value"}"#,
        r#"{ "name": 666}"#,
        r#"{ "name": true}"#,
        r#"[{ "name": "value"}]"#,
        r#"[{ "name": 666}]"#,
        r#"[{ "name": true}]"#,
        r#"[{ "name": "value"}, {"name":666}]"#,
        "{ \"name\": \"value\"}\n{\"name\":666}",
        "\nmsg\nmsg2\nmsg2\n",
        "[[[",
        "]]]",
        "[,,]",
        "{\"a\":",
        "\u{00e9}\u{00e9}\u{00e9}",
    ];
    for seed in seeds {
        let _ = transform(":selector", seed);
    }
}

#[test]
fn empty_object_documents_project_sentinels() {
    let got = transform(":name", "{}");
    assert_eq!(got, "<jtoh:missing field \"name\">\n");
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _out: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream torn down"))
    }
}

#[test]
fn read_errors_propagate() {
    let sel = Selector::parse(":f").unwrap();
    let mut out = Vec::new();
    let err = project(&sel, FailingReader, &mut out).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(out.is_empty(), "no partial output on an input that never produced bytes");
}

#[test]
fn mid_stream_read_errors_propagate() {
    let sel = Selector::parse(":f").unwrap();
    let input = io::Cursor::new(&b"{\"f\":\"ok\"}\n{\"f\":"[..]).chain(FailingReader);
    let mut out = Vec::new();
    let err = project(&sel, input, &mut out).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(String::from_utf8(out).unwrap(), "ok\n");
}
