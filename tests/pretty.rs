use colored::Colorize;
use ndjson_pretty::{builder, Pretty};

fn pretty() -> Pretty {
    builder().build()
}

#[test]
fn passes_through_lines_that_are_not_records() {
    let cases = [
        "not json at all",
        r#"{"v":2,"level":30,"msg":"hi"}"#,
        r#"{"level":30,"msg":"no version"}"#,
        "[1,2,3]",
        "null",
        "",
    ];

    for line in cases {
        assert_eq!(pretty().format(line), format!("{}\n", line));
    }
}

#[test]
fn passes_through_with_crlf_terminator() {
    let pretty = builder().crlf(true).build();
    assert_eq!(pretty.format("plain text"), "plain text\r\n");
}

#[test]
fn renders_the_default_header() {
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello","pid":1,"hostname":"h"}"#;
    assert_eq!(pretty().format(line), "[1500000000000] INFO (1 on h): hello\n");
}

#[test]
fn renders_the_identity_block_variants() {
    let line = r#"{"v":1,"level":30,"time":1,"name":"app","pid":42,"msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] INFO (app/42): x\n");

    let line = r#"{"v":1,"level":30,"time":1,"name":"app","msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] INFO (app): x\n");

    let line = r#"{"v":1,"level":30,"time":1,"hostname":"h","msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] INFO ( on h): x\n");

    let line = r#"{"v":1,"level":30,"time":1,"name":"app","pid":42,"hostname":"h","msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] INFO (app/42 on h): x\n");

    // no identity fields, no parenthesized block
    let line = r#"{"v":1,"level":30,"time":1,"msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] INFO: x\n");
}

#[test]
fn level_first_swaps_the_header_order() {
    let pretty = builder().level_first(true).build();
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello","pid":1,"hostname":"h"}"#;
    assert_eq!(pretty.format(line), "INFO [1500000000000] (1 on h): hello\n");
}

#[test]
fn unknown_levels_use_the_default_label() {
    let line = r#"{"v":1,"level":999,"time":1,"msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] USERLVL: x\n");

    let line = r#"{"v":1,"time":1,"msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] USERLVL: x\n");

    let line = r#"{"v":1,"level":"thirty","time":1,"msg":"x"}"#;
    assert_eq!(pretty().format(line), "[1] USERLVL: x\n");
}

#[test]
fn falsy_messages_keep_the_header_separator() {
    let line = r#"{"v":1,"level":30,"time":1}"#;
    assert_eq!(pretty().format(line), "[1] INFO: \n");

    let line = r#"{"v":1,"level":30,"time":1,"msg":""}"#;
    assert_eq!(pretty().format(line), "[1] INFO: \n");

    let line = r#"{"v":1,"level":30,"time":1,"msg":false}"#;
    assert_eq!(pretty().format(line), "[1] INFO: \n");
}

#[test]
fn non_string_messages_use_their_plain_text_form() {
    let line = r#"{"v":1,"level":30,"time":1,"msg":42}"#;
    assert_eq!(pretty().format(line), "[1] INFO: 42\n");
}

#[test]
fn flattens_remaining_fields_into_the_body() {
    let line = r#"{"v":1,"level":30,"time":1,"msg":"m","a":1,"b":{"c":"d"},"s":"text"}"#;
    let expected = concat!(
        "[1] INFO: m\n",
        "    a: 1\n",
        "    b: {\n",
        "      \"c\": \"d\"\n",
        "    }\n",
        "    s: \"text\"\n",
    );
    assert_eq!(pretty().format(line), expected);
}

#[test]
fn standard_keys_and_message_key_never_appear_in_the_body() {
    let line = r#"{"v":1,"level":30,"time":1,"pid":9,"hostname":"h","name":"n","msg":"m","extra":true}"#;
    assert_eq!(pretty().format(line), "[1] INFO (n/9 on h): m\n    extra: true\n");
}

#[test]
fn a_custom_message_key_frees_msg_for_the_body() {
    let pretty = builder().message_key("message").build();
    let line = r#"{"v":1,"level":30,"time":1,"message":"hi","msg":"ignored"}"#;
    assert_eq!(pretty.format(line), "[1] INFO: hi\n    msg: \"ignored\"\n");
}

#[test]
fn translates_time_with_the_default_pattern() {
    let pretty = builder().translate_time(true).build();
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello"}"#;
    assert_eq!(
        pretty.format(line),
        "[2017-07-14 02:40:00.000 +0000] INFO: hello\n",
    );
}

#[test]
fn translates_time_with_a_custom_pattern() {
    let pretty = builder()
        .translate_time(true)
        .date_format("%H:%M:%S")
        .build();
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello"}"#;
    assert_eq!(pretty.format(line), "[02:40:00] INFO: hello\n");
}

#[test]
fn a_malformed_pattern_falls_back_to_the_raw_timestamp() {
    let pretty = builder().translate_time(true).date_format("%!").build();
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello"}"#;
    assert_eq!(pretty.format(line), "[1500000000000] INFO: hello\n");
}

#[test]
fn a_non_numeric_timestamp_falls_back_to_its_raw_form() {
    let pretty = builder().translate_time(true).build();
    let line = r#"{"v":1,"level":30,"time":"yesterday","msg":"hello"}"#;
    assert_eq!(pretty.format(line), "[yesterday] INFO: hello\n");
}

#[test]
fn without_translation_the_timestamp_stays_raw() {
    let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello"}"#;
    assert_eq!(pretty().format(line), "[1500000000000] INFO: hello\n");
}

#[test]
fn crlf_terminates_every_output_line() {
    let pretty = builder().crlf(true).build();
    let line = r#"{"v":1,"level":30,"time":1,"msg":"m","a":1}"#;
    assert_eq!(pretty.format(line), "[1] INFO: m\r\n    a: 1\r\n");
}

#[test]
fn formatting_is_deterministic() {
    let pretty = pretty();
    let line = r#"{"v":1,"level":30,"time":1,"msg":"m","a":{"b":[1,2,3]}}"#;
    assert_eq!(pretty.format(line), pretty.format(line));
}

#[test]
fn colorize_paints_severity_and_message() {
    colored::control::set_override(true);
    let pretty = builder().colorize(true).build();

    let line = r#"{"v":1,"level":30,"time":1,"msg":"hello"}"#;
    let expected = format!("[1] {}: {}\n", "INFO".green(), "hello".cyan());
    assert_eq!(pretty.format(line), expected);

    let line = r#"{"v":1,"level":60,"time":1,"msg":"dead"}"#;
    let expected = format!("[1] {}: {}\n", "FATAL".on_red(), "dead".cyan());
    assert_eq!(pretty.format(line), expected);

    let line = r#"{"v":1,"level":999,"time":1,"msg":"odd"}"#;
    let expected = format!("[1] {}: {}\n", "USERLVL".white(), "odd".cyan());
    assert_eq!(pretty.format(line), expected);
}

#[test]
fn plain_output_contains_no_escape_sequences() {
    let line = r#"{"v":1,"level":60,"time":1,"msg":"dead"}"#;
    assert!(!pretty().format(line).contains('\u{1b}'));
}
