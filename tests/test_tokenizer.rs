use fixtures::*;

use pretty_assertions::assert_eq;
use stencil::{Error, Template};

fn parts(template: &Template) -> (Vec<&str>, Vec<&str>) {
    (template.fragments().collect(), template.tags().collect())
}

#[test]
fn empty_start_delimiter_is_rejected() {
    ensure_env_logger_initialized();
    let err = Template::parse("a{{b}}c", "", "}}").unwrap_err();
    assert!(matches!(err, Error::EmptyStartDelimiter));
}

#[test]
fn empty_end_delimiter_is_rejected() {
    ensure_env_logger_initialized();
    let err = Template::parse("a{{b}}c", "{{", "").unwrap_err();
    assert!(matches!(err, Error::EmptyEndDelimiter));
}

#[test]
fn template_without_tags_is_a_single_fragment() {
    ensure_env_logger_initialized();
    let template = Template::parse("no placeholders here", "{{", "}}").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["no placeholders here"]);
    assert!(tags.is_empty());
}

#[test]
fn fragments_interleave_tags() {
    ensure_env_logger_initialized();
    let template = Template::parse("a{{x}}b{{y}}c", "{{", "}}").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["a", "b", "c"]);
    assert_eq!(tags, vec!["x", "y"]);
    assert_eq!(fragments.len(), tags.len() + 1);
}

#[test]
fn leading_and_trailing_fragments_may_be_empty() {
    ensure_env_logger_initialized();
    let template = Template::parse("{{x}}", "{{", "}}").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["", ""]);
    assert_eq!(tags, vec!["x"]);
}

#[test]
fn tag_names_are_whitespace_trimmed() {
    ensure_env_logger_initialized();
    let template = Template::parse("a{{  padded \t}}b", "{{", "}}").unwrap();

    assert_eq!(template.tags().collect::<Vec<_>>(), vec!["padded"]);
}

#[test]
fn inner_start_markers_belong_to_the_tag() {
    ensure_env_logger_initialized();
    let template = Template::parse("{{a{{b}}", "{{", "}}").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["", ""]);
    assert_eq!(tags, vec!["a{{b"]);
}

#[test]
fn identical_delimiters_pair_up_alternating_occurrences() {
    ensure_env_logger_initialized();
    let template = Template::parse("a|b|c|d|e", "|", "|").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["a", "c", "e"]);
    assert_eq!(tags, vec!["b", "d"]);
}

#[test]
fn identical_delimiters_with_a_single_pair() {
    ensure_env_logger_initialized();
    let template = Template::parse("a|b|", "|", "|").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["a", ""]);
    assert_eq!(tags, vec!["b"]);
}

#[test]
fn unterminated_tag_fails_the_parse() {
    ensure_env_logger_initialized();
    let err = Template::parse("a{{b", "{{", "}}").unwrap_err();

    match err {
        Error::UnterminatedTag { delimiter, offset } => {
            assert_eq!(delimiter, "}}");
            assert_eq!(offset, 1);
        }
        other => panic!("expected UnterminatedTag, got {other:?}"),
    }
}

#[test]
fn unterminated_tag_with_identical_delimiters() {
    ensure_env_logger_initialized();
    let err = Template::parse("a|b", "|", "|").unwrap_err();
    assert!(matches!(err, Error::UnterminatedTag { .. }));
}

#[test]
fn multibyte_delimiters_and_tag_names() {
    ensure_env_logger_initialized();
    let template = Template::parse("ein «größe» test", "«", "»").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["ein ", " test"]);
    assert_eq!(tags, vec!["größe"]);
}

#[test]
fn reset_replaces_the_previous_shape() {
    ensure_env_logger_initialized();
    let mut template = Template::parse("a{{x}}b{{y}}c{{z}}d", "{{", "}}").unwrap();
    assert_eq!(template.tag_count(), 3);

    template.reset("[one] and [two]", "[", "]").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["", " and ", ""]);
    assert_eq!(tags, vec!["one", "two"]);
}

#[test]
fn reset_to_a_template_without_tags() {
    ensure_env_logger_initialized();
    let mut template = Template::parse("a{{x}}b", "{{", "}}").unwrap();

    template.reset("plain text", "{{", "}}").unwrap();

    let (fragments, tags) = parts(&template);
    assert_eq!(fragments, vec!["plain text"]);
    assert!(tags.is_empty());
}

#[test]
fn failed_reset_leaves_the_template_empty() {
    ensure_env_logger_initialized();
    let mut template = Template::parse("a{{x}}b", "{{", "}}").unwrap();

    let err = template.reset("broken{{tag", "{{", "}}").unwrap_err();
    assert!(matches!(err, Error::UnterminatedTag { .. }));
    assert_eq!(template.tag_count(), 0);
    assert_eq!(template.fragments().count(), 0);
}
