use omnicmd::{get_options, split, to_command_line, OptionSpec, OptionSpecEntry, OptionValue};

fn spec(entries: Vec<(&str, OptionSpecEntry)>) -> OptionSpec {
    entries
        .into_iter()
        .map(|(name, entry)| (name.to_string(), entry))
        .collect()
}

#[test]
fn test_typed_line_to_parse_result() {
    let spec = spec(vec![
        ("all", OptionSpecEntry::boolean().with_aliases(["a"])),
        ("verbose", OptionSpecEntry::incremental().with_aliases(["v"])),
        ("tag", OptionSpecEntry::value().array().with_aliases(["t"])),
        ("title", OptionSpecEntry::value().with_default(OptionValue::Text(Some("untitled".into())))),
    ]);

    let words = split(r#"-v -a --tag "two words" -v -t=x notes.txt --unknown -- -a"#);
    let result = get_options(&spec, &words).unwrap();

    assert_eq!(result.options["all"], OptionValue::Flag(true));
    assert_eq!(result.options["verbose"], OptionValue::Count(2));
    assert_eq!(
        result.options["tag"],
        OptionValue::List(vec![Some("two words".into()), Some("x".into())])
    );
    assert_eq!(result.options["title"], OptionValue::Text(Some("untitled".into())));
    assert_eq!(result.positional_args, vec!["notes.txt", "--unknown", "-a"]);
}

#[test]
fn test_pending_value_swallows_unknown_option_word() {
    let spec = spec(vec![("expr", OptionSpecEntry::value().with_aliases(["e"]))]);
    let result = get_options(&spec, &split("-e -x+1 rest")).unwrap();
    assert_eq!(result.value("expr"), Some("-x+1"));
    assert_eq!(result.positional_args, vec!["rest"]);
}

#[test]
fn test_reconstructed_line_reparses_equivalently() {
    let spec = spec(vec![
        ("force", OptionSpecEntry::boolean()),
        ("depth", OptionSpecEntry::incremental()),
        ("name", OptionSpecEntry::value()),
        ("path", OptionSpecEntry::value().array()),
    ]);

    let original = get_options(
        &spec,
        &split(r#"--noforce -depth -depth --name "it's \"quoted\"" --path a --path --path '' -- --force x"#),
    )
    .unwrap();

    let line = to_command_line(&spec, &original);
    let reparsed = get_options(&spec, &split(&line)).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn test_split_examples() {
    assert!(split("").is_empty());
    assert_eq!(split("  one  two  "), vec!["one", "two"]);
    assert_eq!(split(r"this\ is\ all\ one\ word"), vec!["this is all one word"]);
    assert_eq!(split("All'part of one'word"), vec!["Allpart of oneword"]);
    assert_eq!(split("wo'rd testing 1 2 3' next"), vec!["word testing 1 2 3", "next"]);
}
