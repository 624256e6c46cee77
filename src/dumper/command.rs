// databasedumper/src/dumper/command.rs

/// Collapses every run of whitespace to a single space and trims both ends.
///
/// Applied once to a fully assembled command, where absent fragments leave gaps.
pub fn remove_extra_spaces(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wraps a value in single quotes so the shell takes it literally.
///
/// An embedded `'` closes the quote, is escaped, and reopens it: `'\''`.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Leaves plain words such as paths untouched and [`quote`]s anything else.
pub fn shell_word(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@,=%".contains(c));
    if plain { value.to_string() } else { quote(value) }
}

/// Returns `fragment` when `enabled`, empty otherwise.
pub fn flag(enabled: bool, fragment: &str) -> String {
    if enabled { fragment.to_string() } else { String::new() }
}

/// Puts `flag` in front of a raw fragment, or nothing when the fragment is absent.
pub fn with_flag(flag: &str, fragment: String) -> String {
    if fragment.is_empty() { fragment } else { format!("{} {}", flag, fragment) }
}

/// Joins `values`, each prefixed by `prefix`, e.g. `-t a -t b`.
pub fn repeat_flag<S: AsRef<str>>(prefix: &str, values: &[S]) -> String {
    values
        .iter()
        .map(|value| format!("{}{}", prefix, value.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Appends the output redirection of a dump command.
///
/// Pipes through `compressor` first when one is given. An empty destination
/// leaves the dump on stdout.
pub fn redirect_output(command: String, compressor: Option<&str>, destination: &str) -> String {
    match (compressor, destination.is_empty()) {
        (Some(compressor), true) => format!("{} | {}", command, compressor),
        (Some(compressor), false) => format!("{} | {} > {}", command, compressor, quote(destination)),
        (None, true) => command,
        (None, false) => format!("{} > {}", command, quote(destination)),
    }
}

/// Feeds `source` into a restore command, through `decompressor` when one is given.
pub fn redirect_input(command: String, decompressor: Option<&str>, source: &str) -> String {
    match (decompressor, source.is_empty()) {
        (Some(decompressor), true) => format!("{} | {}", decompressor, command),
        (Some(decompressor), false) => format!("{} < {} | {}", decompressor, quote(source), command),
        (None, true) => command,
        (None, false) => format!("{} < {}", command, quote(source)),
    }
}
