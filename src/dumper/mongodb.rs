// databasedumper/src/dumper/mongodb.rs
use super::Dumper;
use super::command::{flag, quote, redirect_input, redirect_output};

// mongodump/mongorestore read the password from a YAML file given to --config.
fn prepare_credentials(credential_file: &str) -> String {
    if credential_file.is_empty() {
        String::new()
    } else {
        format!("--config={}", quote(credential_file))
    }
}

fn prepare_connection(dumper: &Dumper) -> String {
    let options = dumper.options();
    let uri = if options.uri.is_empty() {
        String::new()
    } else {
        format!("--uri={}", quote(&options.uri))
    };
    let auth_source = if options.auth_source.is_empty() {
        String::new()
    } else {
        format!("--authenticationDatabase {}", options.auth_source)
    };

    format!(
        "{} {} {} {} {}",
        uri,
        dumper.prepare_host(),
        dumper.prepare_port(),
        dumper.prepare_user_name(),
        auth_source,
    )
}

// mongodump handles compression itself; the archive goes to stdout.
fn prepare_archive(dumper: &Dumper) -> String {
    format!("--archive {}", flag(dumper.options().compress, "--gzip"))
}

pub(super) fn prepare_dump_command(dumper: &Dumper, credential_file: &str, destination_path: &str) -> String {
    let dump_command = format!(
        "{} {} {} {} {} {} {}",
        dumper.binary("mongodump"),
        prepare_credentials(credential_file),
        prepare_connection(dumper),
        dumper.prepare_database(),
        dumper.prepare_include_tables(),
        dumper.prepare_ignore_tables(),
        prepare_archive(dumper),
    );

    redirect_output(dump_command, None, destination_path)
}

pub(super) fn prepare_restore_command(dumper: &Dumper, credential_file: &str, file_path: &str) -> String {
    let db_name = &dumper.options().db_name;
    let namespace = if db_name.is_empty() {
        String::new()
    } else {
        format!("--nsInclude={}", quote(&format!("{}.*", db_name)))
    };

    let restore_command = format!(
        "{} {} {} {} {}",
        dumper.binary("mongorestore"),
        prepare_credentials(credential_file),
        prepare_connection(dumper),
        namespace,
        prepare_archive(dumper),
    );

    redirect_input(restore_command, None, file_path)
}
