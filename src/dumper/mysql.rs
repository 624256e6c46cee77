// databasedumper/src/dumper/mysql.rs
use super::Dumper;
use super::command::{flag, quote, redirect_input, redirect_output};

fn prepare_credentials(credential_file: &str) -> String {
    if credential_file.is_empty() {
        String::new()
    } else {
        format!("--defaults-extra-file={}", quote(credential_file))
    }
}

fn prepare_character_set(dumper: &Dumper) -> String {
    let character_set = &dumper.options().default_character_set;
    if character_set.is_empty() {
        String::new()
    } else {
        format!("--default-character-set={}", character_set)
    }
}

/// `mysqldump <auth> <socket> <options> <tables> <ignore> <create> <db> > <dest>`
pub(super) fn prepare_dump_command(dumper: &Dumper, credential_file: &str, destination_path: &str) -> String {
    let options = dumper.options();
    let dump_command = format!(
        "{} {} {} {} {} {} {} {} {} {} {} {} {}",
        dumper.binary("mysqldump"),
        prepare_credentials(credential_file),
        dumper.prepare_socket(),
        flag(options.single_transaction, "--single-transaction"),
        flag(options.skip_lock_tables, "--skip-lock-tables"),
        flag(options.quick, "--quick"),
        flag(options.skip_comments, "--skip-comments"),
        flag(!options.use_extended_inserts, "--skip-extended-insert"),
        prepare_character_set(dumper),
        dumper.prepare_include_tables(),
        dumper.prepare_ignore_tables(),
        dumper.prepare_create_tables(),
        dumper.prepare_database(),
    );

    redirect_output(dump_command, dumper.compressor(), destination_path)
}

pub(super) fn prepare_restore_command(dumper: &Dumper, credential_file: &str, file_path: &str) -> String {
    let restore_command = format!(
        "{} {} {} {} {}",
        dumper.binary("mysql"),
        prepare_credentials(credential_file),
        dumper.prepare_socket(),
        prepare_character_set(dumper),
        dumper.prepare_database(),
    );

    redirect_input(restore_command, dumper.decompressor(), file_path)
}
