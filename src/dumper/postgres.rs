// databasedumper/src/dumper/postgres.rs
use super::Dumper;
use super::command::{flag, quote, redirect_input, redirect_output, with_flag};

// libpq reads the password file named by PGPASSFILE.
fn prepare_credentials(credential_file: &str) -> String {
    if credential_file.is_empty() {
        String::new()
    } else {
        format!("PGPASSFILE={}", quote(credential_file))
    }
}

fn prepare_connection(dumper: &Dumper) -> String {
    format!(
        "{} {} {}",
        with_flag("-U", dumper.prepare_user_name()),
        with_flag("-h", dumper.prepare_host()),
        dumper.prepare_port(),
    )
}

/// `pg_dump -U <user> -h <host> -p <port> <options> <tables> <ignore> <db> > <dest>`
pub(super) fn prepare_dump_command(dumper: &Dumper, credential_file: &str, destination_path: &str) -> String {
    let dump_command = format!(
        "{} {} {} {} {} {} {} {}",
        prepare_credentials(credential_file),
        dumper.binary("pg_dump"),
        prepare_connection(dumper),
        flag(dumper.options().use_inserts, "--column-inserts"),
        dumper.prepare_create_tables(),
        dumper.prepare_include_tables(),
        dumper.prepare_ignore_tables(),
        dumper.prepare_database(),
    );

    redirect_output(dump_command, dumper.compressor(), destination_path)
}

/// `psql -X -v ON_ERROR_STOP=1 -U <user> -h <host> -p <port> <db> < <file>`
///
/// `-X` skips the user's psqlrc. `ON_ERROR_STOP` makes psql exit non-zero at
/// the first failing statement.
pub(super) fn prepare_restore_command(dumper: &Dumper, credential_file: &str, file_path: &str) -> String {
    let restore_command = format!(
        "{} {} -X -v ON_ERROR_STOP=1 {} {}",
        prepare_credentials(credential_file),
        dumper.binary("psql"),
        prepare_connection(dumper),
        dumper.prepare_database(),
    );

    redirect_input(restore_command, dumper.decompressor(), file_path)
}

#[cfg(test)]
mod tests {
    use crate::config::DumperOptions;
    use crate::dumper::Dumper;

    fn shop() -> DumperOptions {
        DumperOptions {
            db_name: "shop".to_string(),
            username: "admin".to_string(),
            host: "db.internal".to_string(),
            port: "5432".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_dump_command() {
        let dumper = Dumper::postgres(DumperOptions {
            tables: vec!["orders".to_string(), "users".to_string()],
            ignore_tables: vec!["logs".to_string()],
            create_tables: false,
            use_inserts: true,
            ..shop()
        });
        assert_eq!(
            dumper.get_dump_command("/tmp/.pgpass", "/backups/shop.sql"),
            "PGPASSFILE='/tmp/.pgpass' pg_dump -U admin -h db.internal -p 5432 --column-inserts --data-only \
             -t orders -t users -T logs shop > '/backups/shop.sql'"
        );
    }

    #[test]
    fn test_socket_replaces_host() {
        let dumper = Dumper::postgres(DumperOptions {
            socket: "/var/run/postgresql".to_string(),
            ..shop()
        });
        assert_eq!(
            dumper.get_dump_command("", ""),
            "pg_dump -U admin -h /var/run/postgresql -p 5432 shop"
        );
    }

    #[test]
    fn test_compressed_restore_keeps_credentials_on_psql() {
        let dumper = Dumper::postgres(DumperOptions {
            compress: true,
            ..shop()
        });
        assert_eq!(
            dumper.get_restore_command("/tmp/.pgpass", "/backups/shop.sql.gz"),
            "gunzip < '/backups/shop.sql.gz' | PGPASSFILE='/tmp/.pgpass' psql -X -v ON_ERROR_STOP=1 \
             -U admin -h db.internal -p 5432 shop"
        );
    }

    #[test]
    fn test_restore_stops_on_first_error() {
        let command = Dumper::postgres(shop()).get_restore_command("", "/backups/shop.sql");
        assert_eq!(
            command,
            "psql -X -v ON_ERROR_STOP=1 -U admin -h db.internal -p 5432 shop < '/backups/shop.sql'"
        );
    }

    #[test]
    fn test_compressed_dump() {
        let dumper = Dumper::postgres(DumperOptions {
            compress: true,
            compress_binary_path: "pigz".to_string(),
            ..shop()
        });
        assert_eq!(
            dumper.get_dump_command("", "/backups/shop.sql.gz"),
            "pg_dump -U admin -h db.internal -p 5432 shop | pigz > '/backups/shop.sql.gz'"
        );
    }
}
