// databasedumper/src/dumper/mod.rs
pub(crate) mod command;
mod mongodb;
mod mysql;
mod postgres;

use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::DumperOptions;
use crate::errors::{DumperError, Result};
use crate::utils::process::CommandRunner;
use command::{remove_extra_spaces, repeat_flag, shell_word};

/// The database engines a [`Dumper`] can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    MySql,
    PostgreSql,
    MongoDb,
}

impl Engine {
    /// Identity token of the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::MySql => "mysql",
            Engine::PostgreSql => "postgresql",
            Engine::MongoDb => "mongodb",
        }
    }

    pub fn from_url_scheme(scheme: &str) -> Result<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Engine::MySql),
            "postgres" | "postgresql" => Ok(Engine::PostgreSql),
            "mongodb" | "mongodb+srv" => Ok(Engine::MongoDb),
            _ => Err(DumperError::UnknownEngine(scheme.to_string())),
        }
    }

    pub fn dump_binary(&self) -> &'static str {
        match self {
            Engine::MySql => "mysqldump",
            Engine::PostgreSql => "pg_dump",
            Engine::MongoDb => "mongodump",
        }
    }

    pub fn restore_binary(&self) -> &'static str {
        match self {
            Engine::MySql => "mysql",
            Engine::PostgreSql => "psql",
            Engine::MongoDb => "mongorestore",
        }
    }

    /// File extension for an uncompressed dump.
    pub fn dump_extension(&self) -> &'static str {
        match self {
            Engine::MySql | Engine::PostgreSql => "sql",
            Engine::MongoDb => "archive",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = DumperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Engine::MySql),
            "postgresql" | "postgres" | "pgsql" => Ok(Engine::PostgreSql),
            "mongodb" | "mongo" => Ok(Engine::MongoDb),
            other => Err(DumperError::UnknownEngine(other.to_string())),
        }
    }
}

/// One backup or restore job: the options plus the engine they are rendered for.
#[derive(Debug, Clone)]
pub struct Dumper {
    engine: Engine,
    options: DumperOptions,
}

impl Dumper {
    pub fn new(engine: Engine, options: DumperOptions) -> Self {
        Dumper { engine, options }
    }

    pub fn mysql(options: DumperOptions) -> Self {
        Self::new(Engine::MySql, options)
    }

    pub fn postgres(options: DumperOptions) -> Self {
        Self::new(Engine::PostgreSql, options)
    }

    pub fn mongodb(options: DumperOptions) -> Self {
        Self::new(Engine::MongoDb, options)
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn options(&self) -> &DumperOptions {
        &self.options
    }

    pub fn name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn prepare_host(&self) -> String {
        let options = &self.options;
        match self.engine {
            Engine::PostgreSql if !options.socket.is_empty() => options.socket.clone(),
            Engine::PostgreSql => options.host.clone(),
            Engine::MongoDb if !options.host.is_empty() => format!("--host {}", options.host),
            Engine::MongoDb | Engine::MySql => String::new(),
        }
    }

    pub fn prepare_port(&self) -> String {
        let port = &self.options.port;
        match self.engine {
            _ if port.is_empty() => String::new(),
            Engine::PostgreSql => format!("-p {}", port),
            Engine::MongoDb => format!("--port {}", port),
            Engine::MySql => String::new(),
        }
    }

    pub fn prepare_socket(&self) -> String {
        let socket = &self.options.socket;
        match self.engine {
            Engine::MySql if !socket.is_empty() => format!("--socket={}", socket),
            Engine::MySql | Engine::PostgreSql | Engine::MongoDb => String::new(),
        }
    }

    pub fn prepare_database(&self) -> String {
        let db_name = &self.options.db_name;
        match self.engine {
            _ if db_name.is_empty() => String::new(),
            Engine::MySql | Engine::PostgreSql => db_name.clone(),
            Engine::MongoDb => format!("--db {}", db_name),
        }
    }

    pub fn prepare_user_name(&self) -> String {
        let username = &self.options.username;
        match self.engine {
            _ if username.is_empty() => String::new(),
            Engine::PostgreSql => username.clone(),
            Engine::MongoDb => format!("--username {}", username),
            Engine::MySql => String::new(),
        }
    }

    pub fn prepare_include_tables(&self) -> String {
        let tables = &self.options.tables;
        match self.engine {
            _ if tables.is_empty() => String::new(),
            Engine::MySql => format!("--tables {}", tables.join(" ")),
            Engine::PostgreSql => repeat_flag("-t ", tables),
            Engine::MongoDb => repeat_flag("--collection ", tables),
        }
    }

    pub fn prepare_ignore_tables(&self) -> String {
        let ignore_tables = &self.options.ignore_tables;
        match self.engine {
            Engine::MySql => {
                let prefix = format!("--ignore-table={}.", self.options.db_name);
                repeat_flag(&prefix, ignore_tables)
            }
            Engine::PostgreSql => repeat_flag("-T ", ignore_tables),
            Engine::MongoDb => repeat_flag("--excludeCollection=", ignore_tables),
        }
    }

    pub fn prepare_create_tables(&self) -> String {
        match self.engine {
            _ if self.options.create_tables => String::new(),
            Engine::MySql => "--no-create-info".to_string(),
            Engine::PostgreSql => "--data-only".to_string(),
            Engine::MongoDb => String::new(),
        }
    }

    /// Builds the dump command line.
    ///
    /// An empty `destination_path` falls back to the configured one. Missing
    /// options yield a shorter command, never an error; see [`Dumper::validate_for_dump`].
    pub fn get_dump_command(&self, credential_file: &str, destination_path: &str) -> String {
        let destination_path = if destination_path.is_empty() {
            self.options.destination_path.as_str()
        } else {
            destination_path
        };
        self.warn_if_degraded();

        let dump_command = match self.engine {
            Engine::MySql => mysql::prepare_dump_command(self, credential_file, destination_path),
            Engine::PostgreSql => postgres::prepare_dump_command(self, credential_file, destination_path),
            Engine::MongoDb => mongodb::prepare_dump_command(self, credential_file, destination_path),
        };

        remove_extra_spaces(&dump_command)
    }

    /// Builds the restore command line; an empty `file_path` falls back to `restore_path`.
    pub fn get_restore_command(&self, credential_file: &str, file_path: &str) -> String {
        let file_path = if file_path.is_empty() {
            self.options.restore_path.as_str()
        } else {
            file_path
        };
        self.warn_if_degraded();

        let restore_command = match self.engine {
            Engine::MySql => mysql::prepare_restore_command(self, credential_file, file_path),
            Engine::PostgreSql => postgres::prepare_restore_command(self, credential_file, file_path),
            Engine::MongoDb => mongodb::prepare_restore_command(self, credential_file, file_path),
        };

        remove_extra_spaces(&restore_command)
    }

    pub fn validate_for_dump(&self) -> Result<()> {
        self.validate_common()?;
        if self.options.destination_path.is_empty() {
            return Err(DumperError::ConfigurationGap { field: "destination_path" });
        }
        if self.engine == Engine::MongoDb && self.options.tables.len() > 1 {
            return Err(DumperError::InvalidOption(format!(
                "mongodump accepts a single collection, got {}",
                self.options.tables.len()
            )));
        }
        Ok(())
    }

    pub fn validate_for_restore(&self) -> Result<()> {
        self.validate_common()?;
        if self.options.restore_path.is_empty() {
            return Err(DumperError::ConfigurationGap { field: "restore_path" });
        }
        Ok(())
    }

    fn validate_common(&self) -> Result<()> {
        if self.missing_database() {
            return Err(DumperError::ConfigurationGap { field: "db_name" });
        }
        if self.engine == Engine::MongoDb
            && !self.options.uri.is_empty()
            && !(self.options.host.is_empty() && self.options.port.is_empty())
        {
            return Err(DumperError::InvalidOption(
                "uri cannot be combined with host or port".to_string(),
            ));
        }
        Ok(())
    }

    // A MongoDB uri may name the database itself.
    fn missing_database(&self) -> bool {
        self.options.db_name.is_empty() && !(self.engine == Engine::MongoDb && !self.options.uri.is_empty())
    }

    fn warn_if_degraded(&self) {
        if self.missing_database() {
            warn!("No db_name set for {} job; the generated command targets no database", self.engine);
        }
    }

    /// Hands a command to `runner` and applies the debug policy to the outcome.
    ///
    /// Launch failures always surface. Non-zero exits and timeouts only
    /// surface in debug mode and are logged otherwise.
    pub async fn run<R: CommandRunner>(&self, runner: &R, command: &str) -> Result<()> {
        debug!("Running {} command: {}", self.engine, command);
        let output = runner.execute(command, self.options.timeout()).await?;

        if output.timed_out {
            if self.options.debug {
                return Err(DumperError::Timeout { secs: self.options.timeout_secs });
            }
            warn!("{} command timed out after {} seconds", self.engine, self.options.timeout_secs);
            return Ok(());
        }

        if !output.success() {
            if self.options.debug {
                return Err(DumperError::CommandFailed {
                    exit_code: output.exit_code,
                    stderr: output.stderr.trim().to_string(),
                });
            }
            warn!(
                "{} command exited with {:?}: {}",
                self.engine,
                output.exit_code,
                output.stderr.trim()
            );
        }
        Ok(())
    }

    pub async fn dump<R: CommandRunner>(&self, runner: &R) -> Result<()> {
        self.validate_for_dump()?;
        let dump_command = self.get_dump_command(&self.options.credential_source, "");
        info!("Dumping {} database '{}' to {}", self.engine, self.options.db_name, self.options.destination_path);
        self.run(runner, &dump_command).await
    }

    pub async fn restore<R: CommandRunner>(&self, runner: &R) -> Result<()> {
        self.validate_for_restore()?;
        let restore_command = self.get_restore_command(&self.options.credential_source, "");
        info!("Restoring {} database '{}' from {}", self.engine, self.options.db_name, self.options.restore_path);
        self.run(runner, &restore_command).await
    }

    /// Location of a vendor binary, honoring `command_binary_path`.
    pub fn binary_path(&self, name: &str) -> PathBuf {
        if self.options.command_binary_path.is_empty() {
            PathBuf::from(name)
        } else {
            Path::new(&self.options.command_binary_path).join(name)
        }
    }

    /// Shell form of [`Dumper::binary_path`].
    pub fn binary(&self, name: &str) -> String {
        shell_word(&self.binary_path(name).display().to_string())
    }

    fn compressor(&self) -> Option<&str> {
        self.options.compress.then_some(self.options.compress_binary_path.as_str())
    }

    fn decompressor(&self) -> Option<&str> {
        self.options.compress.then_some(self.options.decompress_binary_path.as_str())
    }
}
