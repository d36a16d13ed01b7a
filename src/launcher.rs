//! Process launcher for the dashboard server
//!
//! Reads the listening port and protection flags from the environment and
//! hands the process over to the `dashboard` executable.

use std::num::ParseIntError;
use std::process::Command;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::DEFAULT_PORT;
use crate::utils::parse_bool;

/// Executable the launcher hands off to, resolved through `PATH`
pub const DASHBOARD_EXECUTABLE: &str = "dashboard";
/// Page config passed as the run target
pub const RUN_TARGET: &str = "app.json";
/// Listen on every interface so the container port is reachable
pub const BIND_ADDRESS: &str = "0.0.0.0";

pub const PORT_VAR: &str = "PORT";
pub const CORS_VAR: &str = "DASHBOARD_ENABLE_CORS";
pub const XSRF_VAR: &str = "DASHBOARD_ENABLE_XSRF_PROTECTION";

/// Launcher errors
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
    #[error("Invalid {var} value '{value}': expected true or false")]
    InvalidFlag { var: &'static str, value: String },
    #[error("Failed to launch {program}: {source}")]
    Exec {
        program: String,
        source: std::io::Error,
    },
}

/// Resolve the port; unset or empty means the default
pub fn parse_port(value: Option<&str>) -> Result<u16, LaunchError> {
    match value.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|source| LaunchError::InvalidPort {
            value: raw.to_string(),
            source,
        }),
    }
}

fn parse_flag(var: &'static str, value: Option<&str>) -> Result<bool, LaunchError> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some(raw) => parse_bool(raw).ok_or_else(|| LaunchError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Everything passed to the dashboard server on hand-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub port: u16,
    pub address: &'static str,
    pub enable_cors: bool,
    pub enable_xsrf_protection: bool,
}

impl LaunchConfig {
    pub fn from_env() -> Result<Self, LaunchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source.
    ///
    /// Both protections default to off, as the demo deployment expects. That
    /// is insecure; set the variables to `true` to turn them on.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LaunchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_port(lookup(PORT_VAR).as_deref())?;
        let enable_cors = parse_flag(CORS_VAR, lookup(CORS_VAR).as_deref())?;
        let enable_xsrf_protection = parse_flag(XSRF_VAR, lookup(XSRF_VAR).as_deref())?;

        Ok(Self {
            port,
            address: BIND_ADDRESS,
            enable_cors,
            enable_xsrf_protection,
        })
    }

    /// Arguments for the dashboard executable
    pub fn args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            RUN_TARGET.to_string(),
            "--server.port".to_string(),
            self.port.to_string(),
            "--server.address".to_string(),
            self.address.to_string(),
            "--server.enableCORS".to_string(),
            self.enable_cors.to_string(),
            "--server.enableXsrfProtection".to_string(),
            self.enable_xsrf_protection.to_string(),
        ]
    }

    pub fn command(&self, program: &str) -> Command {
        let mut command = Command::new(program);
        command.args(self.args());
        command
    }

    /// Replace this process with the dashboard server.
    ///
    /// Only returns if the hand-off failed; nothing after a successful call
    /// runs.
    pub fn exec(&self) -> LaunchError {
        self.exec_program(DASHBOARD_EXECUTABLE)
    }

    pub fn exec_program(&self, program: &str) -> LaunchError {
        info!("Starting dashboard on {}:{}...", self.address, self.port);
        if !self.enable_cors {
            warn!("{} is off: CORS protection disabled (insecure)", CORS_VAR);
        }
        if !self.enable_xsrf_protection {
            warn!("{} is off: XSRF protection disabled (insecure)", XSRF_VAR);
        }

        let source = hand_off(self.command(program));
        LaunchError::Exec {
            program: program.to_string(),
            source,
        }
    }
}

/// Hand off with a resolved config, or report why it could not be built.
///
/// Only returns on failure; the error is logged before it is returned.
pub fn launch(config: Result<LaunchConfig, LaunchError>) -> LaunchError {
    let err = match config {
        Ok(config) => config.exec(),
        Err(e) => e,
    };
    error!("{}", err);
    err
}

#[cfg(unix)]
fn hand_off(mut command: Command) -> std::io::Error {
    use std::os::unix::process::CommandExt;
    command.exec()
}

// No exec on this platform: run the server as a child and mirror its exit.
#[cfg(not(unix))]
fn hand_off(mut command: Command) -> std::io::Error {
    match command.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_port_defaults_when_unset_or_empty() {
        assert_eq!(parse_port(None).unwrap(), 8501);
        assert_eq!(parse_port(Some("")).unwrap(), 8501);
        assert_eq!(parse_port(Some("  ")).unwrap(), 8501);
    }

    #[test]
    fn test_port_from_value() {
        assert_eq!(parse_port(Some("9000")).unwrap(), 9000);
        assert_eq!(parse_port(Some(" 8080\n")).unwrap(), 8080);
    }

    #[test]
    fn test_invalid_port_is_fatal() {
        let err = parse_port(Some("abc")).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidPort { ref value, .. } if value == "abc"));
        assert!(err.to_string().contains("PORT"));

        assert!(parse_port(Some("70000")).is_err());
        assert!(parse_port(Some("-1")).is_err());
    }

    #[test]
    fn test_config_from_env_defaults() {
        let config = LaunchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config,
            LaunchConfig {
                port: 8501,
                address: "0.0.0.0",
                enable_cors: false,
                enable_xsrf_protection: false,
            }
        );
    }

    #[test]
    fn test_config_from_env_values() {
        let config = LaunchConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("DASHBOARD_ENABLE_CORS", "true"),
            ("DASHBOARD_ENABLE_XSRF_PROTECTION", "1"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.enable_cors);
        assert!(config.enable_xsrf_protection);
    }

    #[test]
    fn test_bad_port_fails_before_flags() {
        let result = LaunchConfig::from_lookup(lookup(&[("PORT", "abc"), ("DASHBOARD_ENABLE_CORS", "true")]));
        assert!(matches!(result, Err(LaunchError::InvalidPort { .. })));
    }

    #[test]
    fn test_launch_reports_bad_port_without_exec() {
        let err = launch(LaunchConfig::from_lookup(lookup(&[("PORT", "abc")])));
        assert!(matches!(err, LaunchError::InvalidPort { ref value, .. } if value == "abc"));
    }

    #[test]
    fn test_bad_flag_is_rejected() {
        let result = LaunchConfig::from_lookup(lookup(&[("DASHBOARD_ENABLE_CORS", "sometimes")]));
        assert!(matches!(
            result,
            Err(LaunchError::InvalidFlag { var: "DASHBOARD_ENABLE_CORS", .. })
        ));
    }

    #[test]
    fn test_args_follow_launch_contract() {
        let config = LaunchConfig::from_lookup(lookup(&[("PORT", "9000")])).unwrap();
        assert_eq!(
            config.args(),
            vec![
                "run",
                "app.json",
                "--server.port",
                "9000",
                "--server.address",
                "0.0.0.0",
                "--server.enableCORS",
                "false",
                "--server.enableXsrfProtection",
                "false",
            ]
        );
    }

    #[test]
    fn test_args_parse_as_dashboard_cli() {
        use crate::config::{Cli, Command};
        use clap::Parser;

        let config = LaunchConfig::from_lookup(lookup(&[("PORT", "9100"), ("DASHBOARD_ENABLE_CORS", "yes")])).unwrap();
        let argv = std::iter::once(DASHBOARD_EXECUTABLE.to_string()).chain(config.args());
        let Command::Run(args) = Cli::try_parse_from(argv).expect("dashboard accepts launcher args").command;

        assert_eq!(args.port, 9100);
        assert_eq!(args.socket_addr().to_string(), "0.0.0.0:9100");
        assert!(args.enable_cors);
        assert!(!args.enable_xsrf_protection);
    }

    #[test]
    fn test_command_program_and_args() {
        let config = LaunchConfig::from_lookup(lookup(&[])).unwrap();
        let command = config.command(DASHBOARD_EXECUTABLE);
        assert_eq!(command.get_program(), "dashboard");
        assert_eq!(command.get_args().count(), 10);
    }

    #[test]
    fn test_missing_executable_returns_error() {
        let config = LaunchConfig::from_lookup(lookup(&[])).unwrap();
        let err = config.exec_program("eks-demo-dashboard-no-such-binary");
        match err {
            LaunchError::Exec { program, source } => {
                assert_eq!(program, "eks-demo-dashboard-no-such-binary");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
