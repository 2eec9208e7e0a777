//! Interactive navigation harness over a [`MemoryHost`].
//!
//! # Responsibilities
//! - Parse one line of shell input into a [`ShellCommand`]
//! - Drive the host history and the dispatcher from those commands
//! - Swap in a reloaded route table and re-dispatch the current location
//!
//! # Grammar
//! ```text
//! <location>          push a location (anything not listed below)
//! replace <location>  replace the current history entry
//! back | forward      walk the history
//! show                print the mounted view again
//! quit | exit         leave the shell
//! ```
//!
//! # Design Decisions
//! - A rejected reload leaves the running dispatcher, node and view untouched
//! - The new table is validated before the old one is stopped

use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{ConfigError, RouterConfig};
use crate::dispatch::{Dispatcher, MountError, Mounted};
use crate::host::MemoryHost;
use crate::views::Page;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Push(String),
    Replace(String),
    Back,
    Forward,
    Show,
    Quit,
    /// Blank line.
    Empty,
    /// A keyword used without its argument.
    Usage(&'static str),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some(("replace", rest)) => ShellCommand::Replace(rest.trim().to_string()),
            _ => match line {
                "" => ShellCommand::Empty,
                "replace" => ShellCommand::Usage("replace <location>"),
                "back" => ShellCommand::Back,
                "forward" => ShellCommand::Forward,
                "show" => ShellCommand::Show,
                "quit" | "exit" => ShellCommand::Quit,
                location => ShellCommand::Push(location.to_string()),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("route table rejected: {0}")]
    Rejected(ConfigError),

    #[error(transparent)]
    Mount(#[from] MountError),
}

/// A started dispatcher together with the host it renders into.
#[derive(Debug)]
pub struct Session {
    dispatcher: Dispatcher<Page>,
    host: MemoryHost,
    node: String,
}

impl Session {
    /// Build the table, create the mount node and mount `initial`.
    pub fn start(config: &RouterConfig, initial: &str) -> Result<Self, ShellError> {
        let mut dispatcher = build(config)?;
        let mut host = MemoryHost::with_node(&config.mount_node, initial);
        dispatcher.start(&mut host, &config.mount_node)?;

        Ok(Self {
            dispatcher,
            host,
            node: config.mount_node.clone(),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher<Page> {
        &self.dispatcher
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    /// Id of the node views are mounted into.
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn mounted(&self) -> Option<&Mounted> {
        self.dispatcher.mounted()
    }

    /// Markup currently in the mount node.
    pub fn content(&self) -> Option<&str> {
        self.host.document.content(&self.node)
    }

    /// Apply a navigation command.
    ///
    /// Returns `Ok(None)` when `back`/`forward` has no entry in that
    /// direction. Commands that do not navigate return the current view.
    pub fn navigate(&mut self, command: &ShellCommand) -> Result<Option<&Mounted>, MountError> {
        let event = match command {
            ShellCommand::Push(location) => Some(self.host.history.push(location.as_str())),
            ShellCommand::Replace(location) => Some(self.host.history.replace(location.as_str())),
            ShellCommand::Back => self.host.history.back(),
            ShellCommand::Forward => self.host.history.forward(),
            _ => return Ok(self.dispatcher.mounted()),
        };

        match event {
            Some(event) => self.dispatcher.handle(&mut self.host, event).map(Some),
            None => Ok(None),
        }
    }

    /// Replace the route table and re-dispatch the current location.
    ///
    /// The view moves to the new config's mount node, which is created if
    /// the document lacks it.
    pub fn reload(&mut self, config: &RouterConfig) -> Result<&Mounted, ShellError> {
        let next = build(config)?;

        self.dispatcher.stop(&mut self.host)?;
        self.host.document.add_node(config.mount_node.as_str());
        self.node = config.mount_node.clone();
        self.dispatcher = next;
        tracing::info!(
            routes = config.routes.len(),
            node = %self.node,
            "Route table reloaded"
        );

        Ok(self.dispatcher.start(&mut self.host, &self.node)?)
    }

    pub fn stop(&mut self) -> Result<(), MountError> {
        self.dispatcher.stop(&mut self.host)
    }
}

fn build(config: &RouterConfig) -> Result<Dispatcher<Page>, ShellError> {
    validate_config(config).map_err(|errors| ShellError::Rejected(ConfigError::Validation(errors)))?;
    config
        .build_dispatcher()
        .map_err(|e| ShellError::Rejected(ConfigError::Validation(vec![e.into()])))
}
