// SPDX-License-Identifier: Apache-2.0

//! In-memory stand-in for a container, for tests that must not touch Docker.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;

use crate::gateway::{CommandGateway, CommandOutput};

/// Emulates `exec cat`, `exec tar`, `cp` (both directions) and the lifecycle
/// verbs against a map of volume paths. Every call is recorded.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    name: String,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    canned: RefCell<BTreeMap<String, CommandOutput>>,
    unreachable: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl MemoryContainer {
    pub fn new(name: &str) -> Self {
        MemoryContainer {
            name: name.to_string(),
            ..MemoryContainer::default()
        }
    }

    /// Seeds a file in the volume.
    pub fn put(&self, path: &str, bytes: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), bytes.to_vec());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn get_text(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Makes every call whose first argument is `verb` return `output`.
    pub fn respond(&self, verb: &str, output: CommandOutput) {
        self.canned.borrow_mut().insert(verb.to_string(), output);
    }

    /// Makes `verb` exit with `code` and `stderr`.
    pub fn fail(&self, verb: &str, code: i32, stderr: &str) {
        self.respond(verb, CommandOutput::failed(code, stderr));
    }

    /// Makes `verb` fail as if the runtime executable were missing.
    pub fn fail_to_spawn(&self, verb: &str) {
        self.unreachable.borrow_mut().insert(verb.to_string());
    }

    /// Every argument vector received, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn exec(&self, args: &[String]) -> CommandOutput {
        let Some((container, rest)) = args.split_first() else {
            return CommandOutput::failed(1, "exec requires a container");
        };
        if container != &self.name {
            return self.no_such_container(container);
        }

        match rest {
            [cmd, path] if cmd == "cat" => match self.get(path) {
                Some(bytes) => CommandOutput::ok(bytes),
                None => CommandOutput::failed(1, format!("cat: {path}: No such file or directory")),
            },
            [cmd, flags, archive, source] if cmd == "tar" && flags == "czf" => {
                let prefix = format!("{}/", source.trim_end_matches('/'));
                let has_source = self.files.borrow().keys().any(|k| k.starts_with(&prefix));
                if !has_source {
                    return CommandOutput::failed(
                        2,
                        format!("tar: {source}: Cannot stat: No such file or directory"),
                    );
                }
                self.put(archive, format!("archive of {source}").as_bytes());
                CommandOutput::ok("")
            }
            _ => CommandOutput::failed(127, format!("unsupported exec: {}", rest.join(" "))),
        }
    }

    fn copy(&self, args: &[String]) -> CommandOutput {
        let [src, dst] = args else {
            return CommandOutput::failed(1, "cp requires source and destination");
        };
        let prefix = format!("{}:", self.name);

        if let Some(path) = dst.strip_prefix(&prefix) {
            return match fs::read(src) {
                Ok(bytes) => {
                    self.put(path, &bytes);
                    CommandOutput::ok("")
                }
                Err(e) => CommandOutput::failed(1, format!("lstat {src}: {e}")),
            };
        }

        if let Some(path) = src.strip_prefix(&prefix) {
            let Some(bytes) = self.get(path) else {
                return CommandOutput::failed(
                    1,
                    format!("Error response from daemon: Could not find the file {path} in container {}", self.name),
                );
            };
            return match fs::write(dst, bytes) {
                Ok(()) => CommandOutput::ok(""),
                Err(e) => CommandOutput::failed(1, format!("open {dst}: {e}")),
            };
        }

        let container = src.split(':').next().unwrap_or_default();
        self.no_such_container(container)
    }

    fn no_such_container(&self, name: &str) -> CommandOutput {
        CommandOutput::failed(1, format!("Error response from daemon: No such container: {name}"))
    }
}

impl CommandGateway for MemoryContainer {
    fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(args.to_vec());

        let Some((verb, rest)) = args.split_first() else {
            return Ok(CommandOutput::failed(1, "no command"));
        };
        if self.unreachable.borrow().contains(verb) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "docker: not found"));
        }
        if let Some(output) = self.canned.borrow().get(verb) {
            return Ok(output.clone());
        }

        Ok(match verb.as_str() {
            "exec" => self.exec(rest),
            "cp" => self.copy(rest),
            "start" | "stop" => CommandOutput::ok(format!("{}\n", self.name)),
            "compose" => CommandOutput::ok(""),
            "ps" => CommandOutput::ok(format!("{}\tUp 3 minutes\n", self.name)),
            other => CommandOutput::failed(1, format!("unknown command: {other}")),
        })
    }
}
