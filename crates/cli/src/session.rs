//! Interactive triage session.
//!
//! One [`Session`] owns one [`IssueStore`]. Commands are read a line at a
//! time and each submission is awaited before the next line is read, so the
//! same input can never have two classifications in flight.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;
use triage::{
    Issue, IssueFactory, IssueId, IssueStatus, IssueStore, StatusChange, Submission, Timestamp,
    TriageError, TriageWorkflow,
};

use crate::render;

pub const HELP: &str = "\
Commands:
  submit <description>   report a new maintenance issue
  list                   show all issues, newest first
  show <id>              show one issue in full
  start <id>             mark a Pending issue as In Progress
  resolve <id>           mark an In Progress issue as Resolved
  help                   show this message
  quit                   end the session

<id> may be the full id or a unique prefix of it.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    List,
    Show(String),
    Start(String),
    Resolve(String),
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let needs_arg = |make: fn(String) -> Command, what: &str| {
            if rest.is_empty() {
                Err(format!("usage: {word} <{what}>"))
            } else {
                Ok(make(rest.to_string()))
            }
        };
        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Self::Empty),
            // Validation of the text itself is the factory's job.
            "submit" => Ok(Self::Submit(rest.to_string())),
            "list" | "ls" => Ok(Self::List),
            "show" => needs_arg(Self::Show, "id"),
            "start" => needs_arg(Self::Start, "id"),
            "resolve" => needs_arg(Self::Resolve, "id"),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'; type 'help'")),
        }
    }
}

/// Result of resolving a user-typed id against the store.
enum Lookup {
    Found(IssueId),
    Missing,
    Ambiguous(usize),
}

pub struct Session {
    factory: IssueFactory,
    store: Arc<IssueStore>,
    workflow: TriageWorkflow,
}

impl Session {
    pub fn new(factory: IssueFactory, store: Arc<IssueStore>) -> Self {
        Self {
            factory,
            store,
            workflow: TriageWorkflow::new(),
        }
    }

    pub fn store(&self) -> &IssueStore {
        &self.store
    }

    /// Creates an issue and, only once it is complete, inserts it.
    pub async fn submit(&self, description: String) -> Result<Issue, TriageError> {
        let issue = self.factory.create_issue(Submission::new(description)).await?;
        self.store.insert(issue.clone());
        Ok(issue)
    }

    /// Executes one command and returns the text to show. `None` ends the session.
    pub async fn execute(&self, command: Command) -> Option<String> {
        let now = Timestamp::now();
        let reply = match command {
            Command::Empty => String::new(),
            Command::Help => HELP.to_string(),
            Command::Quit => return None,
            Command::List => render::issue_list(&self.store.list(), now),
            Command::Submit(text) => match self.submit(text).await {
                Ok(issue) => format!(
                    "Your maintenance request has been submitted.\n{}",
                    render::issue_detail(&issue, now)
                ),
                Err(e) => render::user_message(&e),
            },
            Command::Show(id) => match self.lookup(&id) {
                Lookup::Found(id) => match self.store.get(id) {
                    Some(issue) => render::issue_detail(&issue, now),
                    None => format!("No issue with id '{id}'."),
                },
                other => self.lookup_failure(&id, other),
            },
            Command::Start(id) => self.change_status(&id, IssueStatus::InProgress),
            Command::Resolve(id) => self.change_status(&id, IssueStatus::Resolved),
        };
        Some(reply)
    }

    fn change_status(&self, typed: &str, requested: IssueStatus) -> String {
        let id = match self.lookup(typed) {
            Lookup::Found(id) => id,
            other => return self.lookup_failure(typed, other),
        };
        match self.workflow.change_status(&self.store, id, requested) {
            Ok(StatusChange::Applied { to, .. }) => format!("Issue {typed} is now {to}."),
            Ok(StatusChange::NotFound) => format!("No issue with id '{typed}'."),
            Err(e) => render::user_message(&e),
        }
    }

    fn lookup(&self, typed: &str) -> Lookup {
        if let Ok(id) = typed.parse::<IssueId>() {
            return Lookup::Found(id);
        }
        let prefix = typed.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Lookup::Missing;
        }
        let matches: Vec<IssueId> = self
            .store
            .list()
            .iter()
            .map(Issue::id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();
        match matches.as_slice() {
            [] => Lookup::Missing,
            [id] => Lookup::Found(*id),
            many => Lookup::Ambiguous(many.len()),
        }
    }

    fn lookup_failure(&self, typed: &str, lookup: Lookup) -> String {
        match lookup {
            Lookup::Ambiguous(n) => format!("'{typed}' matches {n} issues; type more of the id."),
            Lookup::Found(_) | Lookup::Missing => format!("No issue with id '{typed}'."),
        }
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output
            .write_all(b"CampusCare triage session. Type 'help' for commands.\n> ")
            .await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match Command::parse(&line) {
                Ok(command) => match self.execute(command).await {
                    Some(reply) => reply,
                    None => break,
                },
                Err(usage) => usage,
            };
            if !reply.is_empty() {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        info!(issues = self.store.len(), "Session ended");
        Ok(())
    }
}
