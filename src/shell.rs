use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::analysis::{Measure, StandSummary};
use crate::error::InventoryError;
use crate::forest::Forest;
use crate::models::{Category, TreeDraft};
use crate::visualization::{format_summary_table, format_tree_table};

const HELP: &str = "\
Commands:
  use <coniferous|deciduous>        switch the active category
  load [category] <path>            load a stand file
  add <species> <height> <diameter> <age> [wood type...]
  select <row>                      select a tree by its row number
  delete                            delete the selected tree
  sort [height|diameter|species|age]
  search <species>                  find and select a tree
  tallest | thickest | averages
  list | summary
  help | quit";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Use(Category),
    Load {
        category: Option<Category>,
        path: PathBuf,
    },
    Add(TreeDraft),
    Select(usize),
    Delete,
    /// `None` sorts by the configured default; unknown labels are kept
    /// verbatim so the sort can be reported as a no-op.
    Sort(Option<String>),
    Search(String),
    Tallest,
    Thickest,
    Averages,
    List,
    Summary,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, InventoryError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "use" => Command::Use(rest.parse()?),
            "load" => parse_load(rest)?,
            "add" => parse_add(rest)?,
            "select" => Command::Select(rest.parse().map_err(|_| {
                InventoryError::ValidationError(format!("row must be a number, got '{rest}'"))
            })?),
            "delete" => Command::Delete,
            "sort" => Command::Sort((!rest.is_empty()).then(|| rest.to_string())),
            "search" => Command::Search(rest.to_string()),
            "tallest" => Command::Tallest,
            "thickest" => Command::Thickest,
            "averages" => Command::Averages,
            "list" => Command::List,
            "summary" => Command::Summary,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(InventoryError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_load(rest: &str) -> Result<Command, InventoryError> {
    if rest.is_empty() {
        return Err(InventoryError::ValidationError(
            "load needs a file path".to_string(),
        ));
    }
    if let Some((first, path)) = rest.split_once(char::is_whitespace) {
        if let Ok(category) = first.parse::<Category>() {
            return Ok(Command::Load {
                category: Some(category),
                path: PathBuf::from(path.trim()),
            });
        }
    }
    Ok(Command::Load {
        category: None,
        path: PathBuf::from(rest),
    })
}

fn parse_add(rest: &str) -> Result<Command, InventoryError> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(InventoryError::ValidationError(
            "add needs species, height, diameter and age".to_string(),
        ));
    }
    Ok(Command::Add(TreeDraft {
        species: tokens[0].to_string(),
        height: tokens[1].to_string(),
        diameter: tokens[2].to_string(),
        age: tokens[3].to_string(),
        wood_type: (tokens.len() > 4).then(|| tokens[4..].join(" ")),
    }))
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Line-oriented front end over a [`Forest`].
///
/// Every action works on the active category. Errors become messages; none
/// ends the session.
pub struct Shell {
    forest: Forest,
}

impl Shell {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn into_forest(self) -> Forest {
        self.forest
    }

    /// Parse and execute one line, turning every error into a message.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let result = Command::parse(line).and_then(|command| match command {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Continue(String::new())),
        });
        result.unwrap_or_else(|e| {
            debug!(error = %e, "command failed");
            Outcome::Continue(e.to_string())
        })
    }

    /// Execute a parsed command against the active category.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, InventoryError> {
        let category = self.forest.active();
        let precision = self.forest.config().precision;

        let message = match command {
            Command::Use(target) => {
                self.forest.select_category(target);
                format!("Active category: {target}")
            }
            Command::Load { category: target, path } => {
                let target = target.unwrap_or(category);
                let count = self.forest.load_file(target, &path)?;
                format!(
                    "Loaded {count} {target} trees from {}\n{}",
                    path.display(),
                    self.forest.summary(target)
                )
            }
            Command::Add(draft) => {
                let id = self.forest.add_draft(category, &draft)?;
                let row = self.forest.inventory(category).len();
                debug!(%id, row, "added from shell");
                format!("Added {} as row {row}", draft.species.trim())
            }
            Command::Select(row) => {
                let id = row
                    .checked_sub(1)
                    .and_then(|index| self.forest.inventory(category).id_at(index))
                    .ok_or_else(|| InventoryError::NotFound(format!("row {row}")))?;
                self.forest.select(category, id)?;
                format!("Selected row {row}")
            }
            Command::Delete => match self.forest.delete_selected() {
                Some(tree) => format!("Deleted {}", tree.species),
                None => "Nothing selected".to_string(),
            },
            Command::Sort(label) => match label {
                None => {
                    let criterion = self.forest.config().default_sort;
                    self.forest.sort(category, criterion);
                    format!("Sorted by {criterion}")
                }
                Some(label) => match self.forest.sort_by_label(category, &label) {
                    Some(criterion) => format!("Sorted by {criterion}"),
                    None => format!("Unknown sort criterion '{label}', order unchanged"),
                },
            },
            Command::Search(species) => {
                self.forest.search(category, &species)?;
                let (_, _, tree) = self
                    .forest
                    .selected()
                    .ok_or_else(|| InventoryError::NotFound(species.clone()))?;
                format!("Found: {}", tree.species)
            }
            Command::Tallest => {
                let (_, tree) = self.forest.tallest(category)?;
                format!("Tallest: {}, {} {}", tree.species, tree.height, Measure::Height.unit())
            }
            Command::Thickest => {
                let (_, tree) = self.forest.thickest(category)?;
                format!("Thickest: {}, {} {}", tree.species, tree.diameter, Measure::Diameter.unit())
            }
            Command::Averages => self.forest.averages(category)?.to_string(),
            Command::List => {
                let selected = self
                    .forest
                    .selected()
                    .filter(|(c, _, _)| *c == category)
                    .map(|(_, id, _)| id);
                format_tree_table(self.forest.inventory(category), precision, selected)
            }
            Command::Summary => {
                let summaries: Vec<(Category, StandSummary)> = Category::ALL
                    .iter()
                    .map(|c| (*c, self.forest.summary(*c)))
                    .collect();
                format_summary_table(&summaries, precision)
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    /// Read commands until end of input or `quit`, writing replies.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        for line in input.lines() {
            match self.handle_line(&line?) {
                Outcome::Quit => break,
                Outcome::Continue(message) if message.is_empty() => {}
                Outcome::Continue(message) => writeln!(output, "{message}")?,
            }
            output.flush()?;
        }
        Ok(())
    }
}
