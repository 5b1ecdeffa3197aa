use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

/// Workflow stage a task sits in. The
/// declaration order is the board's
/// left-to-right column order.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  Todo,
  InProgress,
  Done
}

impl Stage {
  pub const ALL: [Stage; 3] = [
    Stage::Todo,
    Stage::InProgress,
    Stage::Done
  ];

  pub fn first() -> Self {
    Self::ALL[0]
  }

  pub fn last() -> Self {
    Self::ALL[Self::ALL.len() - 1]
  }

  fn index(self) -> usize {
    match self {
      | Self::Todo => 0,
      | Self::InProgress => 1,
      | Self::Done => 2
    }
  }

  pub fn next(self) -> Option<Self> {
    Self::ALL
      .get(self.index() + 1)
      .copied()
  }

  pub fn previous(
    self
  ) -> Option<Self> {
    self
      .index()
      .checked_sub(1)
      .and_then(|idx| {
        Self::ALL.get(idx).copied()
      })
  }

  pub fn is_first(self) -> bool {
    self.previous().is_none()
  }

  pub fn is_last(self) -> bool {
    self.next().is_none()
  }

  /// Identifier used in persisted
  /// state and on the command line.
  pub fn as_str(
    self
  ) -> &'static str {
    match self {
      | Self::Todo => "todo",
      | Self::InProgress => {
        "inprogress"
      }
      | Self::Done => "done"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Todo => "To Do",
      | Self::InProgress => {
        "In Progress"
      }
      | Self::Done => "Done"
    }
  }
}

impl Default for Stage {
  fn default() -> Self {
    Self::first()
  }
}

impl fmt::Display for Stage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Stage {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "todo" => Ok(Self::Todo),
      | "inprogress"
      | "in-progress"
      | "doing" => Ok(Self::InProgress),
      | "done" => Ok(Self::Done),
      | other => {
        Err(anyhow!(
          "unknown stage: {other}"
        ))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Stage;

  #[test]
  fn next_then_previous_returns_home()
  {
    let stage = Stage::InProgress;
    assert_eq!(
      stage
        .next()
        .and_then(Stage::previous),
      Some(stage)
    );
    assert_eq!(
      stage
        .previous()
        .and_then(Stage::next),
      Some(stage)
    );
  }

  #[test]
  fn boundaries_have_no_neighbour() {
    assert!(Stage::Todo.is_first());
    assert!(!Stage::Todo.is_last());
    assert!(Stage::Done.is_last());
    assert_eq!(Stage::Done.next(), None);
    assert_eq!(
      Stage::Todo.previous(),
      None
    );
    assert_eq!(
      Stage::default(),
      Stage::Todo
    );
  }

  #[test]
  fn parses_identifiers_and_aliases() {
    assert_eq!(
      "inprogress"
        .parse::<Stage>()
        .unwrap(),
      Stage::InProgress
    );
    assert_eq!(
      "In-Progress"
        .parse::<Stage>()
        .unwrap(),
      Stage::InProgress
    );
    assert!(
      "archived"
        .parse::<Stage>()
        .is_err()
    );
  }

  #[test]
  fn serializes_as_lowercase_identifier()
  {
    let json = serde_json::to_string(
      &Stage::InProgress
    )
    .unwrap();
    assert_eq!(json, "\"inprogress\"");
  }
}
