use std::fmt;

use tracing::{
  debug,
  warn
};

use crate::storage::{
  KeyValueStore,
  THEME_KEY
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum Theme {
  Light,
  Dark
}

impl Theme {
  pub fn parse(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "light" => Some(Self::Light),
      | "dark" => Some(Self::Dark),
      | _ => None
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.storage_value())
  }
}

/// Light/dark preference, kept under
/// its own storage key.
#[derive(Debug, Clone)]
pub struct ThemeController<S> {
  storage: S,
  current: Theme
}

impl<S: KeyValueStore>
  ThemeController<S>
{
  /// A saved choice wins over the
  /// platform preference.
  pub fn init(
    storage: S,
    prefers_dark: bool
  ) -> Self {
    let saved = match storage
      .get(THEME_KEY)
    {
      | Ok(value) => {
        value.as_deref().and_then(
          Theme::parse
        )
      }
      | Err(error) => {
        warn!(
          error = %format!("{error:#}"),
          "failed reading theme \
           preference"
        );
        None
      }
    };
    let current = saved.unwrap_or(
      if prefers_dark {
        Theme::Dark
      } else {
        Theme::Light
      }
    );
    debug!(
      theme = %current,
      saved = saved.is_some(),
      "theme initialised"
    );

    Self {
      storage,
      current
    }
  }

  pub fn current(&self) -> Theme {
    self.current
  }

  pub fn set(
    &mut self,
    theme: Theme
  ) -> anyhow::Result<()> {
    self.storage.set(
      THEME_KEY,
      theme.storage_value()
    )?;
    self.current = theme;
    Ok(())
  }

  pub fn toggle(
    &mut self
  ) -> anyhow::Result<Theme> {
    let next = self.current.toggled();
    self.set(next)?;
    Ok(next)
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Theme,
    ThemeController
  };
  use crate::storage::{
    KeyValueStore,
    MemoryStorage,
    THEME_KEY
  };

  #[test]
  fn falls_back_to_platform_preference()
   {
    let dark = ThemeController::init(
      MemoryStorage::new(),
      true
    );
    assert_eq!(
      dark.current(),
      Theme::Dark
    );

    let storage = MemoryStorage::new();
    storage
      .set(THEME_KEY, "sepia")
      .unwrap();
    let light =
      ThemeController::init(storage, false);
    assert_eq!(
      light.current(),
      Theme::Light
    );
  }

  #[test]
  fn toggle_persists_choice() {
    let storage = MemoryStorage::new();
    let mut theme = ThemeController::init(
      storage.clone(),
      true
    );
    assert_eq!(
      theme.toggle().unwrap(),
      Theme::Light
    );
    assert_eq!(
      storage
        .get(THEME_KEY)
        .unwrap()
        .as_deref(),
      Some("light")
    );

    let again =
      ThemeController::init(storage, true);
    assert_eq!(
      again.current(),
      Theme::Light
    );
  }
}
