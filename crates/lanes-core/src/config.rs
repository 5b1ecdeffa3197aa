use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use lanes_model::Theme;
use tracing::{
  debug,
  info,
  trace,
  warn
};

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "data.location".to_string(),
      "~/.lanes".to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );
    map.insert(
      "theme.default".to_string(),
      "dark".to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    lanesrc_override
  ))]
  pub fn load(
    lanesrc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let lanesrc = resolve_lanesrc_path(
      lanesrc_override
    )?;
    if let Some(path) = lanesrc {
      info!(lanesrc = %path.display(), "loading lanesrc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no lanesrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  /// Theme used when none has been
  /// saved yet.
  pub fn prefers_dark(&self) -> bool {
    match self.get("theme.default") {
      | Some(raw) => {
        match Theme::parse(&raw) {
          | Some(theme) => {
            theme == Theme::Dark
          }
          | None => {
            warn!(value = %raw, "unknown theme.default; assuming dark");
            true
          }
        }
      }
      | None => true
    }
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let canonical = fs::canonicalize(&path)
      .unwrap_or_else(|_| path.clone());
    if self.loaded_files.contains(&canonical)
    {
      warn!(
        file = %path.display(),
        "config file already loaded; skipping include cycle"
      );
      return Ok(());
    }

    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self.loaded_files.push(canonical);

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get("data.location")
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_lanesrc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(lanesrc_env) =
    std::env::var("LANESRC")
  {
    if lanesrc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      lanesrc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping lanesrc"
    );
    return Ok(None);
  };
  let candidate = home.join(".lanesrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".lanes"))
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::{
    Config,
    resolve_data_dir
  };

  #[test]
  fn reads_file_with_includes_and_comments()
   {
    let dir =
      tempdir().expect("tempdir");
    let main = dir.path().join("lanesrc");
    fs::write(
      dir.path().join("colors.rc"),
      "color = off\n"
    )
    .expect("write include");
    fs::write(
      &main,
      "# board settings\n\
       theme.default = light # day \
       person\n\
       include colors.rc\n"
    )
    .expect("write lanesrc");

    let cfg = Config::load(Some(&main))
      .expect("load config");
    assert_eq!(
      cfg.get_bool("color"),
      Some(false)
    );
    assert!(!cfg.prefers_dark());
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn include_cycles_load_each_file_once()
   {
    let dir =
      tempdir().expect("tempdir");
    let main = dir.path().join("lanesrc");
    fs::write(
      dir.path().join("theme.rc"),
      "theme.default = light\n\
       include lanesrc\n"
    )
    .expect("write include");
    fs::write(
      &main,
      "include lanesrc\n\
       include theme.rc\n\
       color = off\n"
    )
    .expect("write lanesrc");

    let cfg = Config::load(Some(&main))
      .expect("load config");
    assert_eq!(cfg.loaded_files.len(), 2);
    assert!(!cfg.prefers_dark());
    assert_eq!(
      cfg.get_bool("color"),
      Some(false)
    );
  }

  #[test]
  fn rejects_lines_without_equals() {
    let dir =
      tempdir().expect("tempdir");
    let main = dir.path().join("lanesrc");
    fs::write(&main, "color on\n")
      .expect("write lanesrc");
    assert!(
      Config::load(Some(&main)).is_err()
    );
  }

  #[test]
  fn overrides_strip_rc_prefix_and_win()
   {
    let dir =
      tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg.apply_overrides(vec![(
      "rc.data.location".to_string(),
      dir
        .path()
        .join("board")
        .display()
        .to_string()
    )]);

    let data = resolve_data_dir(&cfg, None)
      .expect("resolve data dir");
    assert_eq!(
      data,
      dir.path().join("board")
    );
    assert!(data.exists());
    assert!(cfg.prefers_dark());
  }
}
