pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use lanes_model::{
  BoardState,
  ThemeController
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting lanes CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.lanesrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  let mut theme = ThemeController::init(
    storage.clone(),
    cfg.prefers_dark()
  );
  let mut board =
    BoardState::open(storage);
  let renderer = render::Renderer::new(
    &cfg,
    theme.current()
  );

  let command = cli.command.unwrap_or(
    cli::Command::Board(
      cli::BoardArgs {
        search:   String::new(),
        category: "all".to_string(),
        priority: "all".to_string()
      }
    )
  );
  let today =
    chrono::Local::now().date_naive();

  commands::dispatch(
    &mut board,
    &mut theme,
    &renderer,
    command,
    today
  )?;

  info!("done");
  Ok(())
}
