use anyhow::anyhow;
use chrono::NaiveDate;
use lanes_model::KeyValueStore;
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on
/// every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
  fn handle(
    &self
  ) -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
      .ok_or_else(|| {
        anyhow!("no window available")
      })?
      .local_storage()
      .map_err(js_error)?
      .ok_or_else(|| {
        anyhow!(
          "local storage is disabled"
        )
      })
  }
}

impl KeyValueStore for LocalStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    self
      .handle()?
      .get_item(key)
      .map_err(js_error)
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .handle()?
      .set_item(key, value)
      .map_err(js_error)
  }
}

fn js_error(
  error: JsValue
) -> anyhow::Error {
  anyhow!("{error:?}")
}

pub fn prefers_dark() -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .match_media(
          "(prefers-color-scheme: dark)"
        )
        .ok()
        .flatten()
    })
    .map(|query| query.matches())
    .unwrap_or(false)
}

/// Local calendar date of the browser.
pub fn today() -> NaiveDate {
  let now = js_sys::Date::new_0();
  i32::try_from(now.get_full_year())
    .ok()
    .and_then(|year| {
      NaiveDate::from_ymd_opt(
        year,
        now.get_month() + 1,
        now.get_date()
      )
    })
    .unwrap_or_default()
}
