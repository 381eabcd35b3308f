//! Production [`InputInjector`] backed by enigo.
//!
//! Keystrokes land in whatever native window holds focus, so the engine
//! only calls this immediately after raising the file dialog. Enigo handles
//! are not `Send`; a fresh one is built per call inside `spawn_blocking`,
//! which is fine at the call rates involved here.

use async_trait::async_trait;
use enigo::{Direction, Enigo, Key as EnigoKey, Keyboard, Settings};
use herald::{HeraldError, InputInjector, Key};

#[derive(Default)]
pub struct EnigoInjector;

impl EnigoInjector {
    pub fn new() -> Self {
        Self
    }
}

fn injector_err(err: impl std::fmt::Display) -> HeraldError {
    HeraldError::Injector(err.to_string())
}

fn map_key(key: Key) -> EnigoKey {
    match key {
        Key::Enter => EnigoKey::Return,
        Key::Escape => EnigoKey::Escape,
    }
}

#[async_trait]
impl InputInjector for EnigoInjector {
    async fn type_text(&self, text: &str) -> herald::Result<()> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut enigo = Enigo::new(&Settings::default()).map_err(injector_err)?;
            enigo.text(&text).map_err(injector_err)
        })
        .await
        .map_err(injector_err)?
    }

    async fn press_key(&self, key: Key) -> herald::Result<()> {
        let mapped = map_key(key);
        tokio::task::spawn_blocking(move || {
            let mut enigo = Enigo::new(&Settings::default()).map_err(injector_err)?;
            enigo.key(mapped, Direction::Click).map_err(injector_err)
        })
        .await
        .map_err(injector_err)?
    }
}
