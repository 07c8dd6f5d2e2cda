//! Practice word rotation controller.
//!
//! The controller backs the long-running `menubar` display. It reuses a fresh
//! cached word list or fetches a new one, advances the current word on a timer
//! while rotation is enabled, and polls the shared store so that index changes
//! made by the short-lived `next`/`previous` commands show up here.
//!
//! # States
//! - **Loading**: initial state, entered again on reload
//! - **Ready**: a word list is loaded (it may still be empty)
//! - **Error**: loading failed with a [`LoadFailure`]
//!
//! # Persistence
//! Every index change (timer, poll adoption, manual navigation) is written back
//! to the store. Writing back an index just adopted from the store is a
//! harmless overwrite with the same value.

use crate::core::cache::PracticeCache;
use crate::core::config::PracticeConfig;
use crate::core::credentials::Credentials;
use crate::core::error::{KotobatenError, Result};
use crate::core::practice::{fetch_practice_words, PracticeSource};
use crate::core::rotation_state::RotationState;
use crate::core::state::{Direction, DisplayWord};
use crate::core::store::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    AuthRequired,
    NoWords,
    Failed,
}

impl LoadFailure {
    pub fn message(self) -> &'static str {
        match self {
            LoadFailure::AuthRequired => "Authentication required",
            LoadFailure::NoWords => "No practice words available",
            LoadFailure::Failed => "Failed to load practice words",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStatus {
    Loading,
    Ready,
    Error(LoadFailure),
}

/// User actions available while the display is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Next,
    Previous,
    Toggle,
    Reload,
    ShowMenu,
    Quit,
}

impl MenuAction {
    /// Single-key shortcut as typed on the menu's input line.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(MenuAction::Next),
            "p" | "previous" => Some(MenuAction::Previous),
            "t" | "toggle" => Some(MenuAction::Toggle),
            "r" | "reload" => Some(MenuAction::Reload),
            "m" | "menu" => Some(MenuAction::ShowMenu),
            "q" | "quit" => Some(MenuAction::Quit),
            _ => None,
        }
    }
}

/// Why the display should be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Title,
    Menu,
}

#[derive(Debug, Clone, Copy)]
pub struct RotationTiming {
    pub rotation: Duration,
    pub poll: Duration,
}

impl From<&PracticeConfig> for RotationTiming {
    fn from(config: &PracticeConfig) -> Self {
        Self {
            rotation: config.rotation_interval(),
            poll: config.poll_interval(),
        }
    }
}

pub struct RotationController {
    cache: PracticeCache,
    rotation: RotationState,
    credentials: Credentials,
    source: Arc<dyn PracticeSource>,
    max_age: Duration,
    fetch_count: u32,
    status: RotationStatus,
    words: Vec<DisplayWord>,
    index: usize,
    enabled: bool,
}

impl RotationController {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn PracticeSource>,
        config: &PracticeConfig,
    ) -> Self {
        Self {
            cache: PracticeCache::new(store.clone()),
            rotation: RotationState::new(store.clone()),
            credentials: Credentials::new(store),
            source,
            max_age: config.cache_max_age(),
            fetch_count: config.fetch_count,
            status: RotationStatus::Loading,
            words: Vec::new(),
            index: 0,
            enabled: true,
        }
    }

    pub fn status(&self) -> RotationStatus {
        self.status
    }

    pub fn words(&self) -> &[DisplayWord] {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current_word(&self) -> Option<&DisplayWord> {
        match self.status {
            RotationStatus::Ready => self.words.get(self.index),
            _ => None,
        }
    }

    /// Load the enabled flag and the word list. Never fails: problems end up in
    /// [`RotationStatus::Error`].
    pub async fn initialize(&mut self) {
        self.status = RotationStatus::Loading;
        self.words.clear();
        self.index = 0;

        let (enabled, loaded) = tokio::join!(self.rotation.enabled(), self.load_words());

        self.enabled = enabled.unwrap_or_else(|e| {
            log::warn!("Failed to read rotation state, assuming enabled: {e}");
            true
        });

        match loaded {
            Ok((words, index)) => {
                log::debug!("Loaded {} practice words at index {}", words.len(), index);
                self.words = words;
                self.index = index;
                self.status = RotationStatus::Ready;
            }
            Err(failure) => {
                self.status = RotationStatus::Error(failure);
            }
        }
    }

    async fn load_words(&self) -> std::result::Result<(Vec<DisplayWord>, usize), LoadFailure> {
        match self.try_load_words().await {
            Ok(loaded) => Ok(loaded),
            Err(KotobatenError::AuthRequired) => Err(LoadFailure::AuthRequired),
            Err(KotobatenError::EmptyResult) => Err(LoadFailure::NoWords),
            Err(e) => {
                log::error!("Error loading practice words: {e}");
                Err(LoadFailure::Failed)
            }
        }
    }

    async fn try_load_words(&self) -> Result<(Vec<DisplayWord>, usize)> {
        if let Some(cached) = self.cache.read().await? {
            if !cached.words.is_empty() && self.cache.is_valid(self.max_age).await? {
                log::debug!("Reusing cached practice words");
                let index = cached.index % cached.words.len();
                return Ok((cached.words, index));
            }
        }

        let Some(token) = self.credentials.token().await? else {
            log::info!("No stored token, practice words need a login");
            return Err(KotobatenError::AuthRequired);
        };

        log::debug!("Fetching {} practice words", self.fetch_count);
        let fetched = fetch_practice_words(self.source.as_ref(), self.fetch_count, &token).await;
        let words = self.credentials.forget_if_rejected(fetched).await?;

        if words.is_empty() {
            return Err(KotobatenError::EmptyResult);
        }

        self.cache.write(&words, 0).await?;
        Ok((words, 0))
    }

    /// Move to `index` and persist it. Returns whether the in-memory index changed.
    async fn move_to(&mut self, index: usize) -> bool {
        if self.status != RotationStatus::Ready || self.words.is_empty() {
            return false;
        }

        let changed = index != self.index;
        self.index = index;
        if let Err(e) = self.cache.set_current_index(index).await {
            log::warn!("Failed to persist practice index {index}: {e}");
        }
        changed
    }

    async fn step(&mut self, direction: Direction) -> bool {
        match direction.step(self.index, self.words.len()) {
            Some(index) => self.move_to(index).await,
            None => false,
        }
    }

    /// Timer tick. Only moves while rotation is enabled.
    pub async fn auto_advance(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.step(Direction::Next).await
    }

    pub async fn next(&mut self) -> bool {
        self.step(Direction::Next).await
    }

    pub async fn previous(&mut self) -> bool {
        self.step(Direction::Previous).await
    }

    /// Adopt an index written by another process.
    pub async fn poll_external(&mut self) -> bool {
        if self.status != RotationStatus::Ready || self.words.is_empty() {
            return false;
        }

        let stored = match self.cache.current_index().await {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Failed to poll practice index: {e}");
                return false;
            }
        };

        let stored = stored % self.words.len();
        if stored == self.index {
            return false;
        }

        log::debug!("Adopting external practice index {} (was {})", stored, self.index);
        self.move_to(stored).await
    }

    /// Flip and persist the rotation flag. Only available while ready.
    pub async fn toggle(&mut self) -> bool {
        if self.status != RotationStatus::Ready {
            log::debug!("Ignoring rotation toggle while not ready");
            return self.enabled;
        }

        self.enabled = !self.enabled;
        if let Err(e) = self.rotation.set_enabled(self.enabled).await {
            log::warn!("Failed to persist rotation state: {e}");
        }
        self.enabled
    }

    pub fn title(&self) -> String {
        match self.status {
            RotationStatus::Loading => "Loading...".to_string(),
            RotationStatus::Error(_) => "Error".to_string(),
            RotationStatus::Ready => match self.words.get(self.index) {
                None => "No words".to_string(),
                Some(_) if !self.enabled => "Paused".to_string(),
                Some(word) => word.one_line(),
            },
        }
    }

    /// Entries of the expanded menu, top to bottom.
    pub fn menu_lines(&self) -> Vec<String> {
        match self.status {
            RotationStatus::Loading => vec!["Loading practice words...".to_string()],
            RotationStatus::Error(failure) => {
                vec![failure.message().to_string(), "Reload (r)".to_string()]
            }
            RotationStatus::Ready => {
                let Some(word) = self.words.get(self.index) else {
                    return Vec::new();
                };

                let mut lines = vec![
                    format!("{} of {}", self.index + 1, self.words.len()),
                    if self.enabled {
                        "Pause Rotation (t)".to_string()
                    } else {
                        "Resume Rotation (t)".to_string()
                    },
                    "Previous Word (p)".to_string(),
                    "Next Word (n)".to_string(),
                    "Current Word:".to_string(),
                    format!("  Sense: {}", word.sense),
                ];
                if let Some(kanji) = word.kanji.as_deref().filter(|k| !k.is_empty()) {
                    lines.push(format!("  Kanji: {kanji}"));
                }
                if let Some(kana) = word.kana.as_deref().filter(|k| !k.is_empty()) {
                    lines.push(format!("  Kana: {kana}"));
                }
                lines
            }
        }
    }

    fn rotation_timer(&self, period: Duration) -> Option<Interval> {
        if !self.enabled {
            return None;
        }
        // First tick one full period from now, never immediately.
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(timer)
    }

    /// Drive the display until [`MenuAction::Quit`] arrives.
    ///
    /// When the rotation tick and the poll tick are due together the rotation is
    /// applied first, then the poll. A closed action channel keeps the display
    /// running on timers alone.
    pub async fn run<F>(
        &mut self,
        mut actions: mpsc::Receiver<MenuAction>,
        timing: RotationTiming,
        mut redraw: F,
    ) where
        F: FnMut(&RotationController, Redraw),
    {
        redraw(&*self, Redraw::Title);

        let mut rotation = self.rotation_timer(timing.rotation);
        let mut poll = interval(timing.poll);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut actions_open = true;
        let mut last_drawn = (self.title(), self.index);

        loop {
            tokio::select! {
                biased;

                _ = next_tick(&mut rotation) => {
                    self.auto_advance().await;
                }
                _ = poll.tick() => {
                    self.poll_external().await;
                }
                action = actions.recv(), if actions_open => match action {
                    None => {
                        log::debug!("Action channel closed, continuing on timers");
                        actions_open = false;
                    }
                    Some(MenuAction::Quit) => break,
                    Some(MenuAction::Next) => {
                        self.next().await;
                    }
                    Some(MenuAction::Previous) => {
                        self.previous().await;
                    }
                    Some(MenuAction::Toggle) => {
                        self.toggle().await;
                        rotation = self.rotation_timer(timing.rotation);
                    }
                    Some(MenuAction::Reload) => {
                        self.status = RotationStatus::Loading;
                        redraw(&*self, Redraw::Title);
                        last_drawn = (self.title(), self.index);
                        self.initialize().await;
                        rotation = self.rotation_timer(timing.rotation);
                    }
                    Some(MenuAction::ShowMenu) => {
                        redraw(&*self, Redraw::Menu);
                    }
                },
            }

            let current = (self.title(), self.index);
            if current != last_drawn {
                redraw(&*self, Redraw::Title);
                last_drawn = current;
            }
        }
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
