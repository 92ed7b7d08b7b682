//! A stack of profile cards with one card on top at a time.
//!
//! The deck drives its own frame clock in 16 ms steps. When the top card
//! has been swiped and its fly-out has settled, the deck drops it and
//! mounts the next profile.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::Context;
use swipedeck_card::{CardConfig, CardEffects, DiscardDirection, ProfileCard};
use swipedeck_core::{Runtime, NANOS_PER_MILLI};
use swipedeck_foundation::{Point, PointerEvent, PointerEventKind};

use crate::profiles::{Profile, TextContent};

const FRAME_MILLIS: u64 = 16;

#[derive(Debug, Clone, Copy)]
pub enum Gesture {
    Like,
    Dislike,
    /// Quick horizontal throw over 80 ms.
    Flick(f32),
    /// Deliberate drag that releases at rest.
    SlowDrag(f32),
    Tap,
    Close,
    Wait(u64),
}

#[derive(Default)]
pub struct DeckEffects {
    haptics: Cell<u32>,
}

impl DeckEffects {
    pub fn haptics(&self) -> u32 {
        self.haptics.get()
    }
}

impl CardEffects for DeckEffects {
    fn haptic_feedback(&self) {
        self.haptics.set(self.haptics.get() + 1);
        log::debug!("haptic #{}", self.haptics.get());
    }

    fn on_swipe(&self, direction: DiscardDirection) {
        log::info!("swiped {direction:?}");
    }
}

type DeckCard = ProfileCard<Profile, Rc<DeckEffects>>;

pub struct Deck {
    runtime: Runtime,
    config: CardConfig,
    upcoming: VecDeque<Profile>,
    current: Option<DeckCard>,
    effects: Rc<DeckEffects>,
    now_millis: u64,
    liked: Vec<&'static str>,
    passed: Vec<&'static str>,
}

impl Deck {
    pub fn new(config: CardConfig, profiles: Vec<Profile>) -> Self {
        let mut deck = Self {
            runtime: Runtime::default(),
            config,
            upcoming: profiles.into(),
            current: None,
            effects: Rc::new(DeckEffects::default()),
            now_millis: 0,
            liked: Vec::new(),
            passed: Vec::new(),
        };
        deck.mount_next();
        deck.pump();
        deck
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn liked(&self) -> &[&'static str] {
        &self.liked
    }

    pub fn passed(&self) -> &[&'static str] {
        &self.passed
    }

    pub fn haptics(&self) -> u32 {
        self.effects.haptics()
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    pub fn perform(&mut self, gesture: Gesture) -> anyhow::Result<()> {
        log::info!("t={}ms {gesture:?}", self.now_millis);
        match gesture {
            Gesture::Like => self.card()?.like(),
            Gesture::Dislike => self.card()?.dislike(),
            Gesture::Tap => {
                self.pointer(PointerEventKind::Down, 0.0)?;
                self.advance(FRAME_MILLIS);
                self.pointer(PointerEventKind::Up, 0.0)?;
            }
            Gesture::Close => self.card()?.close(),
            Gesture::Flick(dx) => self.drag(dx, 10, 8)?,
            Gesture::SlowDrag(dx) => self.drag(dx, 60, 8)?,
            Gesture::Wait(millis) => self.advance(millis),
        }
        self.advance(FRAME_MILLIS);
        Ok(())
    }

    /// Runs frames until the top card stops moving.
    pub fn settle(&mut self) {
        let handle = self.runtime.handle();
        while handle.has_frame_callbacks() || handle.has_pending_timers() {
            self.advance(FRAME_MILLIS);
        }
    }

    pub fn render(&self) -> anyhow::Result<()> {
        let card = self.card()?;
        let mut content = TextContent::default();
        card.render_content(&mut content);
        let frame = card.frame();
        println!(
            "[{:?}] x={:+.1} y={:+.1} rot={:+.1}° scale={:.2} icons={:.2}",
            frame.view_mode,
            frame.offset.x,
            frame.offset.y,
            frame.rotation_degrees,
            frame.entrance_scale,
            frame.helper_icon_scale,
        );
        for line in &content.lines {
            println!("    {line}");
        }
        Ok(())
    }

    fn card(&self) -> anyhow::Result<&DeckCard> {
        self.current.as_ref().context("the deck is out of profiles")
    }

    fn mount_next(&mut self) {
        self.current = self.upcoming.pop_front().map(|profile| {
            log::info!("showing {}", profile.name);
            ProfileCard::new(
                self.runtime.handle(),
                self.config,
                profile,
                self.effects.clone(),
            )
        });
    }

    fn pointer(&self, kind: PointerEventKind, dx: f32) -> anyhow::Result<()> {
        let origin = Point::new(self.config.window.width / 2.0, self.config.window.height / 2.0);
        let position = Point::new(origin.x + dx, origin.y);
        let event = PointerEvent::new(kind, position, self.now_millis as i64);
        self.card()?.pointer_input(&event);
        Ok(())
    }

    fn drag(&mut self, dx: f32, step_millis: u64, steps: u32) -> anyhow::Result<()> {
        self.pointer(PointerEventKind::Down, 0.0)?;
        for i in 1..=steps {
            self.advance(step_millis);
            self.pointer(PointerEventKind::Move, dx * i as f32 / steps as f32)?;
        }
        self.pointer(PointerEventKind::Up, dx)
    }

    fn advance(&mut self, millis: u64) {
        let end = self.now_millis + millis;
        while self.now_millis < end {
            self.now_millis = (self.now_millis + FRAME_MILLIS).min(end);
            self.pump();
        }
    }

    fn pump(&mut self) {
        self.runtime
            .handle()
            .drain_frame_callbacks(self.now_millis * NANOS_PER_MILLI);
        self.retire_swiped_card();
    }

    fn retire_swiped_card(&mut self) {
        let Some(card) = &self.current else {
            return;
        };
        if !card.is_consumed() || card.is_settling() {
            return;
        }
        let name = card.payload().name;
        match card.discard_direction() {
            Some(DiscardDirection::Right) => self.liked.push(name),
            Some(DiscardDirection::Left) => self.passed.push(name),
            _ => {}
        }
        log::info!("{name} left the deck");
        self.current = None;
        self.mount_next();
    }
}
