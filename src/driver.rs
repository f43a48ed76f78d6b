//! A headless, frame-by-frame driver.  Events are queued up as they happen, and each call to
//! [`Driver::tick`] handles at most one of them before redrawing whatever needs redrawing.

use std::collections::VecDeque;

use angle::Rad;
use rand::Rng;

use crate::{
    grid::Viewport,
    image::Image,
    tiling::{GenOpts, Tiling},
    V2,
};

/// Something which the driver should respond to
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Throw the current tiling away and generate a new one
    Reset,
    /// Same as [`Event::Reset`]
    Click,
    /// Move the light so that it comes from a new direction
    Move(Rad<f32>),
}

impl Event {
    /// The [`Event::Move`] caused by a pointer at `position`: the light moves to point in the
    /// direction of the pointer, as seen from the middle of the viewport.
    pub fn pointer_moved(position: V2, viewport: &Viewport) -> Self {
        let offset = position - viewport.middle();
        Event::Move(Rad(offset.y.atan2(offset.x)))
    }
}

/// The stages which the drawing goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimState {
    /// A new tiling has to be generated
    NeedsReset,
    /// The background and knots need painting
    Fill,
    /// The knots' outlines need painting
    Stroke,
    /// Everything is drawn; waiting for events
    Idle,
}

#[derive(Debug, Clone)]
pub struct Driver<R> {
    viewport: Viewport,
    opts: GenOpts,
    rng: R,
    events: VecDeque<Event>,
    state: AnimState,
    /// The direction the light comes from
    light: Rad<f32>,
    tiling: Option<Tiling>,
    num_generations: usize,
}

impl<R: Rng> Driver<R> {
    /// Creates a new `Driver`, whose first [`tick`](Self::tick) will generate a tiling
    pub fn new(viewport: Viewport, opts: GenOpts, light: Rad<f32>, rng: R) -> Self {
        let mut events = VecDeque::new();
        events.push_back(Event::Reset);
        Self {
            viewport,
            opts,
            rng,
            events,
            state: AnimState::NeedsReset,
            light,
            tiling: None,
            num_generations: 0,
        }
    }

    /// Queue up an event.  Light moves are coalesced, so that only the latest of a run of
    /// [`Event::Move`]s is kept.
    pub fn push(&mut self, event: Event) {
        if let (Event::Move(_), Some(Event::Move(_))) = (event, self.events.back()) {
            self.events.pop_back();
        }
        self.events.push_back(event);
    }

    /// Changes the size of the area to tile.  This only takes effect on the next reset.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /* Getters */

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn light(&self) -> Rad<f32> {
        self.light
    }

    pub fn tiling(&self) -> Option<&Tiling> {
        self.tiling.as_ref()
    }

    /// How many tilings have been successfully generated
    pub fn num_generations(&self) -> usize {
        self.num_generations
    }

    /// The number of events waiting to be handled
    pub fn num_pending(&self) -> usize {
        self.events.len()
    }

    /* Frames */

    /// Runs one frame: handles (at most) one queued event, then advances the drawing until it's
    /// idle again.  Returns the freshly drawn [`Image`], or `None` if nothing was redrawn.  If
    /// generation fails, the driver waits in [`AnimState::NeedsReset`] for the next
    /// [`Event::Reset`] or [`Event::Click`].
    pub fn tick(&mut self) -> Option<Image> {
        match self.events.pop_front() {
            Some(Event::Reset) | Some(Event::Click) => self.state = AnimState::NeedsReset,
            // A failed reset is only retried when another reset arrives
            _ if self.state == AnimState::NeedsReset => return None,
            Some(Event::Move(light)) if self.state == AnimState::Idle => {
                self.light = light;
                self.state = AnimState::Fill;
            }
            Some(Event::Move(_)) => log::trace!("Ignoring light move in state {:?}", self.state),
            None => {}
        }

        let mut frame = None;
        loop {
            let next_state = match self.state {
                AnimState::NeedsReset => {
                    let first_run = self.num_generations == 0;
                    match Tiling::generate(self.viewport, &self.opts, first_run, &mut self.rng) {
                        Ok(tiling) => {
                            self.tiling = Some(tiling);
                            self.num_generations += 1;
                            AnimState::Fill
                        }
                        Err(e) => {
                            log::warn!("Not generating a new tiling: {}", e);
                            return None;
                        }
                    }
                }
                AnimState::Fill => {
                    let tiling = self.tiling.as_ref()?;
                    let mut image = Image::empty(tiling.viewport().width, tiling.viewport().height);
                    image.add(tiling.background());
                    for elem in tiling.fills(self.light) {
                        image.add(elem);
                    }
                    frame = Some(image);
                    AnimState::Stroke
                }
                AnimState::Stroke => {
                    if let (Some(tiling), Some(image)) = (&self.tiling, &mut frame) {
                        for elem in tiling.outlines() {
                            image.add(elem);
                        }
                    }
                    AnimState::Idle
                }
                AnimState::Idle => return frame,
            };
            log::trace!("{:?} -> {:?}", self.state, next_state);
            self.state = next_state;
        }
    }
}
