//! The slideshow state machine.
//!
//! `Idle -> Displaying(i) -> Transitioning(i -> j) -> Displaying(j) -> ...`
//!
//! `go_to` is the only transition trigger and is dropped, never queued, while
//! a transition is in flight. A transition covers the slide swap only and
//! lasts `TRANSITION_MS`; the display period that follows is timed by the
//! autoplay timer, which every accepted navigation re-arms.

use tracing::{debug, info};

use crate::config::{ProgressBarMode, SliderOptions};
use crate::constants::{REVEAL_FADE_MS, TRANSITION_MS};
use crate::error::{Result, SlideshowError};
use crate::input::{NavCommand, NavKey};
use crate::sizing::{Size, fit_to_viewport, resolve_size};
use crate::state::{Phase, SlideshowState};
use crate::surface::{IndicatorAnimation, PresentationSurface};
use crate::timer::{TimerPurpose, Timers};

pub struct SlideshowController<S: PresentationSurface> {
    surface: S,
    slide_count: usize,
    options: SliderOptions,

    state: SlideshowState,
    phase: Phase,
    timers: Timers,

    size: Option<Size>,
    display_started_ms: u64,
    indicator_revealed: bool,
}

impl<S: PresentationSurface> SlideshowController<S> {
    pub fn new(surface: S, slide_count: usize, options: SliderOptions) -> Result<Self> {
        options.validate()?;
        if slide_count == 0 {
            return Err(SlideshowError::NoSlides);
        }

        Ok(Self {
            surface,
            slide_count,
            state: SlideshowState::new(options.auto_play, options.interval_ms),
            options,
            phase: Phase::Idle,
            timers: Timers::new(),
            size: None,
            display_started_ms: 0,
            indicator_revealed: false,
        })
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_pending(&self, purpose: TimerPurpose) -> bool {
        self.timers.is_pending(purpose)
    }

    pub fn remaining_ms(&self, purpose: TimerPurpose) -> Option<u64> {
        self.timers.remaining_ms(purpose)
    }

    /// Finishes initialization once the surface has its content.
    /// Returns whether the slideshow is running.
    pub fn poll_ready(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {}
            Phase::Destroyed => return false,
            _ => return true,
        }
        let Some(natural) = self.surface.report_ready() else {
            return false;
        };

        let resolved = resolve_size(self.options.width, self.options.height, natural);
        let size = fit_to_viewport(resolved, self.surface.viewport_size().width);
        if size != natural {
            self.surface.resize_slides(size);
        }
        self.size = Some(size);

        if self.options.progress_bar.is_enabled() {
            let visible = self.options.progress_bar == ProgressBarMode::AlwaysVisible;
            self.surface.mount_indicator(size.width, visible);
        }

        let index = self.state.current_index;
        self.surface.show_slide(index);
        self.phase = Phase::Displaying { index };
        self.display_started_ms = self.timers.now_ms();
        info!(slides = self.slide_count, width = size.width, height = size.height, "slideshow ready");

        if self.state.autoplay_enabled {
            self.start();
            self.timers.schedule(TimerPurpose::AutoplayAdvance, self.state.interval_ms);
        }
        true
    }

    /// Requests a transition to `index`, wrapping out-of-range values.
    /// Returns `false` when the request was dropped.
    pub fn go_to(&mut self, index: isize) -> bool {
        if !matches!(self.phase, Phase::Displaying { .. } | Phase::Transitioning { .. }) {
            debug!(index, phase = ?self.phase, "navigation ignored, slideshow not running");
            return false;
        }

        let to = self.normalize(index);
        if self.state.is_transitioning {
            debug!(requested = to, current = self.state.current_index, "transition in flight, request dropped");
            return false;
        }

        // Lock out other requests until the swap is done
        self.state.is_transitioning = true;
        self.timers.cancel(TimerPurpose::AutoplayAdvance);

        // Just hide the current slide, show the new one
        let from = self.state.current_index;
        if from != to {
            self.surface.hide_slide(from);
            self.surface.show_slide(to);
        }
        self.state.current_index = to;
        self.phase = Phase::Transitioning { from, to };
        debug!(from, to, "transition started");

        // Restart the display period; completion is scheduled first so it
        // wins a tie with the advance when the interval is very short
        self.start();
        self.timers
            .schedule(TimerPurpose::TransitionComplete, TRANSITION_MS.min(self.state.interval_ms));
        if self.state.autoplay_enabled {
            self.timers.schedule(TimerPurpose::AutoplayAdvance, self.state.interval_ms);
        }
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.state.current_index as isize + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.state.current_index as isize - 1)
    }

    pub fn handle_key(&mut self, key: NavKey) -> bool {
        match self.options.keyboard.command_for(key) {
            Some(NavCommand::Prev) => self.prev(),
            Some(NavCommand::Next) => self.next(),
            None => false,
        }
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.phase == Phase::Destroyed || self.state.autoplay_enabled == enabled {
            return;
        }
        self.state.autoplay_enabled = enabled;
        info!(enabled, "autoplay toggled");

        if !enabled {
            self.timers.cancel(TimerPurpose::AutoplayAdvance);
        } else if matches!(self.phase, Phase::Displaying { .. } | Phase::Transitioning { .. }) {
            self.start();
            self.timers.schedule(TimerPurpose::AutoplayAdvance, self.state.interval_ms);
        }
    }

    /// Advances the clock by `dt_ms`, firing every timer that comes due.
    pub fn tick(&mut self, dt_ms: u64) {
        match self.phase {
            Phase::Destroyed => return,
            Phase::Idle => {
                self.poll_ready();
            }
            _ => {}
        }

        let until = self.timers.now_ms().saturating_add(dt_ms);
        while let Some(purpose) = self.timers.next_due(until) {
            self.fire(purpose);
        }
        self.timers.settle(until);
    }

    /// Time spent in the current display period.
    pub fn elapsed_ms(&self) -> u64 {
        match self.phase {
            Phase::Displaying { .. } | Phase::Transitioning { .. } => {
                self.timers.now_ms().saturating_sub(self.display_started_ms)
            }
            _ => 0,
        }
    }

    /// Elapsed fraction of the display interval, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms() as f32 / self.state.interval_ms as f32).min(1.0)
    }

    /// Tears the slideshow down. No timer fires afterwards.
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.timers.cancel_all();
        self.phase = Phase::Destroyed;
        info!("slideshow destroyed");
    }

    fn fire(&mut self, purpose: TimerPurpose) {
        debug!(?purpose, now_ms = self.timers.now_ms(), "timer fired");
        match purpose {
            // Display period is over, move on
            TimerPurpose::AutoplayAdvance => {
                self.next();
            }
            // Swap finished, accept navigation again. The slide stays up
            // until the advance timer (if any) fires
            TimerPurpose::TransitionComplete => {
                self.state.is_transitioning = false;
                self.phase = Phase::Displaying {
                    index: self.state.current_index,
                };
            }
        }
    }

    /// Enters a display period: elapsed time restarts and the indicator runs
    /// from empty to full over one interval.
    fn start(&mut self) {
        self.display_started_ms = self.timers.now_ms();

        let Some(size) = self.size else {
            return;
        };
        let reveal_ms = match self.options.progress_bar {
            ProgressBarMode::Off => return,
            ProgressBarMode::AlwaysVisible => None,
            ProgressBarMode::RevealOnStart if self.indicator_revealed => None,
            ProgressBarMode::RevealOnStart => Some(REVEAL_FADE_MS),
        };
        self.indicator_revealed = true;
        self.surface.animate_indicator(IndicatorAnimation {
            full_width: size.width,
            duration_ms: self.state.interval_ms,
            reveal_ms,
        });
    }

    // Only negative indices wrap to the last slide, so `go_to(0)` reaches slide 0.
    fn normalize(&self, index: isize) -> usize {
        let count = self.slide_count as isize;
        let mut index = index;
        if index < 0 {
            index = count - 1;
        }
        if index >= count {
            index = 0;
        }
        index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyboardMode;
    use crate::surface::recording::{RecordingSurface, SurfaceCall};

    const INTERVAL: u64 = 4000;

    fn options(auto_play: bool) -> SliderOptions {
        SliderOptions {
            auto_play,
            interval_ms: INTERVAL,
            ..SliderOptions::default()
        }
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Size::new(800, 600), Size::new(1920, 1080))
    }

    fn running(slides: usize, options: SliderOptions) -> SlideshowController<RecordingSurface> {
        let mut controller = SlideshowController::new(surface(), slides, options).unwrap();
        assert!(controller.poll_ready());
        controller
    }

    #[test]
    fn zero_slides_is_a_construction_error() {
        let result = SlideshowController::new(surface(), 0, options(true));
        assert!(matches!(result, Err(SlideshowError::NoSlides)));
    }

    #[test]
    fn zero_interval_is_a_construction_error() {
        let options = SliderOptions {
            interval_ms: 0,
            ..SliderOptions::default()
        };
        let result = SlideshowController::new(surface(), 3, options);
        assert!(matches!(result, Err(SlideshowError::InvalidInterval(0))));
    }

    #[test]
    fn autoplay_cycles_through_every_slide_and_wraps() {
        let mut controller = running(3, options(true));
        for _ in 0..3 {
            controller.tick(INTERVAL);
        }
        assert_eq!(controller.surface().shown(), [0, 1, 2, 0]);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn autoplay_survives_coarse_ticks() {
        let mut controller = running(3, options(true));
        controller.tick(3 * INTERVAL);
        assert_eq!(controller.surface().shown(), [0, 1, 2, 0]);
    }

    #[test]
    fn autoplay_fires_on_frame_ticks() {
        let mut controller = running(4, options(true));
        for _ in 0..(INTERVAL / 16 + 1) {
            controller.tick(16);
        }
        assert_eq!(controller.current_index(), 1);
        assert!(controller.state().is_transitioning);
    }

    #[test]
    fn go_to_always_lands_in_range() {
        for slides in 1..6usize {
            for requested in -10isize..10 {
                let mut controller = running(slides, options(false));
                assert!(controller.go_to(requested));
                assert!(controller.current_index() < slides, "{requested} with {slides} slides");
            }
        }
    }

    #[test]
    fn go_to_wraps_both_boundaries() {
        let mut controller = running(5, options(false));
        controller.go_to(7);
        assert_eq!(controller.current_index(), 0);
        controller.tick(INTERVAL);
        controller.go_to(-3);
        assert_eq!(controller.current_index(), 4);
        controller.tick(INTERVAL);
        controller.go_to(2);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn second_go_to_during_transition_is_dropped() {
        let mut controller = running(5, options(false));
        assert!(controller.next());
        assert_eq!(controller.remaining_ms(TimerPurpose::TransitionComplete), Some(TRANSITION_MS));

        controller.tick(100);
        assert!(!controller.go_to(3));
        assert!(!controller.next());
        assert!(!controller.prev());

        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.remaining_ms(TimerPurpose::TransitionComplete), Some(TRANSITION_MS - 100));
        assert_eq!(controller.phase(), Phase::Transitioning { from: 0, to: 1 });
    }

    #[test]
    fn keys_keep_working_while_autoplay_runs() {
        let mut controller = running(5, options(true));
        controller.tick(INTERVAL);
        assert_eq!(controller.current_index(), 1);

        let mut accepted = 0;
        for _ in 0..40 {
            controller.tick(500);
            if controller.handle_key(NavKey::Right) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 40);
        assert_eq!(controller.current_index(), (1 + 40) % 5);
    }

    #[test]
    fn key_after_several_autoplay_advances_is_accepted() {
        let mut controller = running(4, options(true));
        controller.tick(3 * INTERVAL + TRANSITION_MS);
        assert_eq!(controller.current_index(), 3);
        assert!(!controller.state().is_transitioning);

        assert!(controller.handle_key(NavKey::Left));
        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.remaining_ms(TimerPurpose::AutoplayAdvance), Some(INTERVAL));
    }

    #[test]
    fn transition_ends_before_the_display_period() {
        let mut controller = running(3, options(true));
        controller.tick(INTERVAL);
        assert_eq!(controller.phase(), Phase::Transitioning { from: 0, to: 1 });

        controller.tick(TRANSITION_MS);
        assert_eq!(controller.phase(), Phase::Displaying { index: 1 });
        assert_eq!(controller.remaining_ms(TimerPurpose::AutoplayAdvance), Some(INTERVAL - TRANSITION_MS));
    }

    #[test]
    fn completion_without_autoplay_rests_on_the_slide() {
        let mut controller = running(3, options(false));
        controller.next();
        controller.tick(INTERVAL);
        assert!(!controller.state().is_transitioning);
        assert_eq!(controller.phase(), Phase::Displaying { index: 1 });

        controller.tick(10 * INTERVAL);
        assert_eq!(controller.current_index(), 1);
        assert!(controller.next());
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for slides in 1..6usize {
            let mut controller = running(slides, options(false));
            for _ in 0..slides {
                assert!(controller.next());
                controller.tick(INTERVAL);
            }
            assert_eq!(controller.current_index(), 0);
        }
    }

    #[test]
    fn prev_from_first_slide_goes_to_last() {
        let mut controller = running(4, options(false));
        controller.prev();
        assert_eq!(controller.current_index(), 3);
        controller.tick(INTERVAL);
        controller.prev();
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn go_to_zero_reaches_the_first_slide() {
        let mut controller = running(4, options(false));
        controller.go_to(2);
        controller.tick(TRANSITION_MS);
        assert!(controller.go_to(0));
        assert_eq!(controller.current_index(), 0);

        controller.tick(TRANSITION_MS);
        controller.go_to(1);
        controller.tick(TRANSITION_MS);
        controller.prev();
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn single_slide_navigation_keeps_index_without_visual_change() {
        let mut controller = running(1, options(false));
        assert!(controller.next());
        assert_eq!(controller.current_index(), 0);
        controller.tick(INTERVAL);
        assert!(controller.prev());
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.surface().shown(), [0]);
        assert!(!controller.surface().calls.contains(&SurfaceCall::Hide(0)));
    }

    #[test]
    fn single_slide_autoplay_keeps_restarting_the_period() {
        let mut controller = running(1, options(true));
        controller.tick(INTERVAL);
        assert!(controller.state().is_transitioning);
        controller.tick(INTERVAL);
        assert!(controller.state().is_transitioning);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.surface().animations().len(), 3);
    }

    #[test]
    fn destroy_cancels_every_timer() {
        let mut controller = running(3, options(true));
        controller.tick(INTERVAL);
        assert!(controller.is_pending(TimerPurpose::TransitionComplete));

        controller.destroy();
        assert!(!controller.is_pending(TimerPurpose::TransitionComplete));
        assert!(!controller.is_pending(TimerPurpose::AutoplayAdvance));

        controller.tick(100 * INTERVAL);
        assert!(!controller.next());
        assert!(!controller.poll_ready());
        assert_eq!(controller.surface().shown(), [0, 1]);
        assert_eq!(controller.phase(), Phase::Destroyed);
    }

    #[test]
    fn waits_for_the_surface_before_showing_anything() {
        let loading = RecordingSurface::loading(Size::new(1920, 1080));
        let mut controller = SlideshowController::new(loading, 3, options(true)).unwrap();
        controller.tick(10 * INTERVAL);
        assert!(!controller.next());
        assert!(controller.surface().calls.is_empty());
        assert_eq!(controller.phase(), Phase::Idle);

        controller.surface_mut().finish_loading(Size::new(640, 480));
        controller.tick(16);
        assert_eq!(controller.surface().shown(), [0]);
        assert_eq!(controller.remaining_ms(TimerPurpose::AutoplayAdvance), Some(INTERVAL - 16));
    }

    #[test]
    fn manual_navigation_replaces_the_pending_advance() {
        let mut controller = running(4, options(true));
        controller.tick(1000);
        assert!(controller.next());
        assert_eq!(controller.remaining_ms(TimerPurpose::AutoplayAdvance), Some(INTERVAL));

        controller.tick(INTERVAL - 1);
        assert_eq!(controller.current_index(), 1);
        controller.tick(1);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn disabling_autoplay_stops_the_loop() {
        let mut controller = running(3, options(true));
        controller.set_autoplay(false);
        controller.tick(10 * INTERVAL);
        assert_eq!(controller.current_index(), 0);

        controller.set_autoplay(true);
        controller.tick(INTERVAL);
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn disabling_autoplay_mid_transition_lets_it_finish() {
        let mut controller = running(3, options(true));
        controller.tick(INTERVAL);
        controller.set_autoplay(false);
        controller.tick(INTERVAL);
        assert!(!controller.state().is_transitioning);
        assert_eq!(controller.current_index(), 1);
        controller.tick(10 * INTERVAL);
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn progress_tracks_the_display_period() {
        let mut controller = running(3, options(true));
        assert_eq!(controller.progress(), 0.0);
        controller.tick(1000);
        assert_eq!(controller.elapsed_ms(), 1000);
        assert_eq!(controller.progress(), 0.25);
        controller.tick(INTERVAL);
        assert_eq!(controller.elapsed_ms(), 1000);
    }

    #[test]
    fn progress_counts_from_first_display_without_autoplay() {
        let loading = RecordingSurface::loading(Size::new(1920, 1080));
        let mut controller = SlideshowController::new(loading, 3, options(false)).unwrap();
        controller.tick(1000);
        controller.surface_mut().finish_loading(Size::new(640, 480));
        controller.tick(16);
        assert_eq!(controller.elapsed_ms(), 16);

        controller.tick(984);
        assert_eq!(controller.progress(), 0.25);
    }

    #[test]
    fn always_visible_indicator_is_mounted_and_animated() {
        let controller = running(2, options(true));
        let calls = &controller.surface().calls;
        assert!(calls.contains(&SurfaceCall::MountIndicator { width: 800, visible: true }));
        assert_eq!(
            controller.surface().animations(),
            [IndicatorAnimation {
                full_width: 800,
                duration_ms: INTERVAL,
                reveal_ms: None,
            }]
        );
    }

    #[test]
    fn reveal_on_start_fades_in_only_once() {
        let options = SliderOptions {
            progress_bar: ProgressBarMode::RevealOnStart,
            ..options(true)
        };
        let mut controller = running(2, options);
        controller.tick(INTERVAL);

        let surface = controller.surface();
        assert!(surface.calls.contains(&SurfaceCall::MountIndicator { width: 800, visible: false }));
        let reveals: Vec<_> = surface.animations().iter().map(|a| a.reveal_ms).collect();
        assert_eq!(reveals, [Some(REVEAL_FADE_MS), None]);
    }

    #[test]
    fn disabled_progress_bar_is_never_touched() {
        let options = SliderOptions {
            progress_bar: ProgressBarMode::Off,
            ..options(true)
        };
        let mut controller = running(2, options);
        controller.tick(INTERVAL);
        assert!(controller.surface().animations().is_empty());
        assert!(
            !controller
                .surface()
                .calls
                .iter()
                .any(|call| matches!(call, SurfaceCall::MountIndicator { .. }))
        );
    }

    #[test]
    fn narrow_viewport_downscales_slides() {
        let surface = RecordingSurface::new(Size::new(1600, 900), Size::new(800, 600));
        let mut controller = SlideshowController::new(surface, 2, options(false)).unwrap();
        controller.poll_ready();
        assert_eq!(controller.size(), Some(Size::new(800, 450)));
        assert_eq!(controller.surface().calls[0], SurfaceCall::Resize(Size::new(800, 450)));
    }

    #[test]
    fn explicit_size_wins_over_natural_size() {
        let options = SliderOptions {
            width: Some(400),
            height: Some(300),
            ..options(false)
        };
        let controller = running(2, options);
        assert_eq!(controller.size(), Some(Size::new(400, 300)));
    }

    #[test]
    fn keyboard_mapping_follows_mode() {
        let mut controller = running(3, options(false));
        assert!(controller.handle_key(NavKey::Down));
        assert_eq!(controller.current_index(), 1);
        controller.tick(INTERVAL);
        assert!(!controller.handle_key(NavKey::Space));

        let horizontal = SliderOptions {
            keyboard: KeyboardMode::Horizontal,
            ..options(false)
        };
        let mut controller = running(3, horizontal);
        assert!(!controller.handle_key(NavKey::Up));
        assert!(controller.handle_key(NavKey::Left));
        assert_eq!(controller.current_index(), 2);
    }
}
