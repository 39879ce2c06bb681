use super::TOP_OFFSET;
use super::geometry::{ValueScale, pointer_to_angle, polar_to_cartesian};
use super::view::{RenderParams, render_markup};
use crate::error::{ConfigError, SliderError};
use crate::events::{Origin, Pointer, SliderEvent, TouchId};
use crate::options::{InteractionMode, SliderOptions};
use crate::target::{Document, Listener, Point, RenderTarget, Selector};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

pub type ValueCallback = Box<dyn FnMut(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Pressed on the ring, no movement yet.
    Armed,
    Dragging,
}

pub struct SliderBuilder {
    options: SliderOptions,
    on_change: Option<ValueCallback>,
    on_after_change: Option<ValueCallback>,
}

impl SliderBuilder {
    pub fn new(options: SliderOptions) -> Self {
        Self {
            options,
            on_change: None,
            on_after_change: None,
        }
    }

    /// Called with the snapped value whenever an interaction changes it.
    pub fn on_change(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called with the final value once a drag or click ends.
    pub fn on_after_change(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_after_change = Some(Box::new(f));
        self
    }

    pub fn mode(mut self, mode: InteractionMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Looks up `selector` in `document` and mounts a slider on it.
    pub fn create<D: Document>(
        self,
        document: &D,
        selector: impl Into<Selector>,
    ) -> Result<Slider<D::Target>, SliderError> {
        let selector = selector.into();
        let Some(target) = document.query_selector(&selector) else {
            log::error!("Element could not be found: {}", selector);
            return Err(SliderError::TargetNotFound { selector });
        };
        self.attach(target).map_err(SliderError::from)
    }

    pub fn attach<T: RenderTarget>(self, target: T) -> Result<Slider<T>, ConfigError> {
        if let Err(e) = self.options.validate() {
            log::error!("Invalid slider options: {}", e);
            return Err(e);
        }
        Ok(Slider::mount(self, target))
    }
}

pub struct Slider<T: RenderTarget> {
    target: T,
    options: SliderOptions,
    scale: ValueScale,
    instance_id: u64,
    value: f64,
    phase: Phase,
    click_armed: bool,
    tracked_touch: Option<TouchId>,
    move_listener: Option<Listener>,
    on_change: Option<ValueCallback>,
    on_after_change: Option<ValueCallback>,
}

impl<T: RenderTarget> Slider<T> {
    fn mount(builder: SliderBuilder, mut target: T) -> Self {
        let SliderBuilder {
            options,
            on_change,
            on_after_change,
        } = builder;

        let scale = ValueScale::from_options(&options);
        let value = Self::initial_value(&scale, options.initial_value);

        Listener::base().for_each(|l| target.add_listener(l));

        let mut slider = Self {
            target,
            options,
            scale,
            instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            value,
            phase: Phase::Idle,
            click_armed: true,
            tracked_touch: None,
            move_listener: None,
            on_change,
            on_after_change,
        };
        log::debug!(
            "slider {} mounted at {} ({} mode)",
            slider.instance_id,
            slider.value,
            slider.options.mode
        );
        slider.render();
        slider
    }

    fn initial_value(scale: &ValueScale, requested: f64) -> f64 {
        if requested < scale.min || requested > scale.max {
            log::warn!(
                "initial value {} outside [{}, {}], clamping",
                requested,
                scale.min,
                scale.max
            );
        }
        scale.snap(requested).value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Ring angle of the current value, derived on every call.
    pub fn angle(&self) -> f64 {
        self.scale.value_to_angle(self.value)
    }

    pub fn handle_rotation(&self) -> f64 {
        self.angle() - TOP_OFFSET
    }

    /// Where the value arc ends, in the graphic's own coordinates.
    pub fn handle_position(&self) -> Point {
        let radius = self.options.radius;
        polar_to_cartesian(
            Point::new(radius, radius),
            self.options.path_radius(),
            self.angle(),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn scale(&self) -> &ValueScale {
        &self.scale
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Moves the slider without firing callbacks.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.scale.snap(value).value;
        self.render();
    }

    /// Swaps in new options. An in-flight gesture is dropped without callbacks.
    pub fn reconfigure(&mut self, options: SliderOptions) -> Result<(), ConfigError> {
        options.validate()?;
        if self.phase != Phase::Idle {
            log::debug!("slider {}: gesture dropped by reconfigure", self.instance_id);
            self.release();
        }

        self.scale = ValueScale::from_options(&options);
        self.options = options;
        self.value = self.scale.snap(self.value).value;
        self.render();
        Ok(())
    }

    pub fn handle(&mut self, event: SliderEvent) {
        match event {
            SliderEvent::Down { pointer, origin } => self.pointer_down(pointer, origin),
            SliderEvent::Move(pointer) => self.pointer_move(pointer),
            SliderEvent::Up => self.pointer_up(),
            SliderEvent::Cancel => self.pointer_cancel(),
            SliderEvent::Click(point) => self.click(point),
        }
    }

    pub fn pointer_down(&mut self, pointer: Pointer, origin: Origin) {
        if self.phase != Phase::Idle {
            return;
        }
        // a fresh press owns whatever click follows it
        self.click_armed = true;
        if self.options.mode == InteractionMode::Handle && origin != Origin::Handle {
            log::trace!("slider {}: press off the handle ignored", self.instance_id);
            return;
        }

        let listener = match &pointer {
            Pointer::Mouse(_) => Listener::MouseMove,
            Pointer::Touch(touches) => {
                let Some(first) = touches.first() else {
                    return;
                };
                self.tracked_touch = Some(first.id);
                Listener::TouchMove
            }
        };

        self.target.add_listener(listener);
        self.move_listener = Some(listener);
        // a press on the handle is always a drag, never a click
        self.click_armed = self.options.mode == InteractionMode::Surface;
        self.phase = match self.options.mode {
            InteractionMode::Surface => Phase::Armed,
            InteractionMode::Handle => Phase::Dragging,
        };
        log::debug!("slider {}: {:?}", self.instance_id, self.phase);
    }

    pub fn pointer_move(&mut self, pointer: Pointer) {
        if self.phase == Phase::Idle {
            return;
        }
        let Some(position) = self.tracked_position(&pointer) else {
            return;
        };

        if self.phase == Phase::Armed {
            self.phase = Phase::Dragging;
            self.click_armed = false;
            log::debug!("slider {}: Dragging", self.instance_id);
        }

        if self.apply_position(position) {
            self.notify_change();
        }
    }

    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// Ends the gesture like [`Self::pointer_up`]. No click trails a cancel, so none is
    /// left pending.
    pub fn pointer_cancel(&mut self) {
        self.finish_gesture();
        self.click_armed = true;
    }

    /// A press-and-release that did not turn into a drag; jumps to the clicked position.
    pub fn click(&mut self, position: Point) {
        if self.phase != Phase::Idle {
            return;
        }
        if !self.click_armed {
            // trailing click of a drag
            self.click_armed = true;
            return;
        }

        if self.apply_position(position) {
            self.notify_change();
        }
        self.notify_after_change();
    }

    /// Unmounts the slider, removing every listener it still holds on the target.
    pub fn detach(mut self) -> T {
        self.release();
        Listener::base().for_each(|l| self.target.remove_listener(l));
        log::debug!("slider {} detached", self.instance_id);
        self.target
    }

    fn tracked_position(&self, pointer: &Pointer) -> Option<Point> {
        match (pointer, self.move_listener) {
            (Pointer::Mouse(p), Some(Listener::MouseMove)) => Some(*p),
            (Pointer::Touch(touches), Some(Listener::TouchMove)) => touches
                .iter()
                .find(|t| Some(t.id) == self.tracked_touch)
                .map(|t| t.position),
            _ => None,
        }
    }

    fn apply_position(&mut self, position: Point) -> bool {
        let center = self.target.bounding_box().center();
        let angle = pointer_to_angle(position.x - center.x, position.y - center.y);
        let snapped = self.scale.snap(self.scale.angle_to_value(angle));

        let changed = snapped.value != self.value;
        self.value = snapped.value;
        self.render();
        changed
    }

    fn finish_gesture(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        let was_dragging = self.phase == Phase::Dragging;
        self.release();
        if was_dragging {
            self.notify_after_change();
        }
    }

    fn release(&mut self) {
        if let Some(listener) = self.move_listener.take() {
            self.target.remove_listener(listener);
        }
        self.tracked_touch = None;
        self.phase = Phase::Idle;
    }

    fn notify_change(&mut self) {
        let value = self.value;
        if let Some(f) = self.on_change.as_mut() {
            f(value);
        }
    }

    fn notify_after_change(&mut self) {
        let value = self.value;
        log::debug!("slider {}: settled at {}", self.instance_id, value);
        if let Some(f) = self.on_after_change.as_mut() {
            f(value);
        }
    }

    fn render(&mut self) {
        let markup = render_markup(&RenderParams {
            options: &self.options,
            scale: self.scale,
            value: self.value,
            instance_id: self.instance_id,
        });
        self.target.set_markup(&markup);
        if self.options.mode == InteractionMode::Handle {
            let rotation = self.handle_rotation();
            self.target.set_handle_rotation(rotation);
        }
    }
}
