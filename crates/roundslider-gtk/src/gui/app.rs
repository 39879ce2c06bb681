use crate::config;
use crate::events::AppEvent;
use crate::gui::target::{self, GtkDocument, GtkTarget};
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use roundslider::{
    InteractionMode, Listener, Pointer, Point, Slider, SliderBuilder, SliderEvent, SliderOptions,
};
use std::path::PathBuf;

const SLIDER_SELECTOR: &str = "#slider";

pub struct AppInit {
    pub options: SliderOptions,
    pub config_path: PathBuf,
    pub mode_override: Option<InteractionMode>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    /// `None` when the slider could not be mounted; the window then only shows the error.
    slider: Option<Slider<GtkTarget>>,
    value: f64,
    config_path: PathBuf,
    mode_override: Option<InteractionMode>,
}

#[derive(Debug)]
pub enum AppMsg {
    Pressed(Point),
    Motion(Point),
    Released(Point),
    Cancelled,
    ValueChanged(f64),
    Settled(f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppMsg {
    /// Listener the slider must hold for this pointer message to reach it.
    ///
    /// `GestureClick` only cancels a mouse press, which matters only while that press holds
    /// the mouse move listener.
    fn gate(&self) -> Option<Listener> {
        match self {
            AppMsg::Pressed(_) => Some(Listener::MouseDown),
            AppMsg::Motion(_) | AppMsg::Cancelled => Some(Listener::MouseMove),
            AppMsg::Released(_) => Some(Listener::MouseUp),
            AppMsg::ValueChanged(_) | AppMsg::Settled(_) | AppMsg::ConfigReload => None,
        }
    }
}

impl AppModel {
    fn label(&self) -> String {
        match &self.slider {
            Some(_) => format!("{}", self.value),
            None => "Slider unavailable".to_string(),
        }
    }

    fn label_classes(&self) -> &'static [&'static str] {
        match &self.slider {
            Some(_) => &["roundslider-value"],
            None => &["roundslider-value", "roundslider-error"],
        }
    }

    /// Hands `event` to the slider, but only while it listens for `gate`.
    fn forward(
        &mut self,
        gate: Option<Listener>,
        event: impl FnOnce(&Slider<GtkTarget>) -> SliderEvent,
    ) {
        let Some(listener) = gate else {
            return;
        };
        if let Some(slider) = self
            .slider
            .as_mut()
            .filter(|s| s.target().is_listening(listener))
        {
            let event = event(slider);
            slider.handle(event);
        }
    }

    fn reload(&mut self) {
        let Some(slider) = self.slider.as_mut() else {
            return;
        };
        match config::load_options(&self.config_path, self.mode_override) {
            Ok(options) => {
                if let Err(e) = slider.reconfigure(options) {
                    log::error!("Rejected reloaded config: {}", e);
                    return;
                }
                slider.target().apply_options(slider.options());
                self.value = slider.value();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Round Slider"),
            set_default_size: (360, 400),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[root] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        root.close();
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_top: 24,
                set_margin_bottom: 24,
                set_margin_start: 24,
                set_margin_end: 24,
                set_valign: gtk::Align::Center,

                #[local_ref]
                drawing_area -> gtk::DrawingArea {
                    set_halign: gtk::Align::Center,
                    add_css_class: "roundslider-area",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::Motion(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Pressed(Point::new(x, y)));
                        },
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Released(Point::new(x, y)));
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Cancelled);
                        }
                    }
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.label(),
                    #[watch]
                    set_css_classes: model.label_classes(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            options,
            config_path,
            mode_override,
            rx,
        } = init;

        theme::load_css();

        let drawing_area = gtk::DrawingArea::new();
        let mut document = GtkDocument::default();
        document.register(SLIDER_SELECTOR, drawing_area.clone());

        let (changed, settled) = (sender.input_sender().clone(), sender.input_sender().clone());
        let slider = SliderBuilder::new(options)
            .on_change(move |v| changed.emit(AppMsg::ValueChanged(v)))
            .on_after_change(move |v| settled.emit(AppMsg::Settled(v)))
            .create(&document, SLIDER_SELECTOR)
            .inspect(|s| s.target().apply_options(s.options()))
            .ok();

        let model = AppModel {
            value: slider.as_ref().map(|s| s.value()).unwrap_or_default(),
            slider,
            config_path,
            mode_override,
        };

        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let gate = msg.gate();
        match msg {
            AppMsg::Pressed(point) => self.forward(gate, |slider| {
                let grab_radius = slider.options().stroke_width;
                SliderEvent::Down {
                    pointer: Pointer::Mouse(point),
                    origin: target::press_origin(slider.handle_position(), point, grab_radius),
                }
            }),
            AppMsg::Motion(point) => {
                self.forward(gate, |_| SliderEvent::Move(Pointer::Mouse(point)))
            }
            AppMsg::Released(point) => {
                self.forward(gate, |_| SliderEvent::Up);
                self.forward(Some(Listener::Click), |_| SliderEvent::Click(point));
            }
            AppMsg::Cancelled => self.forward(gate, |_| SliderEvent::Cancel),
            AppMsg::ValueChanged(value) => {
                log::debug!("value changed to {}", value);
                self.value = value;
            }
            AppMsg::Settled(value) => {
                log::info!("value settled at {}", value);
                self.value = value;
            }
            AppMsg::ConfigReload => self.reload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundslider::{BoundingBox, Origin, RenderTarget};
    use std::collections::HashSet;

    #[derive(Default)]
    struct Listeners(HashSet<Listener>);

    impl RenderTarget for Listeners {
        fn set_markup(&mut self, _markup: &str) {}

        fn set_handle_rotation(&mut self, _degrees: f64) {}

        fn bounding_box(&self) -> BoundingBox {
            BoundingBox::new(0.0, 0.0, 250.0, 250.0)
        }

        fn add_listener(&mut self, listener: Listener) {
            self.0.insert(listener);
        }

        fn remove_listener(&mut self, listener: Listener) {
            self.0.remove(&listener);
        }
    }

    #[test]
    fn test_cancel_reaches_slider_only_mid_press() {
        let mut slider = SliderBuilder::new(SliderOptions::default())
            .attach(Listeners::default())
            .unwrap();
        let cancel = AppMsg::Cancelled.gate().unwrap();
        assert!(!slider.target().0.contains(&cancel));

        slider.pointer_down(Pointer::Mouse(Point::new(125.0, 10.0)), Origin::Surface);
        assert!(slider.target().0.contains(&cancel));

        slider.pointer_cancel();
        assert!(!slider.target().0.contains(&cancel));
    }

    #[test]
    fn test_slider_callbacks_are_not_gated() {
        assert_eq!(AppMsg::Pressed(Point::new(0.0, 0.0)).gate(), Some(Listener::MouseDown));
        assert_eq!(AppMsg::Released(Point::new(0.0, 0.0)).gate(), Some(Listener::MouseUp));
        assert!(AppMsg::ValueChanged(1.0).gate().is_none());
        assert!(AppMsg::ConfigReload.gate().is_none());
    }
}
