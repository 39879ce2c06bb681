use cairo::Context;
use gdk_pixbuf::prelude::*;
use gdk_pixbuf::{Pixbuf, PixbufLoader};
use gdk4::prelude::*;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use roundslider::{
    BoundingBox, Document, InteractionMode, Listener, Origin, Point, RenderTarget, Selector,
    SliderOptions,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::rc::Rc;

/// Knob diameter relative to the ring thickness.
const HANDLE_SCALE: f64 = 1.4;

#[derive(Debug, Clone, Copy)]
struct HandleStyle {
    center: f64,
    path_radius: f64,
    radius: f64,
    color: Srgba<f64>,
}

impl HandleStyle {
    fn from_options(options: &SliderOptions) -> Option<Self> {
        (options.mode == InteractionMode::Handle).then(|| Self {
            center: options.radius,
            path_radius: options.path_radius(),
            radius: options.stroke_width * HANDLE_SCALE / 2.0,
            color: options.color.srgba(),
        })
    }
}

#[derive(Default)]
struct Surface {
    pixbuf: Option<Pixbuf>,
    handle: Option<HandleStyle>,
    handle_rotation: f64,
    listeners: HashSet<Listener>,
}

/// A `DrawingArea` sized to the slider graphic. Markup is rasterized through the gdk-pixbuf SVG
/// loader; the handle is painted on top with cairo.
#[derive(Clone)]
pub struct GtkTarget {
    area: gtk::DrawingArea,
    surface: Rc<RefCell<Surface>>,
}

impl GtkTarget {
    pub fn new(area: gtk::DrawingArea) -> Self {
        let surface = Rc::new(RefCell::new(Surface::default()));

        let surface_draw = surface.clone();
        area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = draw(cr, &surface_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        Self { area, surface }
    }

    /// Resizes the area and restyles the handle; call whenever the slider options change.
    pub fn apply_options(&self, options: &SliderOptions) {
        let size = (options.radius * 2.0).ceil() as i32;
        self.area.set_content_width(size);
        self.area.set_content_height(size);
        self.surface.borrow_mut().handle = HandleStyle::from_options(options);
        self.area.queue_draw();
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.surface.borrow().listeners.contains(&listener)
    }

    fn rasterize(markup: &str) -> Result<Pixbuf, glib::Error> {
        let loader = PixbufLoader::with_type("svg")?;
        loader.write(markup.as_bytes())?;
        loader.close()?;
        loader.pixbuf().ok_or_else(|| {
            glib::Error::new(
                gdk_pixbuf::PixbufError::Failed,
                "SVG loader produced no image",
            )
        })
    }
}

impl RenderTarget for GtkTarget {
    fn set_markup(&mut self, markup: &str) {
        match Self::rasterize(markup) {
            Ok(pixbuf) => self.surface.borrow_mut().pixbuf = Some(pixbuf),
            Err(e) => log::error!("Failed to rasterize slider markup: {}", e),
        }
        self.area.queue_draw();
    }

    fn set_handle_rotation(&mut self, degrees: f64) {
        self.surface.borrow_mut().handle_rotation = degrees;
        self.area.queue_draw();
    }

    fn bounding_box(&self) -> BoundingBox {
        // pointer coordinates arrive relative to the area itself
        BoundingBox::new(0.0, 0.0, self.area.width() as f64, self.area.height() as f64)
    }

    fn add_listener(&mut self, listener: Listener) {
        log::trace!("listening for {}", listener);
        self.surface.borrow_mut().listeners.insert(listener);
    }

    fn remove_listener(&mut self, listener: Listener) {
        log::trace!("stopped listening for {}", listener);
        self.surface.borrow_mut().listeners.remove(&listener);
    }
}

#[derive(Default)]
pub struct GtkDocument {
    elements: HashMap<Selector, gtk::DrawingArea>,
}

impl GtkDocument {
    pub fn register(&mut self, selector: impl Into<Selector>, area: gtk::DrawingArea) {
        self.elements.insert(selector.into(), area);
    }
}

impl Document for GtkDocument {
    type Target = GtkTarget;

    fn query_selector(&self, selector: &Selector) -> Option<GtkTarget> {
        self.elements.get(selector).cloned().map(GtkTarget::new)
    }
}

/// Decides whether a press grabbed the handle or landed elsewhere on the ring.
pub fn press_origin(handle: Point, press: Point, grab_radius: f64) -> Origin {
    if handle.distance_to(press) <= grab_radius {
        Origin::Handle
    } else {
        Origin::Surface
    }
}

fn draw(cr: &Context, surface: &Surface) -> Result<(), cairo::Error> {
    if let Some(pixbuf) = &surface.pixbuf {
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
    }

    if let Some(handle) = &surface.handle {
        let (r, g, b, a) = handle.color.into_components();
        cr.save()?;
        cr.translate(handle.center, handle.center);
        cr.rotate(surface.handle_rotation.to_radians());
        cr.set_source_rgba(r, g, b, a);
        cr.arc(handle.path_radius, 0.0, handle.radius, 0.0, 2.0 * PI);
        cr.fill()?;
        cr.restore()?;
    }
    Ok(())
}
