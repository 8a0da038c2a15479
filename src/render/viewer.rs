//! Interactive surface window
//!
//! Shows the rendered figure in a native window. Dragging rotates the view
//! and triggers a re-render; closing the window returns control to the caller.

use eframe::egui;

use super::plot::{render_rgb, View};
use super::TriSurface;
use crate::config::FigureConfig;
use crate::core::{SurfaceError, SurfaceResult};

/// Window state
pub struct SurfaceViewer {
    surface: TriSurface,
    title: String,
    figure: FigureConfig,
    view: View,
    texture: Option<egui::TextureHandle>,
    stale: bool,
    status: Option<String>,
}

impl SurfaceViewer {
    pub fn new(surface: TriSurface, title: impl Into<String>, figure: FigureConfig) -> Self {
        let view = View::from_figure(&figure);
        Self {
            surface,
            title: title.into(),
            figure,
            view,
            texture: None,
            stale: true,
            status: None,
        }
    }

    /// Current camera angles
    pub fn view(&self) -> View {
        self.view
    }

    /// Apply a pointer drag in screen pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let s = self.figure.drag_sensitivity;
        self.view.rotate(-dx as f64 * s, dy as f64 * s);
        self.stale = true;
    }

    fn refresh(&mut self, ctx: &egui::Context) {
        if !self.stale && self.texture.is_some() {
            return;
        }
        self.stale = false;

        let buffer = match render_rgb(&self.surface, &self.title, self.view, &self.figure) {
            Ok(buffer) => buffer,
            Err(e) => {
                tracing::error!("Surface render failed: {}", e);
                self.status = Some(e.to_string());
                return;
            }
        };

        let size = [self.figure.width as usize, self.figure.height as usize];
        let image = egui::ColorImage::from_rgb(size, &buffer);

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("iv-surface", image, egui::TextureOptions::LINEAR));
            }
        }
        self.status = None;
    }
}

impl eframe::App for SurfaceViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(status) = &self.status {
                ui.colored_label(egui::Color32::RED, status);
            }

            let mut delta = None;
            if let Some(texture) = &self.texture {
                let response = ui.add(
                    egui::Image::new((texture.id(), texture.size_vec2())).sense(egui::Sense::drag()),
                );
                if response.dragged() {
                    delta = Some(response.drag_delta());
                }
            }

            if let Some(d) = delta {
                self.drag(d.x, d.y);
                ctx.request_repaint();
            }
        });
    }
}

/// Open the window and block until it is closed
pub fn show_surface(surface: TriSurface, title: &str, figure: &FigureConfig) -> SurfaceResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([figure.width as f32 + 16.0, figure.height as f32 + 16.0])
            .with_title(title),
        ..Default::default()
    };

    let viewer = SurfaceViewer::new(surface, title, figure.clone());

    eframe::run_native(
        "IV Surface",
        options,
        Box::new(move |_cc| Box::new(viewer)),
    )
    .map_err(|e| SurfaceError::Display(e.to_string()))
}
